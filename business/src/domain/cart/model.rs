use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::UserId;

/// One (product, quantity, snapshotted price) triple within a cart. The id is
/// stable and independent of the line's position in the cart.
#[derive(Debug, Clone)]
pub struct CartLineItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    /// Effective unit price captured when the line was first added. Never
    /// refreshed on later adds of the same product.
    pub price: BigDecimal,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    pub fn new(product_id: Uuid, quantity: u32, price: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            price,
            added_at: Utc::now(),
        }
    }
}

/// The per-user cart aggregate: an insertion-ordered list of line items with
/// at most one line per product.
#[derive(Debug, Clone)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartLineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_repository(
        user_id: UserId,
        items: Vec<CartLineItem>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            items,
            created_at,
            updated_at,
        }
    }

    pub fn line_for_product(&self, product_id: Uuid) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn line_by_id(&self, item_id: Uuid) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total_price(&self) -> BigDecimal {
        self.items.iter().fold(BigDecimal::from(0), |acc, item| {
            acc + item.price.clone() * BigDecimal::from(item.quantity)
        })
    }
}

/// A cart line with its product resolved to full catalog detail.
#[derive(Debug, Clone)]
pub struct ResolvedLineItem {
    pub id: Uuid,
    pub product: Product,
    pub quantity: u32,
    pub price: BigDecimal,
}

/// The cart as served to clients: lines resolved against the catalog, with
/// the derived totals. Lines whose product no longer exists in the catalog
/// are omitted.
#[derive(Debug, Clone)]
pub struct ResolvedCart {
    pub items: Vec<ResolvedLineItem>,
    pub total_items: u64,
    pub total_price: BigDecimal,
}

impl ResolvedCart {
    /// The synthetic empty cart returned when the user has no cart record.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: BigDecimal::from(0),
        }
    }

    pub fn resolve(cart: Cart, products: Vec<Product>) -> Self {
        let mut by_id: HashMap<Uuid, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();

        let items: Vec<ResolvedLineItem> = cart
            .items
            .into_iter()
            .filter_map(|line| {
                by_id.remove(&line.product_id).map(|product| ResolvedLineItem {
                    id: line.id,
                    product,
                    quantity: line.quantity,
                    price: line.price,
                })
            })
            .collect();

        let total_items = items.iter().map(|item| u64::from(item.quantity)).sum();
        let total_price = items.iter().fold(BigDecimal::from(0), |acc, item| {
            acc + item.price.clone() * BigDecimal::from(item.quantity)
        });

        Self {
            items,
            total_items,
            total_price,
        }
    }
}
