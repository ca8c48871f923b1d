use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartLineItem};
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartEntity {
    pub fn into_domain(self, items: Vec<CartLineItem>) -> Cart {
        Cart::from_repository(
            UserId::new(self.user_id),
            items,
            self.created_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub added_at: DateTime<Utc>,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartLineItem {
        CartLineItem {
            id: self.id,
            product_id: self.product_id,
            quantity: u32::try_from(self.quantity).unwrap_or(0),
            price: self.price,
            added_at: self.added_at,
        }
    }
}
