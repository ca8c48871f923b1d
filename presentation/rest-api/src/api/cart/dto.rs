use num_traits::ToPrimitive;
use poem_openapi::Object;

use business::domain::cart::model::{ResolvedCart, ResolvedLineItem};

use crate::api::product::dto::ProductResponse;

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    /// Catalog product to add
    pub product_id: String,
    /// How many units to add (default 1)
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemRequest {
    /// New quantity for the line item (minimum 1)
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartLineItemResponse {
    /// Line item identifier, stable across cart mutations
    pub id: String,
    /// Full catalog detail of the referenced product
    pub product: ProductResponse,
    pub quantity: i64,
    /// Unit price snapshotted when the line was first added
    pub price: f64,
}

impl From<ResolvedLineItem> for CartLineItemResponse {
    fn from(line: ResolvedLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            product: line.product.into(),
            quantity: i64::from(line.quantity),
            price: line.price.to_f64().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItemResponse>,
    pub total_items: i64,
    pub total_price: f64,
}

impl From<ResolvedCart> for CartResponse {
    fn from(cart: ResolvedCart) -> Self {
        let total_price = cart.total_price.to_f64().unwrap_or(0.0);
        Self {
            items: cart.items.into_iter().map(|line| line.into()).collect(),
            total_items: i64::try_from(cart.total_items).unwrap_or(i64::MAX),
            total_price,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartEnvelope {
    pub success: bool,
    pub cart: CartResponse,
}

#[derive(Debug, Clone, Object)]
pub struct CartMutationEnvelope {
    pub success: bool,
    pub message: String,
    pub cart: CartResponse,
}

#[derive(Debug, Clone, Object)]
pub struct ClearCartEnvelope {
    pub success: bool,
    pub message: String,
}
