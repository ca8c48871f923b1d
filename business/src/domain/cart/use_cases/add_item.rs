use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::shared::value_objects::UserId;

pub struct AddItemParams {
    pub user_id: UserId,
    pub product_id: Uuid,
    pub quantity: i64,
}

#[async_trait]
pub trait AddItemUseCase: Send + Sync {
    async fn execute(&self, params: AddItemParams) -> Result<ResolvedCart, CartError>;
}
