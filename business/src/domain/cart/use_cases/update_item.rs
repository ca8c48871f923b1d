use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::shared::value_objects::UserId;

pub struct UpdateItemParams {
    pub user_id: UserId,
    pub item_id: Uuid,
    pub quantity: i64,
}

#[async_trait]
pub trait UpdateItemUseCase: Send + Sync {
    async fn execute(&self, params: UpdateItemParams) -> Result<ResolvedCart, CartError>;
}
