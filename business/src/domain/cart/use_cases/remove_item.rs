use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::shared::value_objects::UserId;

pub struct RemoveItemParams {
    pub user_id: UserId,
    pub item_id: Uuid,
}

#[async_trait]
pub trait RemoveItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveItemParams) -> Result<ResolvedCart, CartError>;
}
