use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::ProductDetail;
use crate::domain::shared::value_objects::UserId;

pub struct AddReviewParams {
    pub product_id: Uuid,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

#[async_trait]
pub trait AddReviewUseCase: Send + Sync {
    async fn execute(&self, params: AddReviewParams) -> Result<ProductDetail, ProductError>;
}
