use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::ProductDetail;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_by_id::{GetProductByIdParams, GetProductByIdUseCase};

pub struct GetProductByIdUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByIdUseCase for GetProductByIdUseCaseImpl {
    async fn execute(&self, params: GetProductByIdParams) -> Result<ProductDetail, ProductError> {
        self.logger
            .debug(&format!("Fetching product {}", params.id));

        let product = match self.repository.get_by_id(params.id).await {
            Ok(product) => product,
            Err(RepositoryError::NotFound) => return Err(ProductError::NotFound),
            Err(err) => return Err(err.into()),
        };
        let reviews = self.repository.get_reviews(params.id).await?;

        Ok(ProductDetail { product, reviews })
    }
}
