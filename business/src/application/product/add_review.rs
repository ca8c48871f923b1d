use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{ProductDetail, Review};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::add_review::{AddReviewParams, AddReviewUseCase};

pub struct AddReviewUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddReviewUseCase for AddReviewUseCaseImpl {
    async fn execute(&self, params: AddReviewParams) -> Result<ProductDetail, ProductError> {
        self.logger.info(&format!(
            "Adding review for product {} by {}",
            params.product_id, params.user_id
        ));

        match self.repository.get_by_id(params.product_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => return Err(ProductError::NotFound),
            Err(err) => return Err(err.into()),
        }

        if self
            .repository
            .find_review(params.product_id, &params.user_id)
            .await?
            .is_some()
        {
            return Err(ProductError::AlreadyReviewed);
        }

        let review = Review::new(
            params.product_id,
            params.user_id,
            params.user_name,
            params.rating,
            params.comment,
        )?;

        match self.repository.add_review(&review).await {
            Ok(()) => {}
            // a concurrent insert can still win the unique check
            Err(RepositoryError::Duplicated) => return Err(ProductError::AlreadyReviewed),
            Err(err) => return Err(err.into()),
        }

        let product = self.repository.get_by_id(params.product_id).await?;
        let reviews = self.repository.get_reviews(params.product_id).await?;

        Ok(ProductDetail { product, reviews })
    }
}
