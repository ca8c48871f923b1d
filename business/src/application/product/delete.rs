use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Deleting product {}", params.id));

        match self.repository.get_by_id(params.id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => return Err(ProductError::NotFound),
            Err(err) => return Err(err.into()),
        }

        self.repository.delete(params.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::model::{NewProductProps, Product, Review};
    use crate::domain::product::repository::{ProductFilter, ProductPage};
    use crate::domain::product::value_objects::Category;
    use crate::domain::shared::value_objects::UserId;
    use bigdecimal::BigDecimal;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_page(&self, filter: &ProductFilter) -> Result<ProductPage, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
            async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
            async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
            async fn get_reviews(&self, product_id: Uuid) -> Result<Vec<Review>, RepositoryError>;
            async fn find_review(&self, product_id: Uuid, user_id: &UserId) -> Result<Option<Review>, RepositoryError>;
            async fn add_review(&self, review: &Review) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_delete_existing_product() {
        let product = Product::new(NewProductProps {
            name: "Toy Robot".to_string(),
            description: "Beep boop.".to_string(),
            price: BigDecimal::from(40),
            category: Category::Toys,
            brand: "RoboFun".to_string(),
            images: vec![],
            stock: 7,
            featured: false,
            on_sale: false,
            sale_price: None,
        })
        .unwrap();
        let id = product.id;

        let mut repository = MockProductRepo::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(product.clone()));
        repository
            .expect_delete()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        assert!(use_case.execute(DeleteProductParams { id }).await.is_ok());
    }

    #[tokio::test]
    async fn should_fail_when_product_missing() {
        let mut repository = MockProductRepo::new();
        repository
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams { id: Uuid::new_v4() })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }
}
