use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{NewProductProps, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Creating product: {}", params.name));

        let product = Product::new(NewProductProps {
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category,
            brand: params.brand,
            images: params.images,
            stock: params.stock,
            featured: params.featured,
            on_sale: params.on_sale,
            sale_price: params.sale_price,
        })?;

        self.repository.save(&product).await?;

        self.logger.info(&format!("Product created: {}", product.id));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::Review;
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

    fn valid_params() -> CreateProductParams {
        CreateProductParams {
            name: "Organic Cotton T-Shirt".to_string(),
            description: "Comfortable and sustainable.".to_string(),
            price: BigDecimal::from(30),
            category: Category::Clothing,
            brand: "EcoWear".to_string(),
            images: vec!["https://example.com/shirt.jpg".to_string()],
            stock: 100,
            featured: false,
            on_sale: true,
            sale_price: Some(BigDecimal::from(20)),
        }
    }

    #[tokio::test]
    async fn should_create_product_when_valid() {
        let mut repository = MockProductRepo::new();
        repository.expect_save().times(1).returning(|_| Ok(()));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        let product = use_case.execute(valid_params()).await.unwrap();
        assert_eq!(product.name, "Organic Cotton T-Shirt");
        assert_eq!(product.effective_price(), BigDecimal::from(20));
    }

    #[tokio::test]
    async fn should_reject_invalid_product_without_saving() {
        let repository = MockProductRepo::new();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(repository),
            logger: mock_logger(),
        };

        let mut params = valid_params();
        params.name = String::new();
        let result = use_case.execute(params).await;

        assert!(matches!(result.unwrap_err(), ProductError::NameEmpty));
    }
}
