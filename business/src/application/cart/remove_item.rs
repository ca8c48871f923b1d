use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::get::resolved_cart;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::remove_item::{RemoveItemParams, RemoveItemUseCase};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct RemoveItemUseCaseImpl {
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveItemUseCase for RemoveItemUseCaseImpl {
    async fn execute(&self, params: RemoveItemParams) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Removing cart item {} of {}",
            params.item_id, params.user_id
        ));

        let cart = self
            .carts
            .find_by_user(&params.user_id)
            .await?
            .ok_or(CartError::NotFound)?;

        if cart.line_by_id(params.item_id).is_none() {
            return Err(CartError::ItemNotFound);
        }

        self.carts
            .remove_line_item(&params.user_id, params.item_id)
            .await?;

        resolved_cart(self.carts.as_ref(), self.products.as_ref(), &params.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::{Cart, CartLineItem};
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::{NewProductProps, Product, Review};
    use crate::domain::product::repository::{ProductFilter, ProductPage};
    use crate::domain::product::value_objects::Category;
    use crate::domain::shared::value_objects::UserId;
    use bigdecimal::BigDecimal;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub CartRepo {}

        #[async_trait]
        impl CartRepository for CartRepo {
            async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError>;
            async fn upsert_line_item(&self, user_id: &UserId, item: &CartLineItem) -> Result<(), RepositoryError>;
            async fn update_line_quantity(&self, user_id: &UserId, item_id: Uuid, quantity: u32) -> Result<(), RepositoryError>;
            async fn remove_line_item(&self, user_id: &UserId, item_id: Uuid) -> Result<(), RepositoryError>;
            async fn delete_by_user(&self, user_id: &UserId) -> Result<(), RepositoryError>;
        }
    }

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

    fn test_user_id() -> UserId {
        UserId::new("customer-1")
    }

    fn catalog_product(name: &str, price: i64) -> Product {
        Product::new(NewProductProps {
            name: name.to_string(),
            description: "A product".to_string(),
            price: BigDecimal::from(price),
            category: Category::Other,
            brand: "Brand".to_string(),
            images: vec![],
            stock: 10,
            featured: false,
            on_sale: false,
            sale_price: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_fail_when_cart_missing() {
        let mut carts = MockCartRepo::new();
        carts.expect_find_by_user().returning(|_| Ok(None));

        let use_case = RemoveItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(MockProductRepo::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveItemParams {
                user_id: test_user_id(),
                item_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }

    #[tokio::test]
    async fn should_fail_when_item_missing_and_leave_cart_untouched() {
        let line = CartLineItem::new(Uuid::new_v4(), 2, BigDecimal::from(10));
        let mut carts = MockCartRepo::new();
        carts.expect_find_by_user().returning(move |_| {
            Ok(Some(Cart::from_repository(
                test_user_id(),
                vec![line.clone()],
                chrono::Utc::now(),
                chrono::Utc::now(),
            )))
        });
        // no expect_remove_line_item: removal must not be attempted

        let use_case = RemoveItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(MockProductRepo::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveItemParams {
                user_id: test_user_id(),
                item_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::ItemNotFound));
    }

    #[tokio::test]
    async fn should_remove_exactly_one_line_and_keep_the_rest() {
        let kept_product = catalog_product("Kept", 30);
        let removed_product = catalog_product("Removed", 50);
        let kept = CartLineItem::new(kept_product.id, 1, BigDecimal::from(30));
        let removed = CartLineItem::new(removed_product.id, 2, BigDecimal::from(50));
        let removed_id = removed.id;

        let mut carts = MockCartRepo::new();
        let kept_clone = kept.clone();
        let removed_clone = removed.clone();
        carts.expect_find_by_user().times(1).returning(move |_| {
            Ok(Some(Cart::from_repository(
                test_user_id(),
                vec![kept_clone.clone(), removed_clone.clone()],
                chrono::Utc::now(),
                chrono::Utc::now(),
            )))
        });
        carts
            .expect_remove_line_item()
            .withf(move |_, id| *id == removed_id)
            .times(1)
            .returning(|_, _| Ok(()));
        let kept_clone = kept.clone();
        carts.expect_find_by_user().times(1).returning(move |_| {
            Ok(Some(Cart::from_repository(
                test_user_id(),
                vec![kept_clone.clone()],
                chrono::Utc::now(),
                chrono::Utc::now(),
            )))
        });

        let mut products = MockProductRepo::new();
        products
            .expect_get_by_ids()
            .returning(move |_| Ok(vec![kept_product.clone()]));

        let use_case = RemoveItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let resolved = use_case
            .execute(RemoveItemParams {
                user_id: test_user_id(),
                item_id: removed_id,
            })
            .await
            .unwrap();

        // total_items dropped by exactly the removed quantity
        assert_eq!(resolved.items.len(), 1);
        assert_eq!(resolved.total_items, 1);
        assert_eq!(resolved.total_price, BigDecimal::from(30));
    }

    #[tokio::test]
    async fn should_return_empty_but_existing_cart_after_last_item_removed() {
        let product = catalog_product("Last", 20);
        let line = CartLineItem::new(product.id, 1, BigDecimal::from(20));
        let item_id = line.id;

        let mut carts = MockCartRepo::new();
        carts.expect_find_by_user().times(1).returning(move |_| {
            Ok(Some(Cart::from_repository(
                test_user_id(),
                vec![line.clone()],
                chrono::Utc::now(),
                chrono::Utc::now(),
            )))
        });
        carts
            .expect_remove_line_item()
            .times(1)
            .returning(|_, _| Ok(()));
        carts.expect_find_by_user().times(1).returning(move |_| {
            Ok(Some(Cart::from_repository(
                test_user_id(),
                vec![],
                chrono::Utc::now(),
                chrono::Utc::now(),
            )))
        });

        let mut products = MockProductRepo::new();
        products.expect_get_by_ids().returning(|_| Ok(vec![]));

        let use_case = RemoveItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let resolved = use_case
            .execute(RemoveItemParams {
                user_id: test_user_id(),
                item_id,
            })
            .await
            .unwrap();

        assert!(resolved.items.is_empty());
        assert_eq!(resolved.total_items, 0);
    }
}
