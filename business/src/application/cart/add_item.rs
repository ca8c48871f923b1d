use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::get::resolved_cart;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartLineItem, ResolvedCart};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_item::{AddItemParams, AddItemUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct AddItemUseCaseImpl {
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddItemUseCase for AddItemUseCaseImpl {
    async fn execute(&self, params: AddItemParams) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Adding product {} (x{}) to cart of {}",
            params.product_id, params.quantity, params.user_id
        ));

        if params.quantity < 1 {
            return Err(CartError::QuantityBelowMinimum);
        }

        let product = match self.products.get_by_id(params.product_id).await {
            Ok(product) => product,
            Err(RepositoryError::NotFound) => return Err(CartError::ProductNotFound),
            Err(err) => return Err(err.into()),
        };

        let cart = self
            .carts
            .find_by_user(&params.user_id)
            .await?
            .unwrap_or_else(|| Cart::new(params.user_id.clone()));

        let existing = cart.line_for_product(params.product_id);
        let requested = existing.map_or(0, |line| i64::from(line.quantity)) + params.quantity;

        if requested > i64::from(product.stock) {
            return Err(CartError::InsufficientStock {
                available: product.stock,
            });
        }
        // bounded by stock, so the cast cannot truncate
        let requested = requested as u32;

        let item = match existing {
            // only the quantity moves; the price snapshot from the first add stays
            Some(line) => CartLineItem {
                quantity: requested,
                ..line.clone()
            },
            None => CartLineItem::new(params.product_id, requested, product.effective_price()),
        };

        match self.carts.upsert_line_item(&params.user_id, &item).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict) => {
                // stock moved between the check and the write; report what is left now
                let available = self
                    .products
                    .get_by_id(params.product_id)
                    .await
                    .map(|product| product.stock)
                    .unwrap_or(0);
                return Err(CartError::InsufficientStock { available });
            }
            Err(err) => return Err(err.into()),
        }

        self.logger.info(&format!(
            "Product {} now at quantity {} in cart of {}",
            params.product_id, requested, params.user_id
        ));

        resolved_cart(self.carts.as_ref(), self.products.as_ref(), &params.user_id).await
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

    fn sale_product(stock: u32) -> Product {
        let mut product = Product::new(NewProductProps {
            name: "Wireless Headphones".to_string(),
            description: "Noise cancelling.".to_string(),
            price: BigDecimal::from(100),
            category: Category::Electronics,
            brand: "TechSound".to_string(),
            images: vec![],
            stock: 0,
            featured: false,
            on_sale: true,
            sale_price: Some(BigDecimal::from(80)),
        })
        .unwrap();
        product.stock = stock;
        product
    }

    fn cart_with_line(user_id: UserId, line: CartLineItem) -> Cart {
        Cart::from_repository(user_id, vec![line], chrono::Utc::now(), chrono::Utc::now())
    }

    #[tokio::test]
    async fn should_snapshot_sale_price_when_adding_new_line() {
        let product = sale_product(5);
        let product_id = product.id;

        let mut products = MockProductRepo::new();
        let product_clone = product.clone();
        products
            .expect_get_by_id()
            .returning(move |_| Ok(product_clone.clone()));

        let mut carts = MockCartRepo::new();
        carts
            .expect_find_by_user()
            .times(1)
            .returning(|_| Ok(None));
        carts
            .expect_upsert_line_item()
            .withf(move |_, item| {
                item.product_id == product_id
                    && item.quantity == 2
                    && item.price == BigDecimal::from(80)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        // hydration pass after the write
        carts.expect_find_by_user().times(1).returning(move |_| {
            Ok(Some(cart_with_line(
                test_user_id(),
                CartLineItem::new(product_id, 2, BigDecimal::from(80)),
            )))
        });

        let product_clone = product.clone();
        products
            .expect_get_by_ids()
            .returning(move |_| Ok(vec![product_clone.clone()]));

        let use_case = AddItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let resolved = use_case
            .execute(AddItemParams {
                user_id: test_user_id(),
                product_id,
                quantity: 2,
            })
            .await
            .unwrap();

        assert_eq!(resolved.total_items, 2);
        assert_eq!(resolved.total_price, BigDecimal::from(160));
    }

    #[tokio::test]
    async fn should_merge_quantities_and_keep_first_price() {
        let mut product = sale_product(10);
        // the sale ended after the first add; the snapshot must not move
        product.on_sale = false;
        let product_id = product.id;
        let existing = CartLineItem::new(product_id, 2, BigDecimal::from(80));
        let existing_id = existing.id;

        let mut products = MockProductRepo::new();
        let product_clone = product.clone();
        products
            .expect_get_by_id()
            .returning(move |_| Ok(product_clone.clone()));

        let mut carts = MockCartRepo::new();
        let existing_clone = existing.clone();
        carts
            .expect_find_by_user()
            .times(1)
            .returning(move |_| Ok(Some(cart_with_line(test_user_id(), existing_clone.clone()))));
        carts
            .expect_upsert_line_item()
            .withf(move |_, item| {
                item.id == existing_id && item.quantity == 5 && item.price == BigDecimal::from(80)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let merged = CartLineItem {
            quantity: 5,
            ..existing.clone()
        };
        carts
            .expect_find_by_user()
            .times(1)
            .returning(move |_| Ok(Some(cart_with_line(test_user_id(), merged.clone()))));

        let product_clone = product.clone();
        products
            .expect_get_by_ids()
            .returning(move |_| Ok(vec![product_clone.clone()]));

        let use_case = AddItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let resolved = use_case
            .execute(AddItemParams {
                user_id: test_user_id(),
                product_id,
                quantity: 3,
            })
            .await
            .unwrap();

        assert_eq!(resolved.items.len(), 1);
        assert_eq!(resolved.items[0].price, BigDecimal::from(80));
        assert_eq!(resolved.total_items, 5);
    }

    #[tokio::test]
    async fn should_reject_when_requested_exceeds_stock() {
        let product = sale_product(5);
        let product_id = product.id;
        let existing = CartLineItem::new(product_id, 2, BigDecimal::from(80));

        let mut products = MockProductRepo::new();
        products
            .expect_get_by_id()
            .returning(move |_| Ok(product.clone()));

        let mut carts = MockCartRepo::new();
        carts
            .expect_find_by_user()
            .returning(move |_| Ok(Some(cart_with_line(test_user_id(), existing.clone()))));

        let use_case = AddItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddItemParams {
                user_id: test_user_id(),
                product_id,
                quantity: 4,
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::InsufficientStock { available: 5 }
        ));
    }

    #[tokio::test]
    async fn should_fail_when_product_missing() {
        let mut products = MockProductRepo::new();
        products
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));
        let carts = MockCartRepo::new();

        let use_case = AddItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddItemParams {
                user_id: test_user_id(),
                product_id: Uuid::new_v4(),
                quantity: 1,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::ProductNotFound));
    }

    #[tokio::test]
    async fn should_reject_quantity_below_one() {
        for quantity in [0i64, -3] {
            let use_case = AddItemUseCaseImpl {
                carts: Arc::new(MockCartRepo::new()),
                products: Arc::new(MockProductRepo::new()),
                logger: mock_logger(),
            };

            let result = use_case
                .execute(AddItemParams {
                    user_id: test_user_id(),
                    product_id: Uuid::new_v4(),
                    quantity,
                })
                .await;

            assert!(matches!(
                result.unwrap_err(),
                CartError::QuantityBelowMinimum
            ));
        }
    }

    #[tokio::test]
    async fn should_report_live_stock_when_write_guard_conflicts() {
        let product = sale_product(5);
        let product_id = product.id;
        let mut raced = product.clone();
        raced.stock = 1;

        let mut products = MockProductRepo::new();
        products
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(product.clone()));
        products
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(raced.clone()));

        let mut carts = MockCartRepo::new();
        carts.expect_find_by_user().returning(|_| Ok(None));
        carts
            .expect_upsert_line_item()
            .returning(|_, _| Err(RepositoryError::Conflict));

        let use_case = AddItemUseCaseImpl {
            carts: Arc::new(carts),
            products: Arc::new(products),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddItemParams {
                user_id: test_user_id(),
                product_id,
                quantity: 3,
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::InsufficientStock { available: 1 }
        ));
    }
}
