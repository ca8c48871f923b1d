use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::product::repository::ProductRepositoryPostgres;

use business::application::cart::add_item::AddItemUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::get::GetCartUseCaseImpl;
use business::application::cart::remove_item::RemoveItemUseCaseImpl;
use business::application::cart::update_item::UpdateItemUseCaseImpl;
use business::application::product::add_review::AddReviewUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_api: crate::api::product::routes::ProductApi,
    pub cart_api: crate::api::cart::routes::CartApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let cart_repository = Arc::new(CartRepositoryPostgres::new(pool));

        // Catalog use cases
        let create_use_case = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let add_review_use_case = Arc::new(AddReviewUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });

        // Cart use cases
        let get_cart_use_case = Arc::new(GetCartUseCaseImpl {
            carts: cart_repository.clone(),
            products: product_repository.clone(),
            logger: logger.clone(),
        });
        let add_item_use_case = Arc::new(AddItemUseCaseImpl {
            carts: cart_repository.clone(),
            products: product_repository.clone(),
            logger: logger.clone(),
        });
        let update_item_use_case = Arc::new(UpdateItemUseCaseImpl {
            carts: cart_repository.clone(),
            products: product_repository.clone(),
            logger: logger.clone(),
        });
        let remove_item_use_case = Arc::new(RemoveItemUseCaseImpl {
            carts: cart_repository.clone(),
            products: product_repository,
            logger: logger.clone(),
        });
        let clear_cart_use_case = Arc::new(ClearCartUseCaseImpl {
            carts: cart_repository,
            logger,
        });

        let product_api = crate::api::product::routes::ProductApi::new(
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            add_review_use_case,
        );

        let cart_api = crate::api::cart::routes::CartApi::new(
            get_cart_use_case,
            add_item_use_case,
            update_item_use_case,
            remove_item_use_case,
            clear_cart_use_case,
        );

        Self {
            health_api,
            product_api,
            cart_api,
        }
    }
}
