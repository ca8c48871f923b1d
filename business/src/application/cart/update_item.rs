use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::get::resolved_cart;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::update_item::{UpdateItemParams, UpdateItemUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct UpdateItemUseCaseImpl {
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateItemUseCase for UpdateItemUseCaseImpl {
    async fn execute(&self, params: UpdateItemParams) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Updating cart item {} of {} to quantity {}",
            params.item_id, params.user_id, params.quantity
        ));

        if params.quantity < 1 {
            return Err(CartError::QuantityBelowMinimum);
        }

        let cart = self
            .carts
            .find_by_user(&params.user_id)
            .await?
            .ok_or(CartError::NotFound)?;

        let line = cart
            .line_by_id(params.item_id)
            .ok_or(CartError::ItemNotFound)?;

        // stock is re-read here, not reused from add time
        let product = match self.products.get_by_id(line.product_id).await {
            Ok(product) => product,
            Err(RepositoryError::NotFound) => return Err(CartError::ProductNotFound),
            Err(err) => return Err(err.into()),
        };

        if params.quantity > i64::from(product.stock) {
            return Err(CartError::InsufficientStock {
                available: product.stock,
            });
        }
        // bounded by stock, so the cast cannot truncate
        let quantity = params.quantity as u32;

        match self
            .carts
            .update_line_quantity(&params.user_id, params.item_id, quantity)
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::Conflict) => {
                let available = self
                    .products
                    .get_by_id(line.product_id)
                    .await
                    .map(|product| product.stock)
                    .unwrap_or(0);
                return Err(CartError::InsufficientStock { available });
            }
            Err(err) => return Err(err.into()),
        }

        resolved_cart(self.carts.as_ref(), self.products.as_ref(), &params.user_id).await
    }
}
