use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ResolvedCart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;
use crate::domain::shared::value_objects::UserId;

/// Loads the user's cart and resolves every line against the catalog.
/// Shared by all cart use cases that return the hydrated cart.
pub(crate) async fn resolved_cart(
    carts: &dyn CartRepository,
    products: &dyn ProductRepository,
    user_id: &UserId,
) -> Result<ResolvedCart, CartError> {
    let cart = match carts.find_by_user(user_id).await? {
        Some(cart) => cart,
        None => return Ok(ResolvedCart::empty()),
    };

    let ids: Vec<Uuid> = cart.items.iter().map(|line| line.product_id).collect();
    let catalog = products.get_by_ids(&ids).await?;
    Ok(ResolvedCart::resolve(cart, catalog))
}

pub struct GetCartUseCaseImpl {
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self, params: GetCartParams) -> Result<ResolvedCart, CartError> {
        self.logger
            .debug(&format!("Fetching cart of {}", params.user_id));

        resolved_cart(self.carts.as_ref(), self.products.as_ref(), &params.user_id).await
    }
}
