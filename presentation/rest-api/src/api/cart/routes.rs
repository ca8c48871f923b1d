use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart::use_cases::add_item::{AddItemParams, AddItemUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use business::domain::cart::use_cases::remove_item::{RemoveItemParams, RemoveItemUseCase};
use business::domain::cart::use_cases::update_item::{UpdateItemParams, UpdateItemUseCase};

use crate::api::cart::dto::{
    AddCartItemRequest, CartEnvelope, CartMutationEnvelope, ClearCartEnvelope,
    UpdateCartItemRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::BearerAuth;
use crate::api::tags::ApiTags;

pub struct CartApi {
    get_use_case: Arc<dyn GetCartUseCase>,
    add_use_case: Arc<dyn AddItemUseCase>,
    update_use_case: Arc<dyn UpdateItemUseCase>,
    remove_use_case: Arc<dyn RemoveItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
}

impl CartApi {
    pub fn new(
        get_use_case: Arc<dyn GetCartUseCase>,
        add_use_case: Arc<dyn AddItemUseCase>,
        update_use_case: Arc<dyn UpdateItemUseCase>,
        remove_use_case: Arc<dyn RemoveItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
    ) -> Self {
        Self {
            get_use_case,
            add_use_case,
            update_use_case,
            remove_use_case,
            clear_use_case,
        }
    }
}

/// Shopping cart API
///
/// The cart always belongs to the authenticated caller; no cross-user access
/// exists.
#[OpenApi]
impl CartApi {
    /// Get the caller's cart
    ///
    /// Returns the hydrated cart, or an empty synthetic cart when the caller
    /// never added anything. Retrieval never creates a cart record.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self, auth: BearerAuth) -> GetCartResponse {
        let params = GetCartParams {
            user_id: auth.0.user_id,
        };

        match self.get_use_case.execute(params).await {
            Ok(cart) => GetCartResponse::Ok(Json(CartEnvelope {
                success: true,
                cart: cart.into(),
            })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCartResponse::InternalError(json)
            }
        }
    }

    /// Add an item to the cart
    ///
    /// Adds the product with the given quantity (default 1), merging into an
    /// existing line when the product is already in the cart. The unit price
    /// is snapshotted on the first add.
    #[oai(path = "/cart", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(&self, auth: BearerAuth, body: Json<AddCartItemRequest>) -> AddItemResponse {
        let product_id = match Uuid::parse_str(&body.0.product_id) {
            Ok(uuid) => uuid,
            Err(_) => {
                return AddItemResponse::NotFound(Json(ErrorResponse {
                    name: "NotFound".to_string(),
                    message: "cart.product_not_found".to_string(),
                }));
            }
        };

        let params = AddItemParams {
            user_id: auth.0.user_id,
            product_id,
            quantity: body.0.quantity.unwrap_or(1),
        };

        match self.add_use_case.execute(params).await {
            Ok(cart) => AddItemResponse::Ok(Json(CartMutationEnvelope {
                success: true,
                message: "Item added to cart".to_string(),
                cart: cart.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddItemResponse::BadRequest(json),
                    404 => AddItemResponse::NotFound(json),
                    _ => AddItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a cart line's quantity
    ///
    /// Replaces the quantity in place, re-checking the product's current
    /// stock. The price snapshot is not touched.
    #[oai(path = "/cart/:item_id", method = "put", tag = "ApiTags::Cart")]
    async fn update_item(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        body: Json<UpdateCartItemRequest>,
    ) -> UpdateItemResponse {
        let uuid = match Uuid::parse_str(&item_id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return UpdateItemResponse::NotFound(Json(ErrorResponse {
                    name: "NotFound".to_string(),
                    message: "cart.item_not_found".to_string(),
                }));
            }
        };

        let params = UpdateItemParams {
            user_id: auth.0.user_id,
            item_id: uuid,
            quantity: body.0.quantity,
        };

        match self.update_use_case.execute(params).await {
            Ok(cart) => UpdateItemResponse::Ok(Json(CartMutationEnvelope {
                success: true,
                message: "Cart updated".to_string(),
                cart: cart.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateItemResponse::BadRequest(json),
                    404 => UpdateItemResponse::NotFound(json),
                    _ => UpdateItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove one line from the cart
    ///
    /// Removing the last line leaves an empty cart record behind; only
    /// clearing deletes the cart itself.
    #[oai(path = "/cart/:item_id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(&self, auth: BearerAuth, item_id: Path<String>) -> RemoveItemResponse {
        let uuid = match Uuid::parse_str(&item_id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return RemoveItemResponse::NotFound(Json(ErrorResponse {
                    name: "NotFound".to_string(),
                    message: "cart.item_not_found".to_string(),
                }));
            }
        };

        let params = RemoveItemParams {
            user_id: auth.0.user_id,
            item_id: uuid,
        };

        match self.remove_use_case.execute(params).await {
            Ok(cart) => RemoveItemResponse::Ok(Json(CartMutationEnvelope {
                success: true,
                message: "Item removed from cart".to_string(),
                cart: cart.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => RemoveItemResponse::NotFound(json),
                    _ => RemoveItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Clear the cart
    ///
    /// Deletes the whole cart record. Idempotent: succeeds even when no cart
    /// exists.
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear_cart(&self, auth: BearerAuth) -> ClearCartResponse {
        let params = ClearCartParams {
            user_id: auth.0.user_id,
        };

        match self.clear_use_case.execute(params).await {
            Ok(()) => ClearCartResponse::Ok(Json(ClearCartEnvelope {
                success: true,
                message: "Cart cleared successfully".to_string(),
            })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ClearCartResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartEnvelope>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartMutationEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartMutationEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartMutationEnvelope>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartResponse {
    #[oai(status = 200)]
    Ok(Json<ClearCartEnvelope>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
