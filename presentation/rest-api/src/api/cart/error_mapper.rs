use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            CartError::NotFound => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "cart.not_found".to_string(),
            ),
            CartError::ItemNotFound => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "cart.item_not_found".to_string(),
            ),
            CartError::ProductNotFound => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "cart.product_not_found".to_string(),
            ),
            // the client renders this one verbatim, so it carries the live count
            CartError::InsufficientStock { available } => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                format!("Only {} items available in stock", available),
            ),
            CartError::QuantityBelowMinimum => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.quantity_below_minimum".to_string(),
            ),
            CartError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence".to_string(),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message,
            }),
        )
    }
}
