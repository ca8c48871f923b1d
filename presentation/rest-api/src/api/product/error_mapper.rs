use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            ProductError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            ProductError::AlreadyReviewed => (StatusCode::CONFLICT, "Conflict"),
            ProductError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
            ProductError::NameEmpty
            | ProductError::NameTooLong
            | ProductError::DescriptionEmpty
            | ProductError::DescriptionTooLong
            | ProductError::BrandEmpty
            | ProductError::NegativePrice
            | ProductError::NegativeSalePrice
            | ProductError::InvalidRating
            | ProductError::CommentEmpty => (StatusCode::BAD_REQUEST, "ValidationError"),
        };

        let message = match &self {
            ProductError::Repository(_) => "repository.persistence".to_string(),
            other => other.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_validation_errors_to_bad_request() {
        let (status, json) = ProductError::NegativePrice.into_error_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.message, "product.negative_price");
    }

    #[test]
    fn should_map_duplicate_review_to_conflict() {
        let (status, _) = ProductError::AlreadyReviewed.into_error_response();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn should_hide_storage_detail_behind_generic_code() {
        let (status, json) =
            ProductError::Repository(RepositoryError::DatabaseError).into_error_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.message, "repository.persistence");
    }
}
