#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.name_too_long")]
    NameTooLong,
    #[error("product.description_empty")]
    DescriptionEmpty,
    #[error("product.description_too_long")]
    DescriptionTooLong,
    #[error("product.brand_empty")]
    BrandEmpty,
    #[error("product.negative_price")]
    NegativePrice,
    #[error("product.negative_sale_price")]
    NegativeSalePrice,
    #[error("product.not_found")]
    NotFound,
    #[error("review.invalid_rating")]
    InvalidRating,
    #[error("review.comment_empty")]
    CommentEmpty,
    #[error("review.already_exists")]
    AlreadyReviewed,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
