#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.not_found")]
    NotFound,
    #[error("cart.item_not_found")]
    ItemNotFound,
    #[error("cart.product_not_found")]
    ProductNotFound,
    #[error("cart.insufficient_stock: only {available} items available in stock")]
    InsufficientStock { available: u32 },
    #[error("cart.quantity_below_minimum")]
    QuantityBelowMinimum,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
