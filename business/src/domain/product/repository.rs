use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{Product, Review};
use super::value_objects::{Category, ProductSort, SortOrder};

/// Filters and paging for catalog listings. `search` matches name and
/// description case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
    pub sort_by: ProductSort,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_page(&self, filter: &ProductFilter) -> Result<ProductPage, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Batch lookup used to hydrate cart line items. Missing ids are simply
    /// absent from the result, not an error.
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn get_reviews(&self, product_id: Uuid) -> Result<Vec<Review>, RepositoryError>;
    async fn find_review(
        &self,
        product_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Review>, RepositoryError>;
    /// Inserts the review and refreshes the product's denormalized rating and
    /// review count in the same unit of work. Returns `Duplicated` when the
    /// user already reviewed the product.
    async fn add_review(&self, review: &Review) -> Result<(), RepositoryError>;
}
