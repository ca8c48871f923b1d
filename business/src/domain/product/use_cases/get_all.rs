use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductPage;
use crate::domain::product::value_objects::{Category, ProductSort, SortOrder};

pub struct GetAllProductsParams {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
    pub sort_by: ProductSort,
    pub sort_order: SortOrder,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[async_trait]
pub trait GetAllProductsUseCase: Send + Sync {
    async fn execute(&self, params: GetAllProductsParams) -> Result<ProductPage, ProductError>;
}
