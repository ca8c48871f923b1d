use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::value_objects::Category;

pub struct CreateProductParams {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: Category,
    pub brand: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub featured: bool,
    pub on_sale: bool,
    pub sale_price: Option<BigDecimal>,
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError>;
}
