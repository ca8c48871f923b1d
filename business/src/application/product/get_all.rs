use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::{ProductFilter, ProductPage, ProductRepository};
use crate::domain::product::use_cases::get_all::{GetAllProductsParams, GetAllProductsUseCase};

const DEFAULT_PAGE_SIZE: u32 = 12;
const MAX_PAGE_SIZE: u32 = 50;

pub struct GetAllProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllProductsUseCase for GetAllProductsUseCaseImpl {
    async fn execute(&self, params: GetAllProductsParams) -> Result<ProductPage, ProductError> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        self.logger
            .debug(&format!("Listing catalog page {} (limit {})", page, limit));

        let filter = ProductFilter {
            search: params.search,
            category: params.category,
            min_price: params.min_price,
            max_price: params.max_price,
            featured: params.featured,
            on_sale: params.on_sale,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
            page,
            limit,
        };

        Ok(self.repository.get_page(&filter).await?)
    }
}
