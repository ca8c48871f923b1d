use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub carts: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<(), CartError> {
        self.logger
            .info(&format!("Clearing cart of {}", params.user_id));

        self.carts.delete_by_user(&params.user_id).await?;
        Ok(())
    }
}
