use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::{Product, Review};
use business::domain::product::value_objects::Category;
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub brand: String,
    pub images: Vec<String>,
    pub stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub featured: bool,
    pub on_sale: bool,
    pub sale_price: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.name,
            self.description,
            self.price,
            self.category.parse::<Category>().unwrap_or(Category::Other),
            self.brand,
            self.images,
            u32::try_from(self.stock).unwrap_or(0),
            self.rating,
            u32::try_from(self.num_reviews).unwrap_or(0),
            self.featured,
            self.on_sale,
            self.sale_price,
            self.created_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct ReviewEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewEntity {
    pub fn into_domain(self) -> Review {
        Review::from_repository(
            self.id,
            self.product_id,
            UserId::new(self.user_id),
            self.user_name,
            u8::try_from(self.rating).unwrap_or(0),
            self.comment,
            self.created_at,
        )
    }
}
