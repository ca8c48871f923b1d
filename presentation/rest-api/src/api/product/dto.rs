use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use poem_openapi::Object;

use business::domain::product::model::{Product, ProductDetail, Review};

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name (1-100 characters)
    pub name: String,
    /// Product description (1-1000 characters)
    pub description: String,
    /// List price, non-negative
    pub price: f64,
    /// One of the catalog categories, e.g. "Electronics"
    pub category: String,
    pub brand: String,
    #[oai(skip_serializing_if_is_none)]
    pub images: Option<Vec<String>>,
    /// Units in stock (default 0)
    #[oai(skip_serializing_if_is_none)]
    pub stock: Option<i64>,
    #[oai(skip_serializing_if_is_none)]
    pub featured: Option<bool>,
    #[oai(skip_serializing_if_is_none)]
    pub on_sale: Option<bool>,
    #[oai(skip_serializing_if_is_none)]
    pub sale_price: Option<f64>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub price: Option<f64>,
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub brand: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub images: Option<Vec<String>>,
    #[oai(skip_serializing_if_is_none)]
    pub stock: Option<i64>,
    #[oai(skip_serializing_if_is_none)]
    pub featured: Option<bool>,
    #[oai(skip_serializing_if_is_none)]
    pub on_sale: Option<bool>,
    #[oai(skip_serializing_if_is_none)]
    pub sale_price: Option<f64>,
}

#[derive(Debug, Clone, Object)]
pub struct AddReviewRequest {
    /// Star rating, 1 to 5
    pub rating: i64,
    pub comment: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    /// Identifier of the reviewing user
    pub user: String,
    /// Display name of the reviewing user
    pub name: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            user: review.user_id.to_string(),
            name: review.user_name,
            rating: i64::from(review.rating),
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub brand: String,
    pub images: Vec<String>,
    pub stock: i64,
    /// Average review rating, 0 when unreviewed
    pub rating: f64,
    pub num_reviews: i64,
    pub featured: bool,
    pub on_sale: bool,
    #[oai(skip_serializing_if_is_none)]
    pub sale_price: Option<f64>,
    /// Present on the detail endpoint only
    #[oai(skip_serializing_if_is_none)]
    pub reviews: Option<Vec<ReviewResponse>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price.to_f64().unwrap_or(0.0),
            category: product.category.to_string(),
            brand: product.brand,
            images: product.images,
            stock: i64::from(product.stock),
            rating: product.rating,
            num_reviews: i64::from(product.num_reviews),
            featured: product.featured,
            on_sale: product.on_sale,
            sale_price: product.sale_price.as_ref().and_then(|p| p.to_f64()),
            reviews: None,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<ProductDetail> for ProductResponse {
    fn from(detail: ProductDetail) -> Self {
        let mut response: ProductResponse = detail.product.into();
        response.reviews = Some(detail.reviews.into_iter().map(|r| r.into()).collect());
        response
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductListEnvelope {
    pub success: bool,
    pub products: Vec<ProductResponse>,
    pub total: i64,
    pub page: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, Object)]
pub struct ProductEnvelope {
    pub success: bool,
    pub product: ProductResponse,
}

#[derive(Debug, Clone, Object)]
pub struct ProductMutationEnvelope {
    pub success: bool,
    pub message: String,
    pub product: ProductResponse,
}

#[derive(Debug, Clone, Object)]
pub struct DeleteProductEnvelope {
    pub success: bool,
    pub message: String,
}
