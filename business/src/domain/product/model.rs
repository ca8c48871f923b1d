use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ProductError;
use super::value_objects::Category;
use crate::domain::shared::value_objects::UserId;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: Category,
    pub brand: String,
    pub images: Vec<String>,
    pub stock: u32,
    pub rating: f64,
    pub num_reviews: u32,
    pub featured: bool,
    pub on_sale: bool,
    pub sale_price: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProductProps {
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

/// Partial update applied to an existing product. `None` leaves the field
/// untouched.
#[derive(Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category: Option<Category>,
    pub brand: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
    pub sale_price: Option<BigDecimal>,
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::NameEmpty);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ProductError::NameTooLong);
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ProductError> {
    if description.trim().is_empty() {
        return Err(ProductError::DescriptionEmpty);
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ProductError::DescriptionTooLong);
    }
    Ok(())
}

fn validate_price(price: &BigDecimal) -> Result<(), ProductError> {
    if *price < BigDecimal::from(0) {
        return Err(ProductError::NegativePrice);
    }
    Ok(())
}

fn validate_sale_price(sale_price: &BigDecimal) -> Result<(), ProductError> {
    if *sale_price < BigDecimal::from(0) {
        return Err(ProductError::NegativeSalePrice);
    }
    Ok(())
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        validate_name(&props.name)?;
        validate_description(&props.description)?;
        if props.brand.trim().is_empty() {
            return Err(ProductError::BrandEmpty);
        }
        validate_price(&props.price)?;
        if let Some(sale_price) = &props.sale_price {
            validate_sale_price(sale_price)?;
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: props.name,
            description: props.description,
            price: props.price,
            category: props.category,
            brand: props.brand,
            images: props.images,
            stock: props.stock,
            rating: 0.0,
            num_reviews: 0,
            featured: props.featured,
            on_sale: props.on_sale,
            sale_price: props.sale_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        name: String,
        description: String,
        price: BigDecimal,
        category: Category,
        brand: String,
        images: Vec<String>,
        stock: u32,
        rating: f64,
        num_reviews: u32,
        featured: bool,
        on_sale: bool,
        sale_price: Option<BigDecimal>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            category,
            brand,
            images,
            stock,
            rating,
            num_reviews,
            featured,
            on_sale,
            sale_price,
            created_at,
            updated_at,
        }
    }

    /// The unit price a buyer pays right now: the sale price when the product
    /// is on sale and one is set, the list price otherwise.
    pub fn effective_price(&self) -> BigDecimal {
        if self.on_sale && let Some(sale_price) = &self.sale_price {
            sale_price.clone()
        } else {
            self.price.clone()
        }
    }

    /// Applies a partial update, validating each provided field before any
    /// of them is written.
    pub fn apply(&mut self, changes: ProductChanges) -> Result<(), ProductError> {
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }
        if let Some(description) = &changes.description {
            validate_description(description)?;
        }
        if let Some(brand) = &changes.brand
            && brand.trim().is_empty()
        {
            return Err(ProductError::BrandEmpty);
        }
        if let Some(price) = &changes.price {
            validate_price(price)?;
        }
        if let Some(sale_price) = &changes.sale_price {
            validate_sale_price(sale_price)?;
        }

        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(brand) = changes.brand {
            self.brand = brand;
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        if let Some(featured) = changes.featured {
            self.featured = featured;
        }
        if let Some(on_sale) = changes.on_sale {
            self.on_sale = on_sale;
        }
        if let Some(sale_price) = changes.sale_price {
            self.sale_price = Some(sale_price);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A buyer's review of a product. At most one per (product, user).
#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        product_id: Uuid,
        user_id: UserId,
        user_name: String,
        rating: u8,
        comment: String,
    ) -> Result<Self, ProductError> {
        if !(1..=5).contains(&rating) {
            return Err(ProductError::InvalidRating);
        }
        if comment.trim().is_empty() {
            return Err(ProductError::CommentEmpty);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            user_name,
            rating,
            comment,
            created_at: Utc::now(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        product_id: Uuid,
        user_id: UserId,
        user_name: String,
        rating: u8,
        comment: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            user_id,
            user_name,
            rating,
            comment,
            created_at,
        }
    }
}

/// A product together with its reviews, as served by the detail endpoint.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: Vec<Review>,
}
