use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, Review};
use business::domain::product::repository::{ProductFilter, ProductPage, ProductRepository};
use business::domain::product::value_objects::{ProductSort, SortOrder};
use business::domain::shared::value_objects::UserId;

use super::entity::{ProductEntity, ReviewEntity};

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, brand, images, stock, \
     rating, num_reviews, featured, on_sale, sale_price, created_at, updated_at";

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        builder.push(" AND (name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ");
        builder.push_bind(category.to_string());
    }
    if let Some(min_price) = &filter.min_price {
        builder.push(" AND price >= ");
        builder.push_bind(min_price.clone());
    }
    if let Some(max_price) = &filter.max_price {
        builder.push(" AND price <= ");
        builder.push_bind(max_price.clone());
    }
    if let Some(featured) = filter.featured {
        builder.push(" AND featured = ");
        builder.push_bind(featured);
    }
    if let Some(on_sale) = filter.on_sale {
        builder.push(" AND on_sale = ");
        builder.push_bind(on_sale);
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn get_page(&self, filter: &ProductFilter) -> Result<ProductPage, RepositoryError> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM products WHERE TRUE");
        apply_filters(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM products WHERE TRUE",
            PRODUCT_COLUMNS
        ));
        apply_filters(&mut builder, filter);

        // sort column and direction come from closed enums, never from input
        let column = match filter.sort_by {
            ProductSort::CreatedAt => "created_at",
            ProductSort::Price => "price",
            ProductSort::Rating => "rating",
            ProductSort::Name => "name",
        };
        let direction = match filter.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        builder.push(format!(" ORDER BY {} {}", column, direction));

        let offset = i64::from(filter.page.saturating_sub(1)) * i64::from(filter.limit);
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let entities = builder
            .build_query_as::<ProductEntity>()
            .fetch_all(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        let total = u64::try_from(total).unwrap_or(0);
        let pages = if total == 0 {
            0
        } else {
            u32::try_from((total - 1) / u64::from(filter.limit) + 1).unwrap_or(u32::MAX)
        };

        Ok(ProductPage {
            products: entities.into_iter().map(|e| e.into_domain()).collect(),
            total,
            page: filter.page,
            pages,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE id = ANY($1)",
            PRODUCT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO products (id, name, description, price, category, brand, images,
                stock, rating, num_reviews, featured, on_sale, sale_price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                category = EXCLUDED.category,
                brand = EXCLUDED.brand,
                images = EXCLUDED.images,
                stock = EXCLUDED.stock,
                rating = EXCLUDED.rating,
                num_reviews = EXCLUDED.num_reviews,
                featured = EXCLUDED.featured,
                on_sale = EXCLUDED.on_sale,
                sale_price = EXCLUDED.sale_price,
                updated_at = EXCLUDED.updated_at"#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.price)
        .bind(product.category.to_string())
        .bind(&product.brand)
        .bind(&product.images)
        .bind(i32::try_from(product.stock).unwrap_or(i32::MAX))
        .bind(product.rating)
        .bind(i32::try_from(product.num_reviews).unwrap_or(i32::MAX))
        .bind(product.featured)
        .bind(product.on_sale)
        .bind(product.sale_price.as_ref())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn get_reviews(&self, product_id: Uuid) -> Result<Vec<Review>, RepositoryError> {
        let entities = sqlx::query_as::<_, ReviewEntity>(
            "SELECT id, product_id, user_id, user_name, rating, comment, created_at \
             FROM product_reviews WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn find_review(
        &self,
        product_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Review>, RepositoryError> {
        let entity = sqlx::query_as::<_, ReviewEntity>(
            "SELECT id, product_id, user_id, user_name, rating, comment, created_at \
             FROM product_reviews WHERE product_id = $1 AND user_id = $2",
        )
        .bind(product_id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn add_review(&self, review: &Review) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        sqlx::query(
            "INSERT INTO product_reviews (id, product_id, user_id, user_name, rating, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(review.id)
        .bind(review.product_id)
        .bind(review.user_id.as_str())
        .bind(&review.user_name)
        .bind(i16::from(review.rating))
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                RepositoryError::Duplicated
            } else {
                RepositoryError::DatabaseError
            }
        })?;

        // keep the denormalized stats in the same unit of work as the insert
        sqlx::query(
            r#"UPDATE products SET
                rating = (SELECT COALESCE(AVG(rating), 0) FROM product_reviews WHERE product_id = $1),
                num_reviews = (SELECT COUNT(*) FROM product_reviews WHERE product_id = $1),
                updated_at = $2
            WHERE id = $1"#,
        )
        .bind(review.product_id)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        tx.commit().await.map_err(|_| RepositoryError::DatabaseError)
    }
}
