use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartLineItem};
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use super::entity::{CartEntity, CartItemEntity};

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, CartEntity>(
            "SELECT user_id, created_at, updated_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItemEntity>(
            "SELECT id, product_id, quantity, price, added_at \
             FROM cart_items WHERE user_id = $1 ORDER BY added_at ASC, id ASC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(Some(
            cart.into_domain(items.into_iter().map(|e| e.into_domain()).collect()),
        ))
    }

    async fn upsert_line_item(
        &self,
        user_id: &UserId,
        item: &CartLineItem,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        sqlx::query(
            "INSERT INTO carts (user_id, created_at, updated_at) VALUES ($1, $2, $2) \
             ON CONFLICT (user_id) DO UPDATE SET updated_at = EXCLUDED.updated_at",
        )
        .bind(user_id.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        // the insert only happens while the product's live stock covers the
        // requested quantity; zero rows means the stock check lost a race
        let result = sqlx::query(
            r#"INSERT INTO cart_items (id, user_id, product_id, quantity, price, added_at)
            SELECT $1, $2, p.id, $4, $5, $6
            FROM products p
            WHERE p.id = $3 AND p.stock >= $4
            ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity"#,
        )
        .bind(item.id)
        .bind(user_id.as_str())
        .bind(item.product_id)
        .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
        .bind(&item.price)
        .bind(item.added_at)
        .execute(&mut *tx)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|_| RepositoryError::DatabaseError)?;
            return Err(RepositoryError::Conflict);
        }

        tx.commit().await.map_err(|_| RepositoryError::DatabaseError)
    }

    async fn update_line_quantity(
        &self,
        user_id: &UserId,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        let result = sqlx::query(
            r#"UPDATE cart_items ci SET quantity = $3
            FROM products p
            WHERE ci.id = $1 AND ci.user_id = $2 AND p.id = ci.product_id AND p.stock >= $3"#,
        )
        .bind(item_id)
        .bind(user_id.as_str())
        .bind(i32::try_from(quantity).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|_| RepositoryError::DatabaseError)?;
            return Err(RepositoryError::Conflict);
        }

        sqlx::query("UPDATE carts SET updated_at = $2 WHERE user_id = $1")
            .bind(user_id.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        tx.commit().await.map_err(|_| RepositoryError::DatabaseError)
    }

    async fn remove_line_item(
        &self,
        user_id: &UserId,
        item_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        sqlx::query("UPDATE carts SET updated_at = $2 WHERE user_id = $1")
            .bind(user_id.as_str())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        tx.commit().await.map_err(|_| RepositoryError::DatabaseError)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        // cart_items go with the cart via ON DELETE CASCADE
        sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }
}
