use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

/// Initialize the database connection pool and bring the schema up to date
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - MIGRATIONS_PATH: Directory with SQL migrations (default: "./migrations")
///
/// # Errors
/// Returns error if DATABASE_URL is not set, the connection fails, or a
/// migration cannot be applied
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_postgres_pool(&DatabaseConfig::new(db_url)).await?;

    let migrations_path =
        env::var("MIGRATIONS_PATH").unwrap_or_else(|_| "./migrations".to_string());
    run_migrations(&pool, &migrations_path).await?;

    Ok(pool)
}
