// apps/product_api/src/db/mod.rs

//! PostgreSQL access: pool setup, table bootstrap and the product store.

pub mod product_store;

pub use product_store::PgProductStore;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::errors::Result;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id UUID PRIMARY KEY,
  name VARCHAR(255) NOT NULL,
  description TEXT,
  price NUMERIC(12, 2) NOT NULL CHECK (price > 0),
  currency VARCHAR(16) NOT NULL,
  url TEXT NOT NULL,
  stock BIGINT NOT NULL CHECK (stock >= 0),
  active BOOLEAN NOT NULL DEFAULT TRUE,
  created_by VARCHAR(255) NOT NULL,
  created_at TIMESTAMPTZ NOT NULL,
  updated_at TIMESTAMPTZ NOT NULL,
  CHECK (updated_at >= created_at)
)"#;

#[instrument(name = "db::connect", skip(config), fields(max_connections = config.db_max_connections), err(Display))]
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(&config.database_url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

/// Creates the products table when it does not exist yet.
#[instrument(name = "db::ensure_schema", skip(pool), err(Display))]
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
  sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
  info!("Products table is present.");
  Ok(())
}
