// apps/product_api/src/db/product_store.rs

use async_trait::async_trait;
use product_catalog::{CatalogError, CatalogResult, Product, ProductId, ProductStore};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use crate::models::ProductRow;

const PRODUCT_COLUMNS: &str =
  "id, name, description, price, currency, url, stock, active, created_by, created_at, updated_at";

/// [`ProductStore`] over the `products` table. Every operation is a single
/// parameterized statement.
#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn db_failure(operation: &'static str, e: sqlx::Error) -> CatalogError {
  error!(operation, error = %e, "Database operation failed.");
  CatalogError::persistence(e)
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "pg_store::create", skip(self, product), fields(product_id = %product.id))]
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    let sql = format!(
      "INSERT INTO products ({PRODUCT_COLUMNS}) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
       RETURNING {PRODUCT_COLUMNS}"
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(product.id.as_uuid())
      .bind(&product.name)
      .bind(&product.description)
      .bind(product.price)
      .bind(&product.currency)
      .bind(&product.url)
      .bind(product.stock)
      .bind(product.active)
      .bind(&product.created_by)
      .bind(product.created_at)
      .bind(product.updated_at)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| db_failure("create", e))?;
    Ok(row.into())
  }

  #[instrument(name = "pg_store::get_by_id", skip(self), fields(product_id = %id))]
  async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| db_failure("get_by_id", e))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg_store::get_all", skip(self))]
  async fn get_all(&self) -> CatalogResult<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC");
    let rows: Vec<ProductRow> = sqlx::query_as(&sql)
      .fetch_all(&self.pool)
      .await
      .map_err(|e| db_failure("get_all", e))?;
    debug!(count = rows.len(), "Fetched products.");
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "pg_store::update", skip(self, product), fields(product_id = %product.id))]
  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    let sql = format!(
      "UPDATE products \
       SET name = $1, description = $2, price = $3, currency = $4, url = $5, stock = $6, active = $7, \
           updated_at = $8 \
       WHERE id = $9 \
       RETURNING {PRODUCT_COLUMNS}"
    );
    // No returned row means no row matched the id.
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(&product.name)
      .bind(&product.description)
      .bind(product.price)
      .bind(&product.currency)
      .bind(&product.url)
      .bind(product.stock)
      .bind(product.active)
      .bind(product.updated_at)
      .bind(product.id.as_uuid())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| db_failure("update", e))?;

    row.map(Product::from).ok_or_else(|| CatalogError::not_found(&product.id))
  }

  #[instrument(name = "pg_store::delete", skip(self), fields(product_id = %id))]
  async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id.as_uuid())
      .execute(&self.pool)
      .await
      .map_err(|e| db_failure("delete", e))?;

    if result.rows_affected() == 0 {
      return Err(CatalogError::not_found(id));
    }
    Ok(())
  }
}
