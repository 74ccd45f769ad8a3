// apps/product_api/src/models/product.rs

use chrono::{DateTime, Utc};
use product_catalog::{Product, ProductId};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>, // nullable column, read back as ""
  pub price: Decimal,
  pub currency: String,
  pub url: String,
  pub stock: i64,
  pub active: bool,
  pub created_by: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: ProductId::from_uuid(row.id),
      name: row.name,
      description: row.description.unwrap_or_default(),
      price: row.price,
      currency: row.currency,
      url: row.url,
      stock: row.stock,
      active: row.active,
      created_by: row.created_by,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}
