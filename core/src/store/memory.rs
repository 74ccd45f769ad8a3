// core/src/store/memory.rs
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

use super::ProductStore;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductId};

/// A [`ProductStore`] kept in process memory.
///
/// Lock guards are never held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
  rows: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.rows.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.read().is_empty()
  }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    let mut rows = self.rows.write();
    if rows.contains_key(&product.id) {
      return Err(CatalogError::persistence_msg(format!(
        "duplicate key value violates unique constraint on products.id ({})",
        product.id
      )));
    }
    rows.insert(product.id, product.clone());
    debug!(product_id = %product.id, "in-memory insert");
    Ok(product.clone())
  }

  async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
    Ok(self.rows.read().get(id).cloned())
  }

  async fn get_all(&self) -> CatalogResult<Vec<Product>> {
    Ok(self.rows.read().values().cloned().collect())
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    match self.rows.write().get_mut(&product.id) {
      Some(row) => {
        *row = product.clone();
        Ok(row.clone())
      }
      None => Err(CatalogError::not_found(&product.id)),
    }
  }

  async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    match self.rows.write().remove(id) {
      Some(_) => Ok(()),
      None => Err(CatalogError::not_found(id)),
    }
  }
}
