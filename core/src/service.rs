// core/src/service.rs

//! Product operations: validation and mapping in front of a [`ProductStore`].

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductId};
use crate::request::{CreateProductRequest, UpdateProductRequest};
use crate::store::ProductStore;

/// Runs the product operations against an injected store.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ProductService {
  store: Arc<dyn ProductStore>,
  created_by: Arc<str>,
}

impl std::fmt::Debug for ProductService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProductService")
      .field("created_by", &self.created_by)
      .finish_non_exhaustive()
  }
}

impl ProductService {
  /// `created_by` is the attribution stamped on every product this service creates.
  pub fn new(store: Arc<dyn ProductStore>, created_by: impl Into<String>) -> Self {
    ProductService {
      store,
      created_by: Arc::from(created_by.into()),
    }
  }

  /// Validates the request and inserts a new product. The store is not
  /// touched when validation fails.
  #[instrument(name = "product_service::create", skip(self, request), err(Display))]
  pub async fn create(&self, request: CreateProductRequest) -> CatalogResult<Product> {
    let valid = request.validate().map_err(|errors| {
      warn!(%errors, "Create request rejected by validation.");
      CatalogError::Validation(errors)
    })?;

    let product = valid.into_product(&self.created_by, Utc::now());
    let stored = self.store.create(&product).await?;
    info!(product_id = %stored.id, "Product created.");
    Ok(stored)
  }

  #[instrument(name = "product_service::get", skip(self), fields(product_id = %id), err(Display))]
  pub async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
    match self.store.get_by_id(id).await? {
      Some(product) => Ok(product),
      None => {
        debug!("Product not found.");
        Err(CatalogError::not_found(id))
      }
    }
  }

  #[instrument(name = "product_service::list", skip(self), err(Display))]
  pub async fn list(&self) -> CatalogResult<Vec<Product>> {
    let products = self.store.get_all().await?;
    debug!(count = products.len(), "Products listed.");
    Ok(products)
  }

  /// Read-modify-write of the present patch fields.
  ///
  /// No guard against a concurrent writer between the fetch and the write:
  /// the last writer wins. A delete that lands in between surfaces as
  /// `NotFound` from the store.
  #[instrument(name = "product_service::update", skip(self, request), fields(product_id = %id), err(Display))]
  pub async fn update(&self, id: &ProductId, request: UpdateProductRequest) -> CatalogResult<Product> {
    let patch = request.validate().map_err(|errors| {
      warn!(%errors, "Update request rejected by validation.");
      CatalogError::Validation(errors)
    })?;

    let mut product = match self.store.get_by_id(id).await? {
      Some(product) => product,
      None => return Err(CatalogError::not_found(id)),
    };

    if patch.is_empty() {
      debug!("Empty patch, only updated_at changes.");
    }
    patch.apply_to(&mut product, Utc::now());
    let stored = self.store.update(&product).await?;
    info!("Product updated.");
    Ok(stored)
  }

  #[instrument(name = "product_service::delete", skip(self), fields(product_id = %id), err(Display))]
  pub async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    self.store.delete(id).await?;
    info!("Product deleted.");
    Ok(())
  }
}
