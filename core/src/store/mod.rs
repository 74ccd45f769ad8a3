// core/src/store/mod.rs

//! The persistence capability for products.

pub mod memory;

pub use memory::InMemoryProductStore;

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::model::{Product, ProductId};

/// Sole owner of persisted product rows.
///
/// Reads report a miss as `Ok(None)`. Writes that match no row fail with
/// [`CatalogError::NotFound`](crate::CatalogError::NotFound), which is distinct
/// from [`CatalogError::Persistence`](crate::CatalogError::Persistence).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a fully built record and returns it as stored.
    async fn create(&self, product: &Product) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Every row, ordered by id ascending. Empty store gives an empty vec.
    async fn get_all(&self) -> CatalogResult<Vec<Product>>;

    /// Writes the whole record over the row with the same id and returns the
    /// row as stored.
    async fn update(&self, product: &Product) -> CatalogResult<Product>;

    async fn delete(&self, id: &ProductId) -> CatalogResult<()>;
}
