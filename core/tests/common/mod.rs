// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::SubsecRound;
use product_catalog::{
  CatalogError, CatalogResult, CreateProductRequest, InMemoryProductStore, Product, ProductId, ProductService,
  ProductStore,
};
use rust_decimal_macros::dec;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Fixtures ---
pub fn tofu_request() -> CreateProductRequest {
  CreateProductRequest {
    name: Some("Tofu".to_string()),
    description: None,
    price: Some(dec!(10.5)),
    currency: Some("IDR".to_string()),
    url: Some("http://x".to_string()),
    stock: Some(5),
    active: None,
  }
}

pub fn named_request(name: &str) -> CreateProductRequest {
  CreateProductRequest {
    name: Some(name.to_string()),
    ..tofu_request()
  }
}

// --- Store Double ---
/// Wraps an [`InMemoryProductStore`], counting every call and optionally
/// failing every operation with a persistence error.
#[derive(Default)]
pub struct CountingStore {
  inner: InMemoryProductStore,
  pub creates: AtomicUsize,
  pub reads: AtomicUsize,
  pub updates: AtomicUsize,
  pub deletes: AtomicUsize,
  pub fail_all: AtomicBool,
}

impl CountingStore {
  pub fn total_calls(&self) -> usize {
    self.creates.load(Ordering::SeqCst)
      + self.reads.load(Ordering::SeqCst)
      + self.updates.load(Ordering::SeqCst)
      + self.deletes.load(Ordering::SeqCst)
  }

  pub fn inner(&self) -> &InMemoryProductStore {
    &self.inner
  }

  fn check_failure(&self) -> CatalogResult<()> {
    if self.fail_all.load(Ordering::SeqCst) {
      return Err(CatalogError::persistence_msg("connection refused"));
    }
    Ok(())
  }
}

#[async_trait]
impl ProductStore for CountingStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    self.creates.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;
    self.inner.create(product).await
  }

  async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;
    self.inner.get_by_id(id).await
  }

  async fn get_all(&self) -> CatalogResult<Vec<Product>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;
    self.inner.get_all().await
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    self.updates.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;
    self.inner.update(product).await
  }

  async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    self.deletes.fetch_add(1, Ordering::SeqCst);
    self.check_failure()?;
    self.inner.delete(id).await
  }
}

/// Deletes a row right after handing it out from `get_by_id`, as if another
/// request removed it between a read and the following write.
#[derive(Default)]
pub struct VanishingStore {
  inner: InMemoryProductStore,
}

impl VanishingStore {
  pub fn inner(&self) -> &InMemoryProductStore {
    &self.inner
  }
}

#[async_trait]
impl ProductStore for VanishingStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.create(product).await
  }

  async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
    let found = self.inner.get_by_id(id).await?;
    if found.is_some() {
      self.inner.delete(id).await?;
    }
    Ok(found)
  }

  async fn get_all(&self) -> CatalogResult<Vec<Product>> {
    self.inner.get_all().await
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.update(product).await
  }

  async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    self.inner.delete(id).await
  }
}

/// Stores timestamps at microsecond precision and prices at two decimal
/// places, the way the `products` table does.
#[derive(Default)]
pub struct CoarseStore {
  inner: InMemoryProductStore,
}

impl CoarseStore {
  fn coarsen(product: &Product) -> Product {
    let mut stored = product.clone();
    stored.price = stored.price.round_dp(2);
    stored.created_at = stored.created_at.trunc_subsecs(6);
    stored.updated_at = stored.updated_at.trunc_subsecs(6);
    stored
  }
}

#[async_trait]
impl ProductStore for CoarseStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.create(&Self::coarsen(product)).await
  }

  async fn get_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
    self.inner.get_by_id(id).await
  }

  async fn get_all(&self) -> CatalogResult<Vec<Product>> {
    self.inner.get_all().await
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.update(&Self::coarsen(product)).await
  }

  async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
    self.inner.delete(id).await
  }
}

pub fn service_with_counting_store() -> (ProductService, Arc<CountingStore>) {
  let store = Arc::new(CountingStore::default());
  let service = ProductService::new(store.clone(), "system");
  (service, store)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
