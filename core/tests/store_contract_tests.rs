// tests/store_contract_tests.rs
mod common;

use chrono::Utc;
use common::*;
use product_catalog::{ErrorKind, InMemoryProductStore, Product, ProductId, ProductStore};
use uuid::Uuid;

fn product_with_id(id: u128, name: &str) -> Product {
  let mut product = named_request(name).validate().unwrap().into_product("system", Utc::now());
  product.id = ProductId::from_uuid(Uuid::from_u128(id));
  product
}

#[tokio::test]
async fn test_get_by_id_miss_is_none_not_error() {
  setup_tracing();
  let store = InMemoryProductStore::new();
  let result = store.get_by_id(&ProductId::generate()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn test_get_all_orders_by_id_ascending() {
  setup_tracing();
  let store = InMemoryProductStore::new();
  assert!(store.get_all().await.unwrap().is_empty());

  for (id, name) in [(30, "Third"), (10, "First"), (20, "Second")] {
    store.create(&product_with_id(id, name)).await.unwrap();
  }
  let names: Vec<String> = store.get_all().await.unwrap().into_iter().map(|p| p.name).collect();
  assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_duplicate_id_is_a_persistence_error() {
  setup_tracing();
  let store = InMemoryProductStore::new();
  store.create(&product_with_id(1, "Original")).await.unwrap();
  let err = store.create(&product_with_id(1, "Copycat")).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Persistence);
  assert_eq!(store.get_by_id(&ProductId::from_uuid(Uuid::from_u128(1))).await.unwrap().unwrap().name, "Original");
}

#[tokio::test]
async fn test_update_and_delete_of_missing_row_are_not_found() {
  setup_tracing();
  let store = InMemoryProductStore::new();
  let ghost = product_with_id(99, "Ghost");
  assert_eq!(store.update(&ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
  assert_eq!(store.delete(&ghost.id).await.unwrap_err().kind(), ErrorKind::NotFound);
  assert!(store.is_empty());
}

#[tokio::test]
async fn test_update_replaces_whole_record() {
  setup_tracing();
  let store = InMemoryProductStore::new();
  let mut product = product_with_id(5, "Before");
  store.create(&product).await.unwrap();

  product.name = "After".to_string();
  product.stock = 0;
  product.active = false;
  let returned = store.update(&product).await.unwrap();

  let stored = store.get_by_id(&product.id).await.unwrap().unwrap();
  assert_eq!(stored, product);
  assert_eq!(returned, stored);
  assert_eq!(store.len(), 1);
}
