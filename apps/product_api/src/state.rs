// apps/product_api/src/state.rs
use crate::config::AppConfig;
use product_catalog::{AuthGate, ProductService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub products: ProductService,
  pub auth_gate: Arc<dyn AuthGate>,
  pub config: Arc<AppConfig>, // Share loaded config
}
