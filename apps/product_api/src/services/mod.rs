// apps/product_api/src/services/mod.rs

//! Adapters to external systems used by the request path.

pub mod auth_service;

pub use auth_service::HttpAuthGate;
