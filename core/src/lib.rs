// src/lib.rs

//! Domain core of the product service.
//!
//! A request flows through three pieces:
//!  - an [`AuthGate`] that must approve the caller credential first,
//!  - the validator/mapper in [`request`], which turns untrusted input into a
//!    complete [`Product`] (create) or a [`ProductPatch`] (update),
//!  - a [`ProductStore`], the only owner of persisted rows.
//!
//! [`ProductService`] strings the last two together. Store and gate are
//! capability traits so the backing database and the auth authority can be
//! swapped, e.g. for [`InMemoryProductStore`] and [`StaticAuthGate`] in tests.

pub mod auth;
pub mod error;
pub mod model;
pub mod request;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::auth::{AuthDecision, AuthGate, RejectReason, StaticAuthGate};
pub use crate::error::{CatalogError, CatalogResult, ErrorKind};
pub use crate::model::{Product, ProductId, ProductResponse};
pub use crate::request::{
    CreateProductRequest, FieldViolation, ProductPatch, UpdateProductRequest, ValidCreate, ValidationErrors,
};
pub use crate::service::ProductService;
pub use crate::store::{InMemoryProductStore, ProductStore};
