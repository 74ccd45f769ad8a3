// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::auth::RejectReason;
use crate::model::ProductId;
use crate::request::ValidationErrors;

/// Every failure the catalog core can report.
///
/// Variants are meant to be matched on. The HTTP layer maps them to status
/// codes through [`CatalogError::kind`], never by looking at message text.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Product not found: {id}")]
    NotFound { id: String },

    #[error("Authorization rejected: {0}")]
    AuthRejected(RejectReason),

    #[error("Persistence failure. Source: {source}")]
    Persistence {
        #[source]
        source: AnyhowError,
    },
}

/// Stable, machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AuthRejected,
    Persistence,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AuthRejected => "auth_rejected",
            ErrorKind::Persistence => "persistence_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::AuthRejected(_) => ErrorKind::AuthRejected,
            CatalogError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    pub fn not_found(id: &ProductId) -> Self {
        CatalogError::NotFound { id: id.to_string() }
    }

    /// Wraps an infrastructure error (driver, pool, I/O) as a persistence failure.
    pub fn persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CatalogError::Persistence {
            source: AnyhowError::new(err),
        }
    }

    pub fn persistence_msg(message: impl Into<String>) -> Self {
        CatalogError::Persistence {
            source: AnyhowError::msg(message.into()),
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
