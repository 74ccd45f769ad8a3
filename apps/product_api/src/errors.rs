// apps/product_api/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use product_catalog::{CatalogError, ErrorKind};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  /// Request body could not be read as JSON of the expected shape.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// The machine-readable kind sent to callers.
  pub fn kind(&self) -> &'static str {
    match self {
      AppError::Catalog(e) => e.kind().as_str(),
      AppError::BadRequest(_) => "bad_request",
      AppError::Sqlx(_) => ErrorKind::Persistence.as_str(),
      AppError::Config(_) | AppError::Internal(_) => "internal",
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Catalog(e) => match e.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AuthRejected => StatusCode::UNAUTHORIZED,
        ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let kind = self.kind();
    let body = match self {
      AppError::Catalog(CatalogError::Validation(errors)) => {
        tracing::warn!(error_kind = kind, %errors, "Responding with validation error");
        json!({"error": {"kind": kind, "message": "Request validation failed", "details": errors}})
      }
      AppError::Catalog(CatalogError::NotFound { .. }) | AppError::BadRequest(_) => {
        tracing::info!(error_kind = kind, application_error = %self, "Responding with client error");
        json!({"error": {"kind": kind, "message": self.to_string()}})
      }
      AppError::Catalog(CatalogError::AuthRejected(reason)) => {
        tracing::warn!(error_kind = kind, %reason, "Responding with auth rejection");
        json!({"error": {"kind": kind, "message": "Unauthorized"}})
      }
      // Infrastructure detail stays in the logs.
      _ => {
        tracing::error!(error_kind = kind, application_error = %self, "Responding with error");
        json!({"error": {"kind": kind, "message": "An internal error occurred"}})
      }
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;
  use product_catalog::{RejectReason, ValidationErrors};

  async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_web::test]
  async fn maps_catalog_kinds_to_status_codes() {
    let mut errors = ValidationErrors::default();
    errors.push("price", "must be greater than 0");
    let (status, body) = body_json(CatalogError::Validation(errors).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "price");

    let (status, body) = body_json(CatalogError::NotFound { id: "abc".into() }.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");

    let (status, body) = body_json(CatalogError::AuthRejected(RejectReason::TimedOut).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["kind"], "auth_rejected");
  }

  #[actix_web::test]
  async fn persistence_detail_is_not_leaked() {
    let (status, body) = body_json(CatalogError::persistence_msg("password authentication failed for user").into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["kind"], "persistence_error");
    assert!(!body.to_string().contains("password"));
  }
}
