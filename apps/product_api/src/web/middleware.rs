// apps/product_api/src/web/middleware.rs

//! Request middleware: the auth gate in front of product routes, and CORS.

use actix_web::{
  body::{EitherBody, MessageBody},
  dev::{ServiceRequest, ServiceResponse},
  http::{
    header::{self, HeaderMap, HeaderValue},
    Method,
  },
  middleware::Next,
  web, Error, HttpResponse,
};
use product_catalog::{AuthDecision, CatalogError};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

const CORS_ALLOW_METHODS: &str = "POST, OPTIONS, GET, PUT, PATCH, DELETE";
const CORS_ALLOW_HEADERS: &str =
  "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Lets the request through only if the auth gate approves the
/// `Authorization` header. Runs before any body extraction.
pub async fn require_credential<B: MessageBody + 'static>(
  req: ServiceRequest,
  next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
  let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
    let err = AppError::Internal("Application state is not configured.".to_string());
    return Ok(req.error_response(err).map_into_right_body());
  };

  let credential = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);

  match app_state.auth_gate.validate(credential.as_deref()).await {
    AuthDecision::Approved => {
      debug!(path = %req.path(), "Request authorized.");
      Ok(next.call(req).await?.map_into_left_body())
    }
    AuthDecision::Rejected(reason) => {
      warn!(path = %req.path(), %reason, "Request rejected by auth gate.");
      let err = AppError::from(CatalogError::AuthRejected(reason));
      Ok(req.error_response(err).map_into_right_body())
    }
  }
}

fn add_cors_headers(headers: &mut HeaderMap, origin: &str) {
  if let Ok(origin) = HeaderValue::from_str(origin) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
      header::ACCESS_CONTROL_ALLOW_METHODS,
      HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
      header::ACCESS_CONTROL_ALLOW_HEADERS,
      HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
  }
}

/// Answers preflight `OPTIONS` with 204 and adds allow headers when the
/// request comes from the configured origin.
pub async fn cors<B: MessageBody + 'static>(
  req: ServiceRequest,
  next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
  let allowed = req
    .app_data::<web::Data<AppState>>()
    .and_then(|state| state.config.cors_allowed_origin.clone());
  let matched_origin = req
    .headers()
    .get(header::ORIGIN)
    .and_then(|v| v.to_str().ok())
    .filter(|origin| allowed.as_deref() == Some(*origin))
    .map(str::to_owned);

  if req.method() == Method::OPTIONS {
    let mut resp = HttpResponse::NoContent().finish();
    if let Some(origin) = &matched_origin {
      add_cors_headers(resp.headers_mut(), origin);
    }
    return Ok(req.into_response(resp).map_into_right_body());
  }

  let mut res = next.call(req).await?;
  if let Some(origin) = &matched_origin {
    add_cors_headers(res.headers_mut(), origin);
  }
  Ok(res.map_into_left_body())
}
