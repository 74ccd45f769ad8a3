// apps/product_api/src/web/routes.rs

use actix_web::{middleware::from_fn, web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::product_handlers;
use crate::web::middleware::require_credential;

// Liveness only; not behind the auth gate.
async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies become `bad_request` errors in the usual error shape.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    tracing::warn!(error = %err, "Rejected malformed JSON body.");
    AppError::BadRequest(err.to_string()).into()
  })
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .wrap(from_fn(require_credential))
        .app_data(json_config())
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::patch().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
    );
}
