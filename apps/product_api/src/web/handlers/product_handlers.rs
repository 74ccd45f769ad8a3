// apps/product_api/src/web/handlers/product_handlers.rs

use actix_web::{http::StatusCode, web, HttpResponse};
use product_catalog::{
  CatalogError, CreateProductRequest, ProductId, ProductResponse, UpdateProductRequest,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Success body: `{"responseCode": "200", "responseMessage": "success", "data": ...}`.
fn success(status: StatusCode, data: Value) -> HttpResponse {
  HttpResponse::build(status).json(json!({
      "responseCode": status.as_str(),
      "responseMessage": "success",
      "data": data
  }))
}

/// A path segment that is not a product id names no product.
fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
  raw.parse::<ProductId>().map_err(|_| {
    warn!(raw_id = raw, "Path segment is not a valid product id.");
    AppError::from(CatalogError::NotFound { id: raw.to_string() })
  })
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.products.create(payload.into_inner()).await?;
  info!(product_id = %product.id, "Product created.");

  Ok(success(StatusCode::CREATED, json!(ProductResponse::from(&product))))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list().await?;
  info!("Successfully fetched {} products.", products.len());

  let data: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
  Ok(success(StatusCode::OK, json!(data)))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  let product = app_state.products.get(&id).await?;

  Ok(success(StatusCode::OK, json!(ProductResponse::from(&product))))
}

/// Serves both PUT and PATCH: only the fields present in the body change.
#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  let product = app_state.products.update(&id, payload.into_inner()).await?;
  info!("Product {} updated.", id);

  Ok(success(StatusCode::OK, json!(ProductResponse::from(&product))))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = parse_product_id(&path)?;
  app_state.products.delete(&id).await?;
  info!("Product {} deleted.", id);

  Ok(HttpResponse::NoContent().finish())
}
