// apps/product_api/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod models;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::errors::{AppError, Result as AppResult}; // Use the app's Result alias
use crate::services::HttpAuthGate;
use crate::state::AppState;

use actix_web::{middleware::from_fn, web as actix_data, App, HttpServer}; // Renamed web to actix_data
use product_catalog::{InMemoryProductStore, ProductService, ProductStore};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

fn init_tracing() {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  let json_output = std::env::var("LOG_FORMAT")
    .map(|v| v.eq_ignore_ascii_case("json"))
    .unwrap_or(false);
  if json_output {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn build_store(config: &AppConfig) -> AppResult<Arc<dyn ProductStore>> {
  match config.store_backend {
    StoreBackend::Postgres => {
      let pool = db::connect(config).await?;
      if config.bootstrap_schema {
        db::ensure_schema(&pool).await?;
      }
      Ok(Arc::new(db::PgProductStore::new(pool)))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory product store; data is lost on restart.");
      Ok(Arc::new(InMemoryProductStore::new()))
    }
  }
}

async fn build_state() -> AppResult<AppState> {
  let config = Arc::new(AppConfig::from_env()?);
  tracing::debug!(config = ?config, "Loaded config details");

  let store = build_store(&config).await?;
  let auth_gate = HttpAuthGate::new(config.auth_service_url.clone(), config.auth_timeout)?;

  Ok(AppState {
    products: ProductService::new(store, config.product_created_by.clone()),
    auth_gate: Arc::new(auth_gate),
    config,
  })
}

fn startup_failure(e: AppError) -> std::io::Error {
  tracing::error!(error = %e, "Application startup failed.");
  std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

// Main function
#[actix_web::main]
async fn main() -> std::io::Result<()> {
  init_tracing();
  tracing::info!("Starting product service...");

  let app_state = build_state().await.map_err(startup_failure)?;

  let server_address = app_state.config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .configure(web::configure_app_routes)
      .wrap(from_fn(web::middleware::cors))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
  })
  .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
  .bind(&server_address)?
  .run()
  .await?;

  tracing::info!("Server exiting.");
  Ok(())
}
