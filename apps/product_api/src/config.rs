// apps/product_api/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub store_backend: StoreBackend,
  /// Create the products table at startup if it is missing.
  pub bootstrap_schema: bool,

  pub auth_service_url: String,
  pub auth_timeout: Duration,

  /// Attribution stamped on created products.
  pub product_created_by: String,

  pub cors_allowed_origin: Option<String>,
}

// database_url carries the password.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("db_max_connections", &self.db_max_connections)
      .field("store_backend", &self.store_backend)
      .field("bootstrap_schema", &self.bootstrap_schema)
      .field("auth_service_url", &self.auth_service_url)
      .field("auth_timeout", &self.auth_timeout)
      .field("product_created_by", &self.product_created_by)
      .field("cors_allowed_origin", &self.cors_allowed_origin)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    if dotenv().is_err() {
      tracing::debug!("No .env file found, using process environment only.");
    }
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds the config from an arbitrary key lookup.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "0.0.0.0");
    let server_port = lookup("APP_PORT")
      .or_else(|| lookup("SERVER_PORT"))
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid APP_PORT: {}", e)))?;

    let database_url = match lookup("DATABASE_URL") {
      Some(url) => url,
      None => format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        get_or("DB_USER", "postgres"),
        get_or("DB_PASS", "postgres"),
        get_or("DB_HOST", "localhost"),
        get_or("DB_PORT", "5432"),
        get_or("DB_NAME", "postgres"),
      ),
    };
    let db_max_connections = get_or("DB_MAX_CONNECTIONS", "10")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let store_backend = match get_or("STORE_BACKEND", "postgres").to_ascii_lowercase().as_str() {
      "postgres" => StoreBackend::Postgres,
      "memory" => StoreBackend::Memory,
      other => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };
    let bootstrap_schema = get_or("DB_BOOTSTRAP_SCHEMA", "true")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid DB_BOOTSTRAP_SCHEMA value: {}", e)))?;

    let auth_service_url = lookup("AUTH_SERVICE_URL")
      .filter(|url| !url.trim().is_empty())
      .ok_or_else(|| AppError::Config("Missing environment variable 'AUTH_SERVICE_URL'".to_string()))?;
    let auth_timeout_ms = get_or("AUTH_TIMEOUT_MS", "5000")
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid AUTH_TIMEOUT_MS: {}", e)))?;
    if auth_timeout_ms == 0 {
      return Err(AppError::Config("AUTH_TIMEOUT_MS must be greater than 0".to_string()));
    }

    let product_created_by = get_or("PRODUCT_CREATED_BY", "system");
    let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty());

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      store_backend,
      bootstrap_schema,
      auth_service_url,
      auth_timeout: Duration::from_millis(auth_timeout_ms),
      product_created_by,
      cors_allowed_origin,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
