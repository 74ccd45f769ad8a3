// apps/product_api/src/services/auth_service.rs

//! Credential validation against the remote auth authority.

use async_trait::async_trait;
use product_catalog::auth::usable_credential;
use product_catalog::{AuthDecision, AuthGate, RejectReason};
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::errors::AppError;

/// [`AuthGate`] that asks a remote authority over HTTP.
///
/// The caller's `Authorization` value is forwarded unchanged in a
/// `POST <auth_url>` with an empty JSON object as body. Only a 200 answer
/// approves. Transport errors, timeouts and any other status reject. There
/// are no retries.
#[derive(Debug, Clone)]
pub struct HttpAuthGate {
  http: Client,
  auth_url: String,
}

impl HttpAuthGate {
  pub fn new(auth_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
    let http = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::Internal(format!("Failed to create auth HTTP client: {}", e)))?;
    Ok(Self {
      http,
      auth_url: auth_url.into(),
    })
  }
}

#[async_trait]
impl AuthGate for HttpAuthGate {
  #[instrument(name = "auth_service::validate", skip(self, credential), fields(auth_url = %self.auth_url))]
  async fn validate(&self, credential: Option<&str>) -> AuthDecision {
    let Some(credential) = usable_credential(credential) else {
      debug!("No credential presented; rejecting without contacting the authority.");
      return AuthDecision::Rejected(RejectReason::MissingCredential);
    };

    let response = self
      .http
      .post(&self.auth_url)
      .header(header::AUTHORIZATION, credential)
      .header(header::CONTENT_TYPE, "application/json")
      .body("{}")
      .send()
      .await;

    match response {
      Ok(resp) if resp.status() == StatusCode::OK => {
        debug!("Credential approved by authority.");
        AuthDecision::Approved
      }
      Ok(resp) => {
        let status = resp.status().as_u16();
        warn!(status, "Credential denied by authority.");
        AuthDecision::Rejected(RejectReason::Denied { status })
      }
      Err(e) if e.is_timeout() => {
        warn!("Auth authority timed out.");
        AuthDecision::Rejected(RejectReason::TimedOut)
      }
      Err(e) => {
        warn!(error = %e, "Auth authority unreachable.");
        AuthDecision::Rejected(RejectReason::Unreachable(e.to_string()))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  /// Local stand-in for the authority. `Bearer good` gets 200, `Bearer slow`
  /// answers after two seconds, anything else gets 401.
  async fn start_authority() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_for_server = hits.clone();
    let server = HttpServer::new(move || {
      let hits = hits_for_server.clone();
      App::new().route(
        "/validate",
        web::post().to(move |req: HttpRequest, body: String| {
          let hits = hits.clone();
          async move {
            hits.fetch_add(1, Ordering::SeqCst);
            assert_eq!(body, "{}");
            let auth = req
              .headers()
              .get("Authorization")
              .and_then(|v| v.to_str().ok())
              .unwrap_or_default()
              .to_string();
            match auth.as_str() {
              "Bearer good" => HttpResponse::Ok().finish(),
              "Bearer slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                HttpResponse::Ok().finish()
              }
              "Bearer teapot" => HttpResponse::ImATeapot().finish(),
              _ => HttpResponse::Unauthorized().finish(),
            }
          }
        }),
      )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{}/validate", addr), hits)
  }

  #[actix_web::test]
  async fn approves_only_on_200() {
    let (url, hits) = start_authority().await;
    let gate = HttpAuthGate::new(url, Duration::from_secs(1)).unwrap();

    assert_eq!(gate.validate(Some("Bearer good")).await, AuthDecision::Approved);
    assert_eq!(
      gate.validate(Some("Bearer nope")).await,
      AuthDecision::Rejected(RejectReason::Denied { status: 401 })
    );
    assert_eq!(
      gate.validate(Some("Bearer teapot")).await,
      AuthDecision::Rejected(RejectReason::Denied { status: 418 })
    );
    assert_eq!(hits.load(Ordering::SeqCst), 3);
  }

  #[actix_web::test]
  async fn missing_credential_skips_the_authority() {
    let (url, hits) = start_authority().await;
    let gate = HttpAuthGate::new(url, Duration::from_secs(1)).unwrap();

    assert_eq!(
      gate.validate(None).await,
      AuthDecision::Rejected(RejectReason::MissingCredential)
    );
    assert_eq!(
      gate.validate(Some("")).await,
      AuthDecision::Rejected(RejectReason::MissingCredential)
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
  }

  #[actix_web::test]
  async fn timeout_is_rejection() {
    let (url, _hits) = start_authority().await;
    let gate = HttpAuthGate::new(url, Duration::from_millis(200)).unwrap();
    assert_eq!(
      gate.validate(Some("Bearer slow")).await,
      AuthDecision::Rejected(RejectReason::TimedOut)
    );
  }

  #[actix_web::test]
  async fn unreachable_authority_is_rejection() {
    // Nothing listens on port 9 (discard) on a test machine.
    let gate = HttpAuthGate::new("http://127.0.0.1:9/validate", Duration::from_secs(1)).unwrap();
    let decision = gate.validate(Some("Bearer good")).await;
    assert!(!decision.is_approved());
  }
}
