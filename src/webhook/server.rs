//! Explorer webhook server.
//!
//! Builds the axum router for an explore-review endpoint and runs it with
//! TLS. The webhook server expects certificates mounted at
//! /etc/webhook/certs/ (cert-manager or equivalent); routing across
//! multiple webhook paths, authentication, and client configuration belong
//! to the embedding system.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get, routing::post};
use thiserror::Error;
use tracing::info;

use crate::webhook::Webhook;
use crate::webhook::http::serve_explore;

/// Default path to webhook TLS certificate
pub const EXPLORER_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const EXPLORER_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const EXPLORER_PORT: u16 = 9443;

/// Errors that can occur when running the webhook server
#[derive(Debug, Error)]
pub enum ServerError {
    /// TLS configuration error
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// Server error
    #[error("webhook server error: {0}")]
    Serve(String),
}

/// Create the webhook router, mounting the explore handler at `path` plus
/// a `/healthz` liveness route.
pub fn create_explorer_router(path: &str, webhook: Arc<Webhook>) -> Router {
    Router::new()
        .route(path, post(serve_explore))
        .route("/healthz", get(healthz))
        .with_state(webhook)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Run the webhook server with TLS.
///
/// Binds to 0.0.0.0:9443 and serves the explore endpoint at `path`. TLS
/// certificate and key are loaded from the given PEM files.
pub async fn run_explorer_server(
    webhook: Arc<Webhook>,
    path: &str,
    cert_path: &str,
    key_path: &str,
) -> Result<(), ServerError> {
    use axum_server::tls_rustls::RustlsConfig;

    let app = create_explorer_router(path, webhook);

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| ServerError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], EXPLORER_PORT));
    info!(port = EXPLORER_PORT, path, "explorer webhook listening with TLS");

    axum_server::bind_rustls(addr, config)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    Ok(())
}
