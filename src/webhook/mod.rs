//! Explore-review webhook handler.
//!
//! The handler is the synchronous request/response boundary between the
//! control plane and an external explorer plugin: decode the inbound
//! review, dispatch to the explorer, encode the outcome. Each request is
//! processed independently on its own task; the webhook itself holds no
//! mutable state after construction.

pub mod http;
mod server;

pub use server::{
    EXPLORER_CERT_PATH, EXPLORER_KEY_PATH, EXPLORER_PORT, ServerError, create_explorer_router,
    run_explorer_server,
};

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ExploreRequest, ExploreResponse};

/// The decision function supplied by the embedding system.
///
/// Invoked at most once per inbound call, after a successful decode. The
/// handler passes whatever response it returns through unchanged, including
/// unsuccessful ones; explorer panics are not caught here. Cancellation of
/// the inbound call propagates by dropping the in-flight future.
#[async_trait]
pub trait Explorer: Send + Sync {
    async fn explore(&self, request: ExploreRequest) -> ExploreResponse;
}

/// One webhook endpoint bound to an explorer.
///
/// Read-only after construction and shared across concurrent requests via
/// `Arc`, so unsynchronized reads are safe.
#[derive(Clone)]
pub struct Webhook {
    explorer: Arc<dyn Explorer>,
}

impl Webhook {
    pub fn new(explorer: Arc<dyn Explorer>) -> Self {
        Self { explorer }
    }

    /// Dispatch a decoded request to the explorer.
    pub(crate) async fn handle(&self, request: ExploreRequest) -> ExploreResponse {
        self.explorer.explore(request).await
    }
}

/// Failures of the handler core itself, classified by the HTTP-equivalent
/// code carried in the error response. Explorer-level denials are not
/// errors here: they travel as ordinary responses.
#[derive(Debug, Error)]
pub enum Error {
    /// No body bytes arrived with the request
    #[error("request body is empty")]
    EmptyBody,

    /// Reading the body stream failed mid-transfer
    #[error("unable to read the request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// Declared content type is not exactly `application/json`
    #[error("contentType={0}, expected application/json")]
    InvalidContentType(String),

    /// Body bytes did not decode as a review envelope
    #[error("unable to decode the request: {0}")]
    Decode(#[source] serde_json::Error),

    /// Envelope decoded but carried no request payload
    #[error("review has no request")]
    MissingRequest,

    /// The outgoing response failed to serialize
    #[error("unable to encode the response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// HTTP-equivalent classification for the response status. Everything
    /// at the decode layer is a client error; only encode failures are
    /// server-side.
    pub fn code(&self) -> i32 {
        match self {
            Error::Encode(_) => 500,
            Error::EmptyBody
            | Error::BodyRead(_)
            | Error::InvalidContentType(_)
            | Error::Decode(_)
            | Error::MissingRequest => 400,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ExploreResponse;

    #[test]
    fn test_decode_layer_errors_are_client_errors() {
        assert_eq!(Error::EmptyBody.code(), 400);
        assert_eq!(Error::InvalidContentType("text/plain".to_string()).code(), 400);
        assert_eq!(Error::MissingRequest.code(), 400);

        let decode = serde_json::from_str::<crate::api::ExploreReview>("not json").unwrap_err();
        assert_eq!(Error::Decode(decode).code(), 400);
    }

    #[test]
    fn test_encode_errors_are_server_errors() {
        let inner = serde_json::from_str::<String>("{").unwrap_err();
        assert_eq!(Error::Encode(inner).code(), 500);
    }

    #[test]
    fn test_errored_mapping_is_uniform() {
        let err = Error::InvalidContentType("text/plain".to_string());
        let response = ExploreResponse::errored(err.code(), &err);

        assert!(!response.successful);
        assert!(response.uid.is_empty());
        let status = response.status.unwrap();
        assert_eq!(status.code, 400);
        assert_eq!(status.message, "contentType=text/plain, expected application/json");
    }
}
