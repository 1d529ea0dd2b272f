//! HTTP surface of the explore-review handler.
//!
//! Control flow per request is strictly sequential: decode, dispatch,
//! encode. The transport status line is always 200; the real outcome
//! travels in the response payload's `successful`/`status` fields. Decode
//! failures never reach the explorer.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response as HttpResponse};
use tracing::{debug, error, trace};

use crate::api::{ExploreRequest, ExploreResponse, ExploreReview};
use crate::webhook::{Error, Webhook};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Written when even the fallback error response fails to encode. Must stay
/// a valid response-direction envelope.
const RAW_FALLBACK_BODY: &str = r#"{"response":{"uid":"","successful":false,"status":{"code":500,"message":"unable to encode the response"}}}"#;

/// Axum handler for one explore-review endpoint.
///
/// Never fails: every outcome, including a malformed request, is written
/// as a well-formed review response.
pub async fn serve_explore(
    State(webhook): State<Arc<Webhook>>,
    headers: HeaderMap,
    body: Body,
) -> HttpResponse {
    let request = match decode_request(&headers, body).await {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "bad explore review request");
            return write_response(ExploreResponse::errored(err.code(), &err));
        }
    };
    debug!(uid = %request.uid, kind = %request.kind, "received explore request");

    let response = webhook.handle(request).await;
    write_response(response)
}

/// Transport decoder: body bytes plus declared content type in, typed
/// request out. Every failure here is a client error.
async fn decode_request(headers: &HeaderMap, body: Body) -> Result<ExploreRequest, Error> {
    // The whole body is read before any validation; the stream is consumed
    // on every exit path.
    let bytes = to_bytes(body, usize::MAX).await.map_err(Error::BodyRead)?;
    if bytes.is_empty() {
        return Err(Error::EmptyBody);
    }

    // Exact match, case-sensitive, no parameter suffixes.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if content_type != CONTENT_TYPE_JSON {
        return Err(Error::InvalidContentType(content_type.to_string()));
    }

    // Single decode pass into the envelope, then move the request out once.
    let review: ExploreReview = serde_json::from_slice(&bytes).map_err(Error::Decode)?;
    review.request.ok_or(Error::MissingRequest)
}

/// Response writer: wrap the response in an envelope (no type metadata on
/// the way out) and encode it as the HTTP 200 body. An encode failure gets
/// one fallback attempt with a 500-classified error response; if that also
/// fails, a hardcoded minimal body is written instead of recursing.
fn write_response(response: ExploreResponse) -> HttpResponse {
    match encode_response(&response) {
        Ok(body) => {
            log_written(&response);
            http_ok(body)
        }
        Err(err) => {
            error!(error = %err, "unable to encode the response");
            let err = Error::Encode(err);
            let fallback = ExploreResponse::errored(err.code(), &err);
            match encode_response(&fallback) {
                Ok(body) => {
                    log_written(&fallback);
                    http_ok(body)
                }
                Err(err) => {
                    error!(error = %err, "unable to encode the fallback response");
                    http_ok(RAW_FALLBACK_BODY.as_bytes().to_vec())
                }
            }
        }
    }
}

fn encode_response(response: &ExploreResponse) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&ExploreReview::for_response(response.clone()))
}

/// Minimal detail for the common success path, full status detail when the
/// review was unsuccessful.
fn log_written(response: &ExploreResponse) {
    if response.successful {
        trace!(
            uid = %response.uid,
            successful = response.successful,
            "wrote explore response"
        );
    } else {
        let (code, message) = response
            .status
            .as_ref()
            .map(|status| (status.code, status.message.as_str()))
            .unwrap_or_default();
        debug!(
            uid = %response.uid,
            successful = response.successful,
            code,
            message,
            "wrote explore response"
        );
    }
}

fn http_ok(body: Vec<u8>) -> HttpResponse {
    ([(header::CONTENT_TYPE, CONTENT_TYPE_JSON)], body).into_response()
}
