//! explorer-webhook library crate
//!
//! The request/response boundary between an orchestration control plane and
//! an external explorer plugin: an HTTP endpoint that decodes a JSON
//! explore-review into a typed request, dispatches it to an injected
//! [`Explorer`], and encodes the outcome back into the review envelope.
//!
//! The embedding system supplies the explorer and mounts the router (or
//! uses [`run_explorer_server`] for a TLS listener):
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use explorer_webhook::{
//!     ExploreRequest, ExploreResponse, Explorer, Webhook, create_explorer_router,
//! };
//!
//! struct AllowEverything;
//!
//! #[async_trait]
//! impl Explorer for AllowEverything {
//!     async fn explore(&self, request: ExploreRequest) -> ExploreResponse {
//!         ExploreResponse::success(request.uid)
//!     }
//! }
//!
//! let webhook = Arc::new(Webhook::new(Arc::new(AllowEverything)));
//! let app = create_explorer_router("/explore", webhook);
//! # let _ = app;
//! ```

pub mod api;
pub mod webhook;

pub use api::{
    API_GROUP, API_VERSION, DependentObjectReference, ExploreRequest, ExploreResponse,
    ExploreReview, GroupVersionKind, REVIEW_KIND, ResponseStatus,
};
pub use webhook::{
    EXPLORER_CERT_PATH, EXPLORER_KEY_PATH, EXPLORER_PORT, Error, Explorer, ServerError, Webhook,
    create_explorer_router, run_explorer_server,
};
