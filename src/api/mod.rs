//! Wire types for the explore-review protocol.
//!
//! - `ExploreReview`: the envelope carrying either a request or a response
//! - `ExploreRequest` / `ExploreResponse`: the domain payloads
//! - `ResponseStatus`: the `{code, message}` pair describing a failure

mod review;

pub use review::*;
