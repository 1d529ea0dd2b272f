//! Explore-review envelope and payload definitions.
//!
//! The envelope wraps exactly one of `request` / `response` plus optional
//! type metadata. The handler treats the metadata as opaque passthrough;
//! responses are written without it, matching the protocol convention that
//! the response envelope carries no group/version/kind information.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API group served by explore-review webhooks.
pub const API_GROUP: &str = "config.explorer.dev";
/// API version served by explore-review webhooks.
pub const API_VERSION: &str = "v1alpha1";
/// Kind of the review envelope.
pub const REVIEW_KIND: &str = "ExploreReview";

/// Wire-level envelope for one explore review.
///
/// Invariant: a request envelope carries no response and vice versa. Both
/// metadata fields are omitted from output when empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreReview {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ExploreRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ExploreResponse>,
}

impl ExploreReview {
    /// Wrap a response in an envelope, without type metadata.
    pub fn for_response(response: ExploreResponse) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }
}

/// Group/version/kind descriptor of the resource under review.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GroupVersionKind {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: String,
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// The decoded domain payload of an inbound review.
///
/// Immutable once decoded; owned by the call that decoded it. `operation`
/// and `object` are opaque to the handler core and interpreted only by the
/// explorer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreRequest {
    /// Caller-supplied correlation identifier, echoed back unchanged.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub kind: GroupVersionKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub operation: String,
    /// The resource manifest under review, as arbitrary JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_replicas: Option<i32>,
}

/// The domain payload produced for one review. Constructed fresh per
/// request and consumed immediately by the response writer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreResponse {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub successful: bool,
    /// Present iff `successful` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<DependentObjectReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
}

impl ExploreResponse {
    /// A successful response correlated to `uid`.
    pub fn success(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            successful: true,
            ..Self::default()
        }
    }

    /// Map a classified error plus an HTTP-equivalent code into a
    /// well-formed error response. The uid is left empty: either no request
    /// was decoded or the uid is unknown at the failure site.
    pub fn errored(code: i32, err: &impl fmt::Display) -> Self {
        Self {
            successful: false,
            status: Some(ResponseStatus {
                code,
                message: err.to_string(),
            }),
            ..Self::default()
        }
    }
}

/// Failure outcome carried inside an otherwise successful transport
/// response. The code borrows HTTP semantics but is payload data, not the
/// transport status line.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResponseStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Reference to a resource the reviewed object depends on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependentObjectReference {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gvk_display() {
        let gvk = GroupVersionKind {
            group: "apps".to_string(),
            version: "v1".to_string(),
            kind: "Deployment".to_string(),
        };
        assert_eq!(gvk.to_string(), "apps/v1, Kind=Deployment");
    }

    #[test]
    fn test_success_response_roundtrip_has_no_status() {
        let review = ExploreReview::for_response(ExploreResponse::success("abc"));
        let bytes = serde_json::to_vec(&review).unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(!text.contains("status"));
        assert!(!text.contains("apiVersion"));

        let decoded: ExploreReview = serde_json::from_slice(&bytes).unwrap();
        let response = decoded.response.unwrap();
        assert!(response.successful);
        assert_eq!(response.uid, "abc");
        assert!(response.status.is_none());
    }

    #[test]
    fn test_error_response_roundtrip_preserves_status() {
        let review = ExploreReview::for_response(ExploreResponse::errored(403, &"denied"));
        let bytes = serde_json::to_vec(&review).unwrap();

        let decoded: ExploreReview = serde_json::from_slice(&bytes).unwrap();
        let response = decoded.response.unwrap();
        assert!(!response.successful);
        assert_eq!(
            response.status,
            Some(ResponseStatus {
                code: 403,
                message: "denied".to_string(),
            })
        );
    }

    #[test]
    fn test_request_decode_populates_uid_and_kind() {
        let body = r#"{
            "apiVersion": "config.explorer.dev/v1alpha1",
            "kind": "ExploreReview",
            "request": {
                "uid": "xyz",
                "kind": {"group": "apps", "version": "v1", "kind": "Deployment"},
                "name": "nginx",
                "namespace": "default",
                "operation": "ExploreReplica",
                "desiredReplicas": 3
            }
        }"#;

        let review: ExploreReview = serde_json::from_str(body).unwrap();
        assert_eq!(review.api_version, "config.explorer.dev/v1alpha1");
        assert_eq!(review.kind, REVIEW_KIND);

        let request = review.request.unwrap();
        assert_eq!(request.uid, "xyz");
        assert_eq!(request.kind.kind, "Deployment");
        assert_eq!(request.desired_replicas, Some(3));
        assert!(review.response.is_none());
    }

    #[test]
    fn test_unknown_request_fields_are_ignored() {
        let body = r#"{"request":{"uid":"abc","futureField":true}}"#;
        let review: ExploreReview = serde_json::from_str(body).unwrap();
        assert_eq!(review.request.unwrap().uid, "abc");
    }
}
