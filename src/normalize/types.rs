use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The flattened output of a normalization call.
///
/// Partitioned by resource type, then by stringified id:
/// `type -> (id -> record)`. When an endpoint was supplied, a sibling `meta`
/// key holds the per-endpoint metadata bucket.
pub type Store = Map<String, Value>;

/// Configuration for a normalization call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Endpoint path used to bucket request-level metadata; no metadata is
    /// collected when unset
    pub endpoint: Option<String>,

    /// Strip the query string from the endpoint before using it as the
    /// bucket key
    pub filter_endpoint: bool,

    /// Camel-case resource type names, attribute keys, and relationship
    /// names; ids, link values, and meta values are never recased
    pub camelize_keys: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            endpoint: None,
            filter_endpoint: true,
            camelize_keys: true,
        }
    }
}

impl NormalizeOptions {
    /// Default options with an endpoint to bucket metadata under
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        NormalizeOptions {
            endpoint: Some(endpoint.into()),
            ..Default::default()
        }
    }
}
