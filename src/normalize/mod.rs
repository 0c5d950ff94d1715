//! Document normalization - flatten JSON:API documents into entity stores
//!
//! This module turns a nested response document (`data`, `included`,
//! `relationships`, `attributes`, `links`, `meta`) into a flat store
//! partitioned by resource type and id, with relationships reduced to ordered
//! lists of foreign ids. Request-level metadata can be bucketed under the
//! endpoint the document came from.
//!
//! The three branches of a document are extracted independently and
//! reconciled with [`deep_merge`], which is also the contract callers rely on
//! to fold successive stores into a long-lived cache.

pub mod casing;
pub mod extractor;
pub mod merge;
pub mod meta;
pub mod types;

pub use casing::camelize;
pub use extractor::{extract_entities, extract_relationships};
pub use merge::deep_merge;
pub use meta::{extract_metadata, strip_query};
pub use types::{NormalizeOptions, Store};

use crate::error::Result;
use serde_json::Value;

/// Normalize a JSON:API document into a flat, type-partitioned store.
///
/// Entities from `data` are extracted first, entities from `included` are
/// deep-merged over them, and when an endpoint is configured its metadata
/// bucket is merged in last. The input document is never mutated.
pub fn normalize(document: &Value, options: &NormalizeOptions) -> Result<Store> {
    let mut store = Store::new();

    if let Some(data) = document.get("data").filter(|value| !value.is_null()) {
        deep_merge(&mut store, extract_entities(data, options)?);
    }

    if let Some(included) = document.get("included").filter(|value| !value.is_null()) {
        deep_merge(&mut store, extract_entities(included, options)?);
    }

    if let Some(endpoint) = options.endpoint.as_deref() {
        let endpoint_key = if options.filter_endpoint {
            strip_query(endpoint)
        } else {
            endpoint.to_string()
        };
        deep_merge(&mut store, extract_metadata(document, &endpoint_key, options)?);
    }

    Ok(store)
}
