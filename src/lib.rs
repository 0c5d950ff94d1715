//! # jsonapi-normalizer - JSON:API Document Flattening
//!
//! A library for normalizing nested JSON:API response documents into flat,
//! type-partitioned entity stores suitable for client-side caching.
//!
//! Every resource in a document's `data` and `included` sections becomes a
//! record indexed by `(type, id)`, with its relationships reduced to ordered
//! lists of foreign ids. When an endpoint is supplied, request-level metadata
//! (primary-data references, pagination `links`, top-level `meta`) is
//! bucketed under that endpoint alongside the entities.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_normalizer::{normalize, NormalizeOptions};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "data": [{
//!         "type": "post",
//!         "id": 3,
//!         "attributes": {"text": "hello"},
//!         "relationships": {
//!             "comment-blocks": {"data": [{"type": "comment", "id": 7}]}
//!         }
//!     }]
//! });
//!
//! let store = normalize(&document, &NormalizeOptions::default())?;
//!
//! assert_eq!(store["post"]["3"]["attributes"]["text"], "hello");
//! assert_eq!(store["post"]["3"]["relationships"]["commentBlocks"][0], 7);
//! # Ok(())
//! # }
//! ```
//!
//! ## Endpoint Metadata
//!
//! ```rust
//! use jsonapi_normalizer::{normalize, NormalizeOptions};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "data": [{"type": "post", "id": 3, "attributes": {"text": "hello"}}],
//!     "links": {"next": "posts/me?page[cursor]=2"}
//! });
//!
//! // The query string is folded out of the bucket key by default.
//! let options = NormalizeOptions::with_endpoint("posts/me?page[cursor]=1");
//! let store = normalize(&document, &options)?;
//!
//! assert_eq!(store["meta"]["posts/me"]["data"][0]["id"], 3);
//! assert_eq!(store["meta"]["posts/me"]["links"], document["links"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod normalize;

// Re-export commonly used types for convenience
pub use error::{NormalizeError, Result};
pub use normalize::{
    camelize, deep_merge, extract_entities, extract_metadata, extract_relationships, normalize,
    strip_query, NormalizeOptions, Store,
};
