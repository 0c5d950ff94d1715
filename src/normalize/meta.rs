use crate::error::{json_type_name, NormalizeError, Result};
use crate::normalize::extractor::{extract_relationships, resource_id, resource_type, wrap};
use crate::normalize::types::{NormalizeOptions, Store};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static QUERY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?.*$").unwrap());

/// Strip a trailing `?...` query suffix from an endpoint.
pub fn strip_query(endpoint: &str) -> String {
    QUERY_SUFFIX.replace(endpoint, "").into_owned()
}

/// Bucket a document's request-level metadata under its endpoint.
///
/// `endpoint` arrives already stripped of its query string when
/// `filter_endpoint` is on, and the entry sits directly under it. With
/// filtering off the full endpoint is split in two: the stripped path becomes
/// the top-level key and the `?...` suffix (empty when there was no query)
/// becomes a second-level key holding the entry, with the document's `links`
/// repeated on the top-level bucket.
pub fn extract_metadata(
    document: &Value,
    endpoint: &str,
    options: &NormalizeOptions,
) -> Result<Store> {
    let mut entry = Map::new();
    let mut endpoint_links = None;

    match document.get("data").filter(|value| !value.is_null()) {
        Some(data) => {
            let refs = wrap(data)
                .iter()
                .map(|resource| resource_ref(resource, options))
                .collect::<Result<Vec<Value>>>()?;
            entry.insert("data".to_string(), Value::Array(refs));

            if let Some(links) = document.get("links").filter(|value| !value.is_null()) {
                entry.insert("links".to_string(), links.clone());
                endpoint_links = Some(links.clone());
            }

            if let Some(meta) = document.get("meta").filter(|value| !value.is_null()) {
                entry.insert("meta".to_string(), meta.clone());
            }
        }
        None => {
            entry.insert("data".to_string(), Value::Array(Vec::new()));
        }
    }

    let mut buckets = Map::new();

    if options.filter_endpoint {
        buckets.insert(endpoint.to_string(), Value::Object(entry));
    } else {
        let filtered = strip_query(endpoint);
        let suffix = endpoint[filtered.len()..].to_string();

        let mut per_endpoint = Map::new();
        per_endpoint.insert(suffix, Value::Object(entry));
        if let Some(links) = endpoint_links {
            per_endpoint.insert("links".to_string(), links);
        }
        buckets.insert(filtered, Value::Object(per_endpoint));
    }

    let mut store = Store::new();
    store.insert("meta".to_string(), Value::Object(buckets));
    Ok(store)
}

/// A primary-data reference: `{ id, type, relationships }`.
fn resource_ref(resource: &Value, options: &NormalizeOptions) -> Result<Value> {
    let obj = resource.as_object().ok_or(NormalizeError::NotAnObject {
        found: json_type_name(resource),
    })?;

    let mut entry = Map::new();
    entry.insert("id".to_string(), resource_id(obj)?);
    entry.insert(
        "type".to_string(),
        Value::String(resource_type(obj, options)?),
    );

    let relationships = match obj.get("relationships").and_then(Value::as_object) {
        Some(relationships) => extract_relationships(relationships, options)?,
        None => Map::new(),
    };
    entry.insert("relationships".to_string(), Value::Object(relationships));

    Ok(Value::Object(entry))
}
