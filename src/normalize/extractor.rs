use crate::error::{json_type_name, NormalizeError, Result};
use crate::normalize::casing::recase;
use crate::normalize::merge::deep_merge;
use crate::normalize::types::{NormalizeOptions, Store};
use serde_json::{Map, Value};

/// Treat a lone resource as a one-element sequence.
pub(crate) fn wrap(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    }
}

/// Flatten a resource, or a sequence of resources, into a type-partitioned
/// store.
///
/// Resources are processed in input order. When the same `(type, id)` pair
/// shows up more than once, the later record is deep-merged over the earlier
/// one, except that `id` keeps the value it had when the record was first
/// seen.
pub fn extract_entities(data: &Value, options: &NormalizeOptions) -> Result<Store> {
    let mut store = Store::new();

    for resource in wrap(data) {
        let obj = resource.as_object().ok_or(NormalizeError::NotAnObject {
            found: json_type_name(resource),
        })?;
        let kind = resource_type(obj, options)?;
        let id = resource_id(obj)?;
        let key = id_key(&id);

        let mut record = Map::new();
        record.insert("id".to_string(), id);

        if options.camelize_keys {
            // Recased one level deep; values are copied as-is.
            let mut attributes = Map::new();
            if let Some(input) = obj.get("attributes").and_then(Value::as_object) {
                for (name, value) in input {
                    attributes.insert(recase(name, options), value.clone());
                }
            }
            record.insert("attributes".to_string(), Value::Object(attributes));
        } else if let Some(attributes) = obj.get("attributes") {
            // With recasing off the input is preserved verbatim, including
            // the absence of the key.
            record.insert("attributes".to_string(), attributes.clone());
        }

        if let Some(links) = obj.get("links").filter(|value| !value.is_null()) {
            record.insert("links".to_string(), links.clone());
        }

        let relationships = match obj.get("relationships").and_then(Value::as_object) {
            Some(relationships) => extract_relationships(relationships, options)?,
            None => Map::new(),
        };
        record.insert("relationships".to_string(), Value::Object(relationships));

        insert_record(&mut store, kind, key, record);
    }

    Ok(store)
}

/// Reduce a resource's relationship map to `name -> [related ids]`.
///
/// Every declared relationship name ends up in the output, even when its
/// `data` field is missing, `null`, or an empty list. To-many data keeps its
/// order and its duplicates; ids keep their original JSON type.
pub fn extract_relationships(
    relationships: &Map<String, Value>,
    options: &NormalizeOptions,
) -> Result<Map<String, Value>> {
    let mut reduced = Map::new();

    for (name, relationship) in relationships {
        let ids = match relationship.get("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(identifiers)) => identifiers
                .iter()
                .map(identifier_id)
                .collect::<Result<Vec<Value>>>()?,
            Some(identifier) => vec![identifier_id(identifier)?],
        };
        reduced.insert(recase(name, options), Value::Array(ids));
    }

    Ok(reduced)
}

/// Merge a freshly extracted record into its `type -> id` slot.
fn insert_record(store: &mut Store, kind: String, key: String, mut record: Map<String, Value>) {
    let bucket = store.entry(kind).or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(bucket) = bucket {
        match bucket.get_mut(&key) {
            Some(Value::Object(existing)) => {
                // Identity is fixed at first sight.
                record.remove("id");
                deep_merge(existing, record);
            }
            _ => {
                bucket.insert(key, Value::Object(record));
            }
        }
    }
}

pub(crate) fn resource_type(resource: &Map<String, Value>, options: &NormalizeOptions) -> Result<String> {
    match resource.get("type") {
        Some(Value::String(kind)) => Ok(recase(kind, options)),
        Some(other) => Err(NormalizeError::InvalidType {
            found: json_type_name(other),
        }),
        None => Err(NormalizeError::MissingType),
    }
}

pub(crate) fn resource_id(resource: &Map<String, Value>) -> Result<Value> {
    match resource.get("id") {
        Some(id @ (Value::String(_) | Value::Number(_))) => Ok(id.clone()),
        Some(other) => Err(NormalizeError::InvalidId {
            found: json_type_name(other),
        }),
        None => Err(NormalizeError::MissingId),
    }
}

/// Pull the `id` out of a resource identifier, keeping its JSON type.
fn identifier_id(identifier: &Value) -> Result<Value> {
    let obj = identifier.as_object().ok_or(NormalizeError::NotAnObject {
        found: json_type_name(identifier),
    })?;
    resource_id(obj)
}

/// Store key for an id: strings are used as-is, numbers stringified.
fn id_key(id: &Value) -> String {
    match id {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn camelized() -> NormalizeOptions {
        NormalizeOptions::default()
    }

    fn verbatim() -> NormalizeOptions {
        NormalizeOptions {
            camelize_keys: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_resource_list() {
        let data = json!([
            {
                "type": "post",
                "id": 3,
                "attributes": {"text": "hello", "number": 3},
                "links": {"self": "http://www.example.com/post/3"}
            },
            {
                "type": "post",
                "id": 4,
                "attributes": {"text": "hello world", "number": 4},
                "links": {"self": "http://www.example.com/post/4"}
            }
        ]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(
            Value::Object(store),
            json!({
                "post": {
                    "3": {
                        "id": 3,
                        "attributes": {"text": "hello", "number": 3},
                        "links": {"self": "http://www.example.com/post/3"},
                        "relationships": {}
                    },
                    "4": {
                        "id": 4,
                        "attributes": {"text": "hello world", "number": 4},
                        "links": {"self": "http://www.example.com/post/4"},
                        "relationships": {}
                    }
                }
            })
        );
    }

    #[test]
    fn test_lone_resource_wrapped() {
        let data = json!({"type": "post", "id": 3, "attributes": {"text": "hello"}});

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(
            Value::Object(store),
            json!({
                "post": {
                    "3": {"id": 3, "attributes": {"text": "hello"}, "relationships": {}}
                }
            })
        );
    }

    #[test]
    fn test_attribute_keys_camelized() {
        let data = json!([{"type": "post", "id": 1, "attributes": {"key-is-camelized": 2}}]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(
            Value::Object(store),
            json!({
                "post": {
                    "1": {"id": 1, "attributes": {"keyIsCamelized": 2}, "relationships": {}}
                }
            })
        );
    }

    #[test]
    fn test_string_id_keys_bucket_verbatim() {
        let data = json!([{"type": "user", "id": "a1b2", "attributes": {}}]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(store["user"]["a1b2"]["id"], json!("a1b2"));
    }

    #[test]
    fn test_missing_attributes_with_camelize_on_yields_empty_map() {
        let data = json!([{"type": "user", "id": 1}]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(
            Value::Object(store),
            json!({"user": {"1": {"id": 1, "attributes": {}, "relationships": {}}}})
        );
    }

    #[test]
    fn test_missing_attributes_with_camelize_off_stays_absent() {
        let data = json!([{"type": "user", "id": 1}]);

        let store = extract_entities(&data, &verbatim()).unwrap();

        assert_eq!(
            Value::Object(store),
            json!({"user": {"1": {"id": 1, "relationships": {}}}})
        );
    }

    #[test]
    fn test_same_resource_twice_deep_merges() {
        let data = json!([
            {"type": "post", "id": 1, "attributes": {"text": "hello", "number": 1}},
            {"type": "post", "id": 1, "attributes": {"number": 2}}
        ]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(
            store["post"]["1"]["attributes"],
            json!({"text": "hello", "number": 2})
        );
    }

    #[test]
    fn test_id_fixed_at_first_sight() {
        let data = json!([
            {"type": "post", "id": 1, "attributes": {}},
            {"type": "post", "id": "1", "attributes": {}}
        ]);

        let store = extract_entities(&data, &camelized()).unwrap();

        assert_eq!(store["post"]["1"]["id"], json!(1));
    }

    #[test]
    fn test_empty_to_one() {
        let rels = json!({"question": {"data": null}});

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"question": []}));
    }

    #[test]
    fn test_empty_to_many() {
        let rels = json!({"tags": {"data": []}});

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"tags": []}));
    }

    #[test]
    fn test_non_empty_to_one() {
        let rels = json!({"question": {"data": {"id": 7, "type": "question"}}});

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"question": [7]}));
    }

    #[test]
    fn test_non_empty_to_many_keeps_order_and_duplicates() {
        let rels = json!({
            "tags": {"data": [
                {"id": 4, "type": "tag"},
                {"id": 2, "type": "tag"},
                {"id": 4, "type": "tag"}
            ]}
        });

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"tags": [4, 2, 4]}));
    }

    #[test]
    fn test_absent_data_still_declares_relationship() {
        let rels = json!({"author": {"links": {"related": "/posts/1/author"}}});

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"author": []}));
    }

    #[test]
    fn test_relationship_names_camelized() {
        let rels = json!({
            "rel1-to-camelize": {"data": [{"id": 4, "type": "type1-to-camelize"}]},
            "rel2-to-camelize": {"data": []},
            "rel3-to-camelize": {"data": {"id": 4, "type": "type3-to-camelize"}},
            "rel4-to-camelize": {"data": null}
        });

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(
            Value::Object(reduced),
            json!({
                "rel1ToCamelize": [4],
                "rel2ToCamelize": [],
                "rel3ToCamelize": [4],
                "rel4ToCamelize": []
            })
        );
    }

    #[test]
    fn test_relationship_ids_keep_json_type() {
        let rels = json!({"question": {"data": {"type": "question", "id": "295"}}});

        let reduced = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap();

        assert_eq!(Value::Object(reduced), json!({"question": ["295"]}));
    }

    #[test]
    fn test_type_names_camelized() {
        let data = json!([{"type": "post-block", "id": 1, "attributes": {}}]);

        let store = extract_entities(&data, &camelized()).unwrap();
        assert!(store.contains_key("postBlock"));

        let store = extract_entities(&data, &verbatim()).unwrap();
        assert!(store.contains_key("post-block"));
    }

    #[test]
    fn test_missing_type_rejected() {
        let data = json!([{"id": 1}]);

        let err = extract_entities(&data, &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::MissingType);
    }

    #[test]
    fn test_non_string_type_rejected() {
        let data = json!([{"type": 7, "id": 1}]);

        let err = extract_entities(&data, &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::InvalidType { found: "a number" });
    }

    #[test]
    fn test_missing_id_rejected() {
        let data = json!([{"type": "post"}]);

        let err = extract_entities(&data, &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::MissingId);
    }

    #[test]
    fn test_non_scalar_id_rejected() {
        let data = json!([{"type": "post", "id": [1]}]);

        let err = extract_entities(&data, &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::InvalidId { found: "an array" });
    }

    #[test]
    fn test_non_object_resource_rejected() {
        let data = json!(["not-a-resource"]);

        let err = extract_entities(&data, &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::NotAnObject { found: "a string" });
    }

    #[test]
    fn test_identifier_without_id_rejected() {
        let rels = json!({"question": {"data": {"type": "question"}}});

        let err = extract_relationships(rels.as_object().unwrap(), &camelized()).unwrap_err();

        assert_eq!(err, NormalizeError::MissingId);
    }
}
