use serde_json::{Map, Value};

/// Recursively merge `incoming` into `target`.
///
/// Only objects merge; any other value, arrays included, replaces the target
/// value wholesale. Later writes win per leaf field, keys absent from
/// `incoming` keep their existing value.
///
/// This is the same merge the normalizer uses to reconcile the `data`,
/// `included`, and endpoint branches, exposed so callers can fold successive
/// stores into a long-lived one under the same contract.
pub fn deep_merge(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}
