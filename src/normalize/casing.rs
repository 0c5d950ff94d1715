use crate::normalize::types::NormalizeOptions;

/// Convert a key to its camel-case form.
///
/// Word boundaries are `-`, `_`, and space; the boundary character is dropped
/// and the letter after it upper-cased. The first letter is lower-cased and
/// any other interior casing is left alone, so an already camel-cased key
/// passes through unchanged.
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_boundary = false;

    for ch in key.chars() {
        if matches!(ch, '-' | '_' | ' ') {
            at_boundary = true;
            continue;
        }

        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if at_boundary {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_boundary = false;
    }

    out
}

/// Apply [`camelize`] when the options ask for it, otherwise pass the key
/// through verbatim.
pub(crate) fn recase(key: &str, options: &NormalizeOptions) -> String {
    if options.camelize_keys {
        camelize(key)
    } else {
        key.to_string()
    }
}
