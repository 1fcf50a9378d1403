//! Field Decoder: total, type-directed extraction of fields from a parsed JSON value.
//!
//! None of these functions fail. A field that is absent or of the wrong kind
//! comes back with a documented default and `Provenance::Defaulted`, so one
//! malformed field never discards an otherwise usable response.

use serde_json::Value;
use tracing::debug;

/// Whether a decoded value came from the response or from a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Parsed,
    Defaulted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> DecodedField<T> {
    pub fn parsed(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Parsed,
        }
    }

    pub fn defaulted(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Defaulted,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        self.provenance == Provenance::Defaulted
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Reads `key` as an array of strings.
///
/// Non-string elements and strings that are blank after trimming are dropped;
/// kept strings are trimmed. An array whose elements all get dropped is still
/// `Parsed`. An absent key or non-array value yields an empty `Defaulted` vec.
pub fn decode_string_array(obj: &Value, key: &str) -> DecodedField<Vec<String>> {
    let Some(items) = obj.get(key).and_then(Value::as_array) else {
        debug!(key, "field missing or not an array; defaulting to []");
        return DecodedField::defaulted(Vec::new());
    };

    let values: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if values.len() < items.len() {
        debug!(
            key,
            dropped = items.len() - values.len(),
            "dropped non-string or blank array elements"
        );
    }

    DecodedField::parsed(values)
}

/// Reads `key` as a string, trimmed. Falls back to `default` when absent or not a string.
pub fn decode_string(obj: &Value, key: &str, default: &str) -> DecodedField<String> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) => DecodedField::parsed(s.trim().to_string()),
        None => {
            debug!(key, default, "field missing or not a string; using default");
            DecodedField::defaulted(default.to_string())
        }
    }
}

/// Reads `key` as an array of objects, mapping each through `item_decoder`.
///
/// Elements that are not JSON objects are dropped.
pub fn decode_object_array<U, F>(obj: &Value, key: &str, item_decoder: F) -> DecodedField<Vec<U>>
where
    F: Fn(&Value) -> U,
{
    let Some(items) = obj.get(key).and_then(Value::as_array) else {
        debug!(key, "field missing or not an array; defaulting to []");
        return DecodedField::defaulted(Vec::new());
    };

    let values: Vec<U> = items
        .iter()
        .filter(|item| item.is_object())
        .map(&item_decoder)
        .collect();

    if values.len() < items.len() {
        debug!(
            key,
            dropped = items.len() - values.len(),
            "dropped non-object array elements"
        );
    }

    DecodedField::parsed(values)
}
