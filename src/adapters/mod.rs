// Adapters layer: concrete KeyValueStore backends.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::utils::error::{Result, StoreError};
use serde_json::Value;

pub(crate) fn decode_string_array(key: &str, value: &Value) -> Result<Vec<String>> {
    let mismatch = |found: &str| StoreError::TypeMismatchError {
        key: key.to_string(),
        found: found.to_string(),
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Err(mismatch("null")),
        Value::Bool(_) => return Err(mismatch("bool")),
        Value::Number(_) => return Err(mismatch("number")),
        Value::String(_) => return Err(mismatch("string")),
        Value::Object(_) => return Err(mismatch("object")),
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| mismatch("array with non-string elements"))
        })
        .collect()
}

pub(crate) fn encode_string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}
