//! Entity codec.
//!
//! Decoding is generic over the target shape: callers name the type and
//! serde builds a fresh instance from the payload. Unknown JSON fields are
//! ignored. Known fields missing from the payload take their `Default` as
//! long as the target type is annotated `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;

/// Decode a raw JSON payload into `T`.
pub fn decode<T: DeserializeOwned>(raw: impl AsRef<[u8]>) -> Result<T, CoreError> {
    serde_json::from_slice(raw.as_ref()).map_err(|e| CoreError::Decode(e.to_string()))
}

/// Decode an already-parsed JSON value into `T`.
pub fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::Decode(e.to_string()))
}

/// Decode a raw JSON payload that must be an object.
pub fn decode_object(
    raw: impl AsRef<[u8]>,
) -> Result<serde_json::Map<String, serde_json::Value>, CoreError> {
    match decode::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(CoreError::Decode(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Encode `value` for storage on the ledger.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(value).map_err(|e| CoreError::Decode(e.to_string()))
}

/// Encode `value` as a JSON object, for field-level merging.
pub fn encode_object<T: Serialize>(
    value: &T,
) -> Result<serde_json::Map<String, serde_json::Value>, CoreError> {
    match serde_json::to_value(value).map_err(|e| CoreError::Decode(e.to_string()))? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(CoreError::Decode(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
