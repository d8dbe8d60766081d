use std::num::ParseIntError;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing field")]
    Missing,

    #[error("unsupported type {0}")]
    UnsupportedType(&'static str),

    #[error("invalid integer {value:?}: {source}")]
    InvalidDigits {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Decode an unsigned integer field from a contract return value.
///
/// Soroban values reach us either as JSON numbers or as decimal strings
/// (64-bit values are commonly stringified). Numbers with a fractional part
/// are truncated.
pub fn decode_u64(value: Option<&Value>) -> Result<u64, FieldError> {
    match value {
        None | Some(Value::Null) => Err(FieldError::Missing),
        Some(Value::Number(n)) => Ok(n
            .as_u64()
            .unwrap_or_else(|| n.as_f64().map(|f| f as u64).unwrap_or_default())),
        Some(Value::String(s)) => s.parse().map_err(|source| FieldError::InvalidDigits {
            value: s.clone(),
            source,
        }),
        Some(Value::Bool(_)) => Err(FieldError::UnsupportedType("bool")),
        Some(Value::Array(_)) => Err(FieldError::UnsupportedType("array")),
        Some(Value::Object(_)) => Err(FieldError::UnsupportedType("object")),
    }
}
