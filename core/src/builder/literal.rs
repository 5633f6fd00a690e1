//! Literal decoding for the boolean-like flags of properties.

use serde_json::Value;

use crate::error::{HydraError, Result};

/// Decodes a boolean-like literal.
///
/// Accepts JSON booleans and `null`, the tokens `"true"`, `"false"` and
/// `"null"`, and `{"@value": ..}` objects wrapping any of those. `null`
/// decodes to `None`.
///
/// # Errors
///
/// Returns [`HydraError::InvalidLiteral`] for anything else.
pub fn decode_literal(value: &Value) -> Result<Option<bool>> {
    match value {
        Value::Bool(flag) => Ok(Some(*flag)),
        Value::Null => Ok(None),
        Value::String(token) => match token.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            "null" => Ok(None),
            _ => Err(HydraError::InvalidLiteral(token.clone())),
        },
        Value::Object(object) => match object.get("@value") {
            Some(inner) => decode_literal(inner),
            None => Err(HydraError::InvalidLiteral(value.to_string())),
        },
        other => Err(HydraError::InvalidLiteral(other.to_string())),
    }
}

/// Decodes a status code given as a JSON number or a numeric string.
pub(crate) fn decode_status_code(value: &Value) -> Result<u16> {
    let code = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u16>().ok(),
        Value::Object(object) => {
            return match object.get("@value") {
                Some(inner) => decode_status_code(inner),
                None => Err(HydraError::InvalidLiteral(value.to_string())),
            }
        }
        _ => None,
    };
    code.ok_or_else(|| HydraError::InvalidLiteral(value.to_string()))
}
