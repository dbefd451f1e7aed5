//! API response envelope
//!
//! The backend wraps most responses in `{ success?, meta?, data }` but some
//! endpoints return the payload bare. Unwrapping lives here, in one place,
//! with explicit precedence rules instead of optional-chaining at every call
//! site:
//!
//! 1. Body is a JSON object containing a `data` key AND at least one of
//!    `success` / `meta` → the payload is `data`.
//! 2. Anything else → the whole body is the payload.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Envelope unwrap failure
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Envelope form matched but `data` was null or missing
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    /// Payload did not decode into the expected type
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Unwrap a response body to its payload.
pub fn unwrap_envelope(body: Value) -> Result<Value, EnvelopeError> {
    match body {
        Value::Object(mut map) => {
            let enveloped =
                map.contains_key("data") && (map.contains_key("success") || map.contains_key("meta"));
            if enveloped {
                match map.remove("data") {
                    Some(Value::Null) | None => {
                        Err(EnvelopeError::Malformed("missing data field".to_string()))
                    }
                    Some(data) => Ok(data),
                }
            } else {
                Ok(Value::Object(map))
            }
        }
        other => Ok(other),
    }
}

/// Unwrap and decode a response body in one step.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, EnvelopeError> {
    let payload = unwrap_envelope(body)?;
    Ok(serde_json::from_value(payload)?)
}

/// Unwrap and decode a list payload. A null or non-array payload decodes to
/// an empty list rather than an error; some endpoints omit the array entirely
/// when there is nothing to return.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, EnvelopeError> {
    match unwrap_envelope(body) {
        Ok(Value::Array(items)) => Ok(items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?),
        Ok(_) | Err(EnvelopeError::Malformed(_)) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Pull a human-readable message out of an error body, if the server sent one.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_success_envelope() {
        let body = json!({ "success": true, "data": { "x": 1 } });
        assert_eq!(unwrap_envelope(body).unwrap(), json!({ "x": 1 }));
    }

    #[test]
    fn test_unwraps_meta_envelope() {
        let body = json!({ "meta": { "total": 4 }, "data": [1, 2] });
        assert_eq!(unwrap_envelope(body).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_bare_object_passes_through() {
        // `data` key alone is not an envelope
        let body = json!({ "data": "blob", "name": "x" });
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_bare_array_passes_through() {
        let body = json!([{ "id": "a" }]);
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_null_data_is_malformed() {
        let body = json!({ "success": true, "data": null });
        assert!(matches!(
            unwrap_envelope(body),
            Err(EnvelopeError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_typed() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct P {
            total: u64,
        }
        let body = json!({ "success": true, "data": { "total": 7 } });
        assert_eq!(decode::<P>(body).unwrap(), P { total: 7 });
    }

    #[test]
    fn test_decode_list_tolerates_null_and_non_array() {
        assert!(decode_list::<Value>(json!(null)).unwrap().is_empty());
        assert!(decode_list::<Value>(json!({ "success": true, "data": null }))
            .unwrap()
            .is_empty());
        assert!(decode_list::<Value>(json!({ "success": true, "data": {} }))
            .unwrap()
            .is_empty());
        let items = decode_list::<u64>(json!({ "success": true, "data": [1, 2, 3] })).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_error_message_extraction() {
        let body = json!({ "success": false, "message": "Category not found" });
        assert_eq!(error_message(&body).as_deref(), Some("Category not found"));
        assert_eq!(error_message(&json!({ "success": false })), None);
    }
}
