//! Response envelope handling
//!
//! The metrics API wraps payloads as `{ "status": "success", "message": ..., "data": ... }`.
//! Bodies without that shape are accepted as-is when they are JSON objects or arrays.

use serde_json::Value;

use super::RemoteError;

/// Unwrap a raw response body into its payload
pub fn unwrap_body(body: &[u8]) -> Result<Value, RemoteError> {
    let parsed: Value =
        serde_json::from_slice(body).map_err(|_| RemoteError::InvalidResponseFormat)?;
    unwrap_payload(parsed)
}

/// Unwrap an already-parsed body
pub fn unwrap_payload(body: Value) -> Result<Value, RemoteError> {
    match body {
        Value::Object(mut map) => {
            let is_success = map.get("status").and_then(Value::as_str) == Some("success");
            let has_data = map.get("data").map(is_truthy).unwrap_or(false);

            if is_success && has_data {
                Ok(map.remove("data").unwrap_or(Value::Null))
            } else {
                tracing::debug!("No envelope data, returning full response object");
                Ok(Value::Object(map))
            }
        }
        Value::Array(items) => Ok(Value::Array(items)),
        other => {
            tracing::warn!("Unexpected response format: {}", other);
            Err(RemoteError::InvalidResponseFormat)
        }
    }
}

/// Loose truthiness: null, false, zero and the empty string count as absent
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_returns_data() {
        let body = json!({
            "status": "success",
            "message": "ok",
            "data": {"totalSales": 50000, "growth": 12, "topProduct": "Widget A"}
        });
        let payload = unwrap_payload(body).unwrap();
        assert_eq!(payload["totalSales"], 50000);
        assert_eq!(payload["topProduct"], "Widget A");
    }

    #[test]
    fn test_non_success_status_returns_whole_object() {
        let body = json!({"status": "error", "message": "nope", "data": {"x": 1}});
        let payload = unwrap_payload(body.clone()).unwrap();
        assert_eq!(payload, body);
    }

    #[test]
    fn test_missing_data_returns_whole_object() {
        let body = json!({"status": "success", "message": "empty"});
        let payload = unwrap_payload(body.clone()).unwrap();
        assert_eq!(payload, body);
    }

    #[test]
    fn test_falsy_data_returns_whole_object() {
        let body = json!({"status": "success", "data": null});
        assert_eq!(unwrap_payload(body.clone()).unwrap(), body);

        let body = json!({"status": "success", "data": 0});
        assert_eq!(unwrap_payload(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_empty_array_data_is_unwrapped() {
        let body = json!({"status": "success", "data": []});
        assert_eq!(unwrap_payload(body).unwrap(), json!([]));
    }

    #[test]
    fn test_scalar_body_is_invalid() {
        assert!(matches!(
            unwrap_payload(json!(42)),
            Err(RemoteError::InvalidResponseFormat)
        ));
        assert!(matches!(
            unwrap_payload(json!("text")),
            Err(RemoteError::InvalidResponseFormat)
        ));
        assert!(matches!(
            unwrap_payload(Value::Null),
            Err(RemoteError::InvalidResponseFormat)
        ));
    }

    #[test]
    fn test_non_json_body_is_invalid() {
        assert!(matches!(
            unwrap_body(b"<html>oops</html>"),
            Err(RemoteError::InvalidResponseFormat)
        ));
    }

    #[test]
    fn test_bare_array_body_passes_through() {
        let payload = unwrap_body(br#"[{"date": "2024-05-01 14:30:00"}]"#).unwrap();
        assert!(payload.is_array());
    }
}
