//! Best-effort extraction of a human-readable message from an error response.
//!
//! The fallback order is fixed:
//! 1. `errorMessage` field, if truthy
//! 2. `message` field, if truthy
//! 3. `"field: value"` pairs of a JSON object, minus metadata fields
//! 4. the body re-serialized as JSON
//! 5. the raw body text, when it is not JSON
//! 6. the caller's generic status-coded message

use serde_json::Value;

/// Fields the backend attaches to every error body; never shown to the user.
pub const METADATA_FIELDS: [&str; 3] = ["apiPath", "errorCode", "errorTime"];

/// Generic message for a failed read request.
pub fn read_failure_message(status: u16) -> String {
    format!("Błąd sieci: {status}")
}

/// Generic message for a failed `POST /orders`.
pub fn create_failure_message(status: u16) -> String {
    format!("Nie udało się utworzyć zamówienia - Błąd API ({status})")
}

/// Extract the message for a non-2xx response body.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => message_from_json(&value),
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => fallback.to_string(),
    }
}

fn message_from_json(value: &Value) -> String {
    if let Some(msg) = value.get("errorMessage").filter(|v| is_truthy(v)) {
        return render_value(msg);
    }
    if let Some(msg) = value.get("message").filter(|v| is_truthy(v)) {
        return render_value(msg);
    }
    if let Value::Object(fields) = value {
        let pairs: Vec<String> = fields
            .iter()
            .filter(|(field, _)| !METADATA_FIELDS.contains(&field.as_str()))
            .map(|(field, msg)| format!("{field}: {}", render_value(msg)))
            .collect();
        if !pairs.is_empty() {
            return pairs.join(", ");
        }
    }
    value.to_string()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings are shown bare; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Błąd sieci: 500";

    #[test]
    fn error_message_field_wins() {
        let body = r#"{"errorMessage":"Instrument not tradable","message":"ignored","apiPath":"/api/orders"}"#;
        assert_eq!(extract_error_message(body, FALLBACK), "Instrument not tradable");
    }

    #[test]
    fn message_field_is_second() {
        let body = r#"{"message":"Bad request","quantity":"must be positive"}"#;
        assert_eq!(extract_error_message(body, FALLBACK), "Bad request");
    }

    #[test]
    fn empty_error_message_falls_through_to_message() {
        let body = r#"{"errorMessage":"","message":"Validation failed"}"#;
        assert_eq!(extract_error_message(body, FALLBACK), "Validation failed");
    }

    #[test]
    fn field_pairs_skip_metadata_and_keep_order() {
        let body = r#"{"apiPath":"/api/orders","quantity":"must be positive","errorCode":"BAD_REQUEST","limitPrice":"must be greater than 0","errorTime":"2025-10-01T10:00:00"}"#;
        assert_eq!(
            extract_error_message(body, FALLBACK),
            "quantity: must be positive, limitPrice: must be greater than 0"
        );
    }

    #[test]
    fn non_string_field_values_render_as_json() {
        let body = r#"{"quantity":0,"flags":["a","b"]}"#;
        assert_eq!(
            extract_error_message(body, FALLBACK),
            r#"quantity: 0, flags: ["a","b"]"#
        );
    }

    #[test]
    fn metadata_only_object_falls_back_to_json_text() {
        let body = r#"{"apiPath":"/api/orders","errorCode":"INTERNAL"}"#;
        assert_eq!(
            extract_error_message(body, FALLBACK),
            r#"{"apiPath":"/api/orders","errorCode":"INTERNAL"}"#
        );
    }

    #[test]
    fn json_scalar_is_reserialized() {
        assert_eq!(extract_error_message("\"oops\"", FALLBACK), "\"oops\"");
        assert_eq!(extract_error_message("null", FALLBACK), "null");
        assert_eq!(extract_error_message("[1,2]", FALLBACK), "[1,2]");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        assert_eq!(
            extract_error_message("Service Unavailable", FALLBACK),
            "Service Unavailable"
        );
    }

    #[test]
    fn empty_body_uses_fallback() {
        assert_eq!(extract_error_message("", FALLBACK), FALLBACK);
    }

    #[test]
    fn generic_messages_carry_status() {
        assert_eq!(read_failure_message(503), "Błąd sieci: 503");
        assert!(create_failure_message(422).ends_with("(422)"));
    }
}
