//! Uniform result envelope for every tool-facing operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical return shape for tool handlers and catalogue calls.
///
/// Exactly one side is populated: `ok` carries `results`, `fail` carries
/// `failure_reason`. The model receives this envelope serialized as the
/// tool output and decides itself how to communicate a failure to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ResultEnvelope {
    /// Successful result carrying a payload.
    pub fn ok(results: Value) -> Self {
        Self {
            success: true,
            results: Some(results),
            failure_reason: None,
        }
    }

    /// Failed result carrying an explanation for the model.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            failure_reason: Some(reason.into()),
        }
    }

    /// Neutral success shape. Returned for tool names the registry does not
    /// know, so a single bad tool call cannot abort the whole turn.
    pub fn empty() -> Self {
        Self::ok(Value::Object(serde_json::Map::new()))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_populates_only_results() {
        let envelope = ResultEnvelope::ok(json!([1, 2, 3]));
        assert!(envelope.success);
        assert_eq!(envelope.results, Some(json!([1, 2, 3])));
        assert!(envelope.failure_reason.is_none());
    }

    #[test]
    fn test_fail_populates_only_reason() {
        let envelope = ResultEnvelope::fail("Database error: timeout");
        assert!(!envelope.success);
        assert!(envelope.results.is_none());
        assert_eq!(
            envelope.failure_reason.as_deref(),
            Some("Database error: timeout")
        );
    }

    #[test]
    fn test_empty_is_success_shaped() {
        let envelope = ResultEnvelope::empty();
        assert!(envelope.success);
        assert_eq!(envelope.results, Some(json!({})));
    }

    #[test]
    fn test_serializes_without_absent_fields() {
        let serialized =
            serde_json::to_value(ResultEnvelope::fail("nope")).expect("envelope serializes");
        assert_eq!(
            serialized,
            json!({"success": false, "failure_reason": "nope"})
        );
    }
}
