//! Generic backend response bodies.

use serde::{Deserialize, Serialize};

/// Error body the backend sends with non-2xx statuses:
/// `{"error": "...", "details": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary, already localized by the backend.
    pub error: String,

    /// Low-level cause, for logs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Parse an error body, tolerating non-JSON and unexpected shapes.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|parsed| !parsed.error.trim().is_empty())
    }
}

/// Acknowledgement body: `{"message": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body() {
        let body = ErrorBody::parse(r#"{"error":"Invalid or already used order ID"}"#).unwrap();
        assert_eq!(body.error, "Invalid or already used order ID");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_parse_non_json_body() {
        assert!(ErrorBody::parse("<html>502</html>").is_none());
        assert!(ErrorBody::parse(r#"{"error":""}"#).is_none());
    }

    #[test]
    fn test_serialize_skips_empty_details() {
        let json = serde_json::to_string(&ErrorBody::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);

        let json = serde_json::to_string(&ErrorBody::new("boom").with_details("io")).unwrap();
        assert!(json.contains("\"details\":\"io\""));
    }
}
