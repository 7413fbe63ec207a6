//! Standardized API error body.

use serde::{Deserialize, Serialize};

/// Body of every non-2xx response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_single_error_key() {
        let json = serde_json::to_string(&ErrorResponse::new("Post not found")).unwrap();
        assert_eq!(json, r#"{"error":"Post not found"}"#);
    }
}
