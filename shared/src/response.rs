//! API Response types
//!
//! Envelope used by every endpoint of the administration API.

use serde::{Deserialize, Serialize};

/// Standard API response code
pub const API_CODE_SUCCESS: &str = "E0000";

/// Unified API response structure
///
/// ```json
/// {
///     "code": "E0000",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }
}

/// Row count returned by the `count` endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parsing() {
        let ok: ApiResponse<CountResponse> =
            serde_json::from_str(r#"{"code":"E0000","message":"Success","data":{"total":4}}"#)
                .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.data, Some(CountResponse { total: 4 }));

        let err: ApiResponse<CountResponse> =
            serde_json::from_str(r#"{"code":"E4004","message":"Not found"}"#).unwrap();
        assert!(!err.is_success());
        assert!(err.data.is_none());
    }
}
