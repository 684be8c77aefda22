//! Response types for the WebSocket request/response pattern

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Response Result
// =============================================================================

/// Result of a request operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseResult {
    /// Operation succeeded
    Success {
        /// Optional data payload (varies by request type)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Operation failed
    Error {
        /// Error classification code
        code: ErrorCode,
        /// Human-readable error message
        message: String,
        /// Additional error details (optional)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<serde_json::Value>,
    },
    /// Unknown response type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ResponseResult {
    /// Create a success response with data
    pub fn success<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ResponseResult::Success { data: Some(value) },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize response data");
                ResponseResult::error(ErrorCode::InternalError, "Failed to serialize response")
            }
        }
    }

    /// Create a success response without data
    pub fn success_empty() -> Self {
        ResponseResult::Success { data: None }
    }

    /// Create an error response
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ResponseResult::Error {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details
    pub fn error_with_details<T: Serialize>(
        code: ErrorCode,
        message: impl Into<String>,
        details: T,
    ) -> Self {
        ResponseResult::Error {
            code,
            message: message.into(),
            details: serde_json::to_value(details).ok(),
        }
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success { .. })
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, ResponseResult::Error { .. })
    }

    /// Decode the success payload into `T`.
    ///
    /// Returns `None` for errors, empty successes and payloads of another shape.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        match self {
            ResponseResult::Success { data: Some(value) } => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }
}

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors ===
    /// Request was malformed or invalid
    BadRequest,
    /// Caller has not identified itself
    Unauthorized,
    /// Caller lacks privilege for this operation
    Forbidden,
    /// Requested NPC or skin not found
    NotFound,
    /// Request data failed validation
    ValidationError,
    /// Rate limit (skin cooldown) active
    RateLimitExceeded,

    // === Server Errors ===
    /// Internal server error
    InternalError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Whether the caller may resubmit after correcting input or waiting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::BadRequest | ErrorCode::ValidationError | ErrorCode::RateLimitExceeded
        )
    }
}

/// Details attached to a `RateLimitExceeded` error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleDetails {
    pub remaining_secs: u64,
}

// =============================================================================
// Request Error (Client-Side)
// =============================================================================

/// Client-side request errors
///
/// These occur on the client side when making requests, distinct from
/// server-side errors returned in `ResponseResult::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request was cancelled")]
    Cancelled,
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to send request: {0}")]
    SendFailed(String),
    #[error("Not connected to server")]
    NotConnected,
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_serializes_with_status_tag() {
        let result = ResponseResult::error_with_details(
            ErrorCode::RateLimitExceeded,
            "Skin cooldown active",
            ThrottleDetails { remaining_secs: 12 },
        );
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "rate_limit_exceeded");
        assert_eq!(json["details"]["remaining_secs"], 12);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let result: ResponseResult =
            serde_json::from_str(r#"{"status":"pending"}"#).expect("deserialize");
        assert_eq!(result, ResponseResult::Unknown);
    }

    #[test]
    fn unknown_error_code_is_tolerated() {
        let code: ErrorCode = serde_json::from_str("\"teapot\"").expect("deserialize");
        assert_eq!(code, ErrorCode::Unknown);
    }

    #[test]
    fn data_as_decodes_payload() {
        let result = ResponseResult::success(ThrottleDetails { remaining_secs: 3 });
        assert_eq!(
            result.data_as::<ThrottleDetails>(),
            Some(ThrottleDetails { remaining_secs: 3 })
        );
        assert!(ResponseResult::success_empty()
            .data_as::<ThrottleDetails>()
            .is_none());
    }
}
