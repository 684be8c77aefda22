//! Service layer error types
//!
//! Server error codes are folded into the few outcomes a configuration
//! screen reacts to differently.

use serde::de::DeserializeOwned;

use easynpc_domain::DomainError;
use easynpc_shared::{ErrorCode, RequestError, ResponseResult, ThrottleDetails};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// Request failed to send, was cancelled or timed out
    #[error("Request error: {0}")]
    Request(#[from] RequestError),
    /// The NPC is gone; the session should be closed
    #[error("Not found: {0}")]
    NotFound(String),
    /// Input rejected; correct it and resubmit
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Skin-location changes are on cooldown
    #[error("On cooldown for {remaining_secs}s")]
    Throttled { remaining_secs: u64 },
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Server error ({code:?}): {message}")]
    Server { code: ErrorCode, message: String },
    /// Response was empty when data was expected
    #[error("Server returned empty response")]
    EmptyResponse,
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// Local state refused the operation (e.g. nothing to submit)
    #[error(transparent)]
    State(#[from] DomainError),
}

impl PlayerError {
    /// Whether the same screen can stay open and retry after correcting
    /// input or waiting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Throttled { .. })
    }

    /// Whether the configuration session should be closed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    fn from_server(code: ErrorCode, message: String, details: Option<serde_json::Value>) -> Self {
        match code {
            ErrorCode::NotFound => Self::NotFound(message),
            ErrorCode::ValidationError | ErrorCode::BadRequest => Self::Validation(message),
            ErrorCode::RateLimitExceeded => {
                let remaining_secs = details
                    .and_then(|d| serde_json::from_value::<ThrottleDetails>(d).ok())
                    .map(|d| d.remaining_secs)
                    .unwrap_or_default();
                Self::Throttled { remaining_secs }
            }
            ErrorCode::Forbidden | ErrorCode::Unauthorized => Self::Forbidden(message),
            code => Self::Server { code, message },
        }
    }
}

/// Helper trait for parsing ResponseResult into typed data
pub trait ParseResponse {
    /// Parse a ResponseResult into the expected type
    fn parse<T: DeserializeOwned>(self) -> Result<T, PlayerError>;

    /// Parse a ResponseResult that carries no data
    fn parse_empty(self) -> Result<(), PlayerError>;
}

impl ParseResponse for ResponseResult {
    fn parse<T: DeserializeOwned>(self) -> Result<T, PlayerError> {
        match self {
            ResponseResult::Success { data } => {
                let data = data.ok_or(PlayerError::EmptyResponse)?;
                serde_json::from_value(data).map_err(|e| PlayerError::Parse(e.to_string()))
            }
            ResponseResult::Error {
                code,
                message,
                details,
            } => Err(PlayerError::from_server(code, message, details)),
            ResponseResult::Unknown => Err(PlayerError::Server {
                code: ErrorCode::InternalError,
                message: "Unknown response type".to_string(),
            }),
        }
    }

    fn parse_empty(self) -> Result<(), PlayerError> {
        match self {
            ResponseResult::Success { .. } => Ok(()),
            ResponseResult::Error {
                code,
                message,
                details,
            } => Err(PlayerError::from_server(code, message, details)),
            ResponseResult::Unknown => Err(PlayerError::Server {
                code: ErrorCode::InternalError,
                message: "Unknown response type".to_string(),
            }),
        }
    }
}
