//! Mapping from use case errors to protocol responses.

use easynpc_shared::{ErrorCode, ResponseResult, ThrottleDetails};

use super::error_sanitizer::sanitize_error;
use crate::use_cases::{ConfigurationError, InteractionError, SkinError};

/// Extension trait for converting use case errors to protocol responses.
pub(super) trait IntoResponse {
    fn into_response(self) -> ResponseResult;
}

impl IntoResponse for ConfigurationError {
    fn into_response(self) -> ResponseResult {
        match &self {
            ConfigurationError::NotFound(_) => {
                ResponseResult::error(ErrorCode::NotFound, self.to_string())
            }
            ConfigurationError::InvalidPayload(_) => {
                ResponseResult::error(ErrorCode::ValidationError, self.to_string())
            }
            ConfigurationError::Throttled { remaining_secs } => ResponseResult::error_with_details(
                ErrorCode::RateLimitExceeded,
                self.to_string(),
                ThrottleDetails {
                    remaining_secs: *remaining_secs,
                },
            ),
            ConfigurationError::Unauthorized(_) => {
                ResponseResult::error(ErrorCode::Forbidden, self.to_string())
            }
        }
    }
}

impl IntoResponse for SkinError {
    fn into_response(self) -> ResponseResult {
        ResponseResult::error(ErrorCode::NotFound, self.to_string())
    }
}

impl IntoResponse for InteractionError {
    fn into_response(self) -> ResponseResult {
        match &self {
            InteractionError::NpcNotFound(_) => {
                ResponseResult::error(ErrorCode::NotFound, self.to_string())
            }
            InteractionError::NoDialog(_) | InteractionError::NotYesNoDialog(_) => {
                ResponseResult::error(ErrorCode::BadRequest, self.to_string())
            }
            InteractionError::Command(e) => ResponseResult::error(
                ErrorCode::InternalError,
                sanitize_error(e, "running an action"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::CommandError;
    use easynpc_domain::{NpcId, SkinId, SkinModel};

    fn code_of(result: &ResponseResult) -> ErrorCode {
        match result {
            ResponseResult::Error { code, .. } => *code,
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn configuration_errors_map_to_codes() {
        let npc_id = NpcId::new();
        let cases = [
            (ConfigurationError::NotFound(npc_id), ErrorCode::NotFound),
            (
                ConfigurationError::invalid("Name is empty"),
                ErrorCode::ValidationError,
            ),
            (
                ConfigurationError::Unauthorized("Removing an NPC".into()),
                ErrorCode::Forbidden,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(code_of(&error.into_response()), expected);
        }
    }

    #[test]
    fn throttled_carries_remaining_seconds() {
        let result = ConfigurationError::Throttled { remaining_secs: 7 }.into_response();
        match result {
            ResponseResult::Error { code, details, .. } => {
                assert_eq!(code, ErrorCode::RateLimitExceeded);
                let details: ThrottleDetails =
                    serde_json::from_value(details.expect("details")).unwrap();
                assert_eq!(details.remaining_secs, 7);
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn skin_errors_are_not_found() {
        let error = SkinError::NotFound {
            model: SkinModel::Villager,
            skin_id: SkinId::new(),
        };
        assert_eq!(code_of(&error.into_response()), ErrorCode::NotFound);
    }

    #[test]
    fn command_failures_are_sanitized() {
        let error = InteractionError::Command(CommandError::Rejected(
            "say secret-token".to_string(),
        ));
        match error.into_response() {
            ResponseResult::Error { code, message, .. } => {
                assert_eq!(code, ErrorCode::InternalError);
                assert!(!message.contains("secret-token"));
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(
            code_of(&InteractionError::NotYesNoDialog(NpcId::new()).into_response()),
            ErrorCode::BadRequest
        );
    }
}
