use async_trait::async_trait;

use easynpc_shared::{RequestError, RequestPayload, ResponseResult};

/// Sends a session request and waits for the engine's answer.
///
/// Implementations correlate the answer by request id; services only see
/// the `ResponseResult`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcRequestPort: Send + Sync {
    async fn request(&self, payload: RequestPayload) -> Result<ResponseResult, RequestError>;
}
