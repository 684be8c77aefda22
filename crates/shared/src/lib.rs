//! EasyNPC Protocol - Shared types for engine and client communication
//!
//! - WebSocket message types (`ClientMessage`, `ServerMessage`)
//! - Request payloads grouped per area (`NpcRequest`, `SkinRequest`)
//! - Response envelopes and error codes
//! - Wire DTOs for response payloads
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **Domain vocabulary** - ids and value enums come from `easynpc-domain`
//! 3. **Unvalidated input** - request fields are raw; the engine validates

pub mod dto;
pub mod messages;
pub mod requests;
pub mod responses;

pub use dto::{
    ConfigurationData, ItemStackData, SkinCooldownData, SkinEntryData, SkinPageData,
};
pub use messages::{ClientMessage, ServerMessage};
pub use requests::{NpcRequest, RequestPayload, SkinRequest};
pub use responses::{ErrorCode, RequestError, ResponseResult, ThrottleDetails};
