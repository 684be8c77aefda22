//! WebSocket message types for engine-client communication
//!
//! The engine sends `ServerMessage` and receives `ClientMessage`; the
//! configuration client does the reverse.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown enum variants deserialize to `Unknown` for forward compatibility

use serde::{Deserialize, Serialize};

use easynpc_domain::{
    ConfigurationScreen, DialogAnswer, DialogConfig, InteractionHand, NpcId, NpcProfile, PlayerId,
};

use crate::requests::RequestPayload;
use crate::responses::{ErrorCode, ResponseResult};

// =============================================================================
// Client Messages (client -> engine)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Keep-alive, answered with `Pong`
    Heartbeat,

    /// Attribute this connection to a player. Requests sent before
    /// identifying are rejected.
    Identify { player_id: PlayerId, name: String },

    /// Send a request
    Request {
        /// Unique request ID for correlation
        request_id: String,
        payload: RequestPayload,
    },

    /// Player used an NPC in the world
    Interact {
        npc_id: NpcId,
        #[serde(default)]
        creative: bool,
        #[serde(default)]
        crouching: bool,
        #[serde(default)]
        hand: InteractionHand,
    },

    /// Player picked an answer in a yes/no dialog
    DialogAnswer { npc_id: NpcId, answer: DialogAnswer },

    /// Player closed an NPC dialog
    CloseDialog { npc_id: NpcId },

    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Server Messages (engine -> client)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    Pong,

    /// Answer to a `ClientMessage::Request`
    Response {
        request_id: String,
        result: ResponseResult,
    },

    /// Broadcast after every accepted mutation
    ProfileChanged { npc_id: NpcId, profile: NpcProfile },

    /// Broadcast after an NPC was removed
    ProfileRemoved { npc_id: NpcId },

    /// Ask the client to show a configuration screen
    OpenConfiguration {
        npc_id: NpcId,
        screen: ConfigurationScreen,
        profile: NpcProfile,
    },

    /// Ask the client to show an NPC dialog
    OpenDialog {
        npc_id: NpcId,
        npc_name: String,
        dialog: DialogConfig,
    },

    /// Error not tied to a request
    Error { code: ErrorCode, message: String },

    /// Text the NPC says after a yes/no answer
    DialogAnswerText {
        npc_id: NpcId,
        npc_name: String,
        text: String,
    },

    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code,
            message: message.into(),
        }
    }
}
