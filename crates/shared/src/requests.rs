//! Request payloads carried by `ClientMessage::Request`
//!
//! Requests are grouped per area; every area enum is internally tagged by
//! `type`, the outer payload is adjacently tagged by `area`.

use serde::{Deserialize, Serialize};

pub mod npc;
pub mod skin;

pub use npc::NpcRequest;
pub use skin::SkinRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "area", content = "request", rename_all = "snake_case")]
pub enum RequestPayload {
    Npc(NpcRequest),
    Skin(SkinRequest),
}

impl From<NpcRequest> for RequestPayload {
    fn from(request: NpcRequest) -> Self {
        RequestPayload::Npc(request)
    }
}

impl From<SkinRequest> for RequestPayload {
    fn from(request: SkinRequest) -> Self {
        RequestPayload::Skin(request)
    }
}
