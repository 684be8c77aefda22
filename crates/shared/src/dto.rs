//! Wire-format data carried in `ResponseResult::Success` payloads

use serde::{Deserialize, Serialize};

use easynpc_domain::{
    ConfigurationScreen, NavigationControls, NpcId, NpcProfile, PaginationState, SkinId,
    SkinKind, SkinModel,
};

/// An item stack as typed by a client; validated on the engine side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStackData {
    pub item_id: String,
    #[serde(default = "default_count")]
    pub count: u8,
}

fn default_count() -> u8 {
    1
}

/// A resolved skin ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinEntryData {
    pub skin_id: SkinId,
    pub model: SkinModel,
    pub kind: SkinKind,
    /// Display name of the skin (player name, file name or variant)
    pub name: String,
    /// Renderable handle, e.g. a texture location
    pub texture: String,
}

/// One page of a model's skin set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinPageData {
    pub model: SkinModel,
    pub entries: Vec<SkinEntryData>,
    pub state: PaginationState,
    pub controls: NavigationControls,
}

/// Remaining skin-location cooldown for an NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinCooldownData {
    pub npc_id: NpcId,
    pub remaining_secs: u64,
}

/// Screen to open plus the profile it edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationData {
    pub screen: ConfigurationScreen,
    pub profile: NpcProfile,
}
