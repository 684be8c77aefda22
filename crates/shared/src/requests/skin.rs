use serde::{Deserialize, Serialize};

use easynpc_domain::{NpcId, PageDirection, SkinId, SkinModel};

/// Skin set queries for selection screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkinRequest {
    ListSkinIds {
        model: SkinModel,
    },
    Resolve {
        model: SkinModel,
        skin_id: SkinId,
    },
    /// Page through a skin set. `direction` is applied after restoring the
    /// window at `start_index`.
    Page {
        model: SkinModel,
        #[serde(default)]
        start_index: usize,
        #[serde(default)]
        page_size: Option<usize>,
        #[serde(default)]
        direction: Option<PageDirection>,
    },
    ResolveActive {
        npc_id: NpcId,
    },
}
