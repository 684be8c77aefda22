use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use easynpc_domain::{
    ActionTrigger, ConfigurationScreen, DialogKind, DialogTextKey, EquipmentSlot, NpcId, SkinId,
    SkinModel,
};

use crate::dto::ItemStackData;

/// Profile reads and mutations. Payload values arrive unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NpcRequest {
    GetProfile {
        npc_id: NpcId,
    },
    Rename {
        npc_id: NpcId,
        name: String,
    },
    /// Player name, URL, or empty to reset to the default skin
    ChangeSkinLocation {
        npc_id: NpcId,
        location: String,
    },
    SelectSkin {
        npc_id: NpcId,
        skin_id: SkinId,
    },
    SelectDefaultSkin {
        npc_id: NpcId,
        variant: String,
    },
    ChangeDialog {
        npc_id: NpcId,
        kind: DialogKind,
        #[serde(default)]
        texts: BTreeMap<DialogTextKey, String>,
    },
    /// `script: None` unbinds the trigger
    SetAction {
        npc_id: NpcId,
        trigger: ActionTrigger,
        #[serde(default)]
        script: Option<String>,
    },
    ChangeActionSettings {
        npc_id: NpcId,
        permission_level: u8,
        #[serde(default)]
        debug: bool,
    },
    /// `item: None` empties the slot
    SetEquipment {
        npc_id: NpcId,
        slot: EquipmentSlot,
        #[serde(default)]
        item: Option<ItemStackData>,
    },
    ChangeScale {
        npc_id: NpcId,
        scale: f32,
    },
    GetSkinCooldown {
        npc_id: NpcId,
    },
    OpenConfiguration {
        npc_id: NpcId,
        screen: ConfigurationScreen,
    },
    Remove {
        npc_id: NpcId,
    },
    Spawn {
        model: SkinModel,
    },
}

impl NpcRequest {
    /// Target NPC, if the request addresses an existing one.
    pub fn npc_id(&self) -> Option<NpcId> {
        match self {
            NpcRequest::GetProfile { npc_id }
            | NpcRequest::Rename { npc_id, .. }
            | NpcRequest::ChangeSkinLocation { npc_id, .. }
            | NpcRequest::SelectSkin { npc_id, .. }
            | NpcRequest::SelectDefaultSkin { npc_id, .. }
            | NpcRequest::ChangeDialog { npc_id, .. }
            | NpcRequest::SetAction { npc_id, .. }
            | NpcRequest::ChangeActionSettings { npc_id, .. }
            | NpcRequest::SetEquipment { npc_id, .. }
            | NpcRequest::ChangeScale { npc_id, .. }
            | NpcRequest::GetSkinCooldown { npc_id }
            | NpcRequest::OpenConfiguration { npc_id, .. }
            | NpcRequest::Remove { npc_id } => Some(*npc_id),
            NpcRequest::Spawn { .. } => None,
        }
    }
}
