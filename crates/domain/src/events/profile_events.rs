//! Profile-related domain events

use crate::value_objects::{
    ActionScript, ActionSettings, ActionTrigger, DialogConfig, EquipmentSlot, ItemReference,
    MutationKind, NpcName, Scale, SkinReference,
};

/// Outcome of applying a mutation to an `NpcProfile`
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Renamed {
        from: NpcName,
        to: NpcName,
    },
    SkinChanged {
        from: SkinReference,
        to: SkinReference,
    },
    DialogChanged {
        from: DialogConfig,
        to: DialogConfig,
    },
    /// `to: None` unbinds the trigger
    ActionChanged {
        trigger: ActionTrigger,
        from: Option<ActionScript>,
        to: Option<ActionScript>,
    },
    ActionSettingsChanged {
        from: ActionSettings,
        to: ActionSettings,
    },
    /// `to: None` empties the slot
    EquipmentChanged {
        slot: EquipmentSlot,
        from: Option<ItemReference>,
        to: Option<ItemReference>,
    },
    ScaleChanged {
        from: Scale,
        to: Scale,
    },
}

impl ProfileUpdate {
    pub fn kind(&self) -> MutationKind {
        match self {
            ProfileUpdate::Renamed { .. } => MutationKind::Rename,
            ProfileUpdate::SkinChanged { .. } => MutationKind::SkinChange,
            ProfileUpdate::DialogChanged { .. } => MutationKind::DialogChange,
            ProfileUpdate::ActionChanged { .. } => MutationKind::ActionChange,
            ProfileUpdate::ActionSettingsChanged { .. } => MutationKind::ActionSettingsChange,
            ProfileUpdate::EquipmentChanged { .. } => MutationKind::EquipmentChange,
            ProfileUpdate::ScaleChanged { .. } => MutationKind::ScaleChange,
        }
    }
}
