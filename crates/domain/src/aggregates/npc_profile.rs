//! NPC profile aggregate - the configurable state of one NPC instance
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state is only changed through `apply`
//! - **Newtypes**: names, scripts, items and scale are valid by construction
//! - **Domain events**: `apply` returns a `ProfileUpdate` describing the change
//! - **All-or-nothing**: a mutation is fully validated before any field is written

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::ProfileUpdate;
use crate::ids::NpcId;
use crate::value_objects::{
    ActionScript, ActionSettings, ActionTrigger, DialogConfig, EquipmentSlot, ItemReference,
    MutationKind, NpcName, Scale, SkinModel, SkinReference,
};

/// A validated change to exactly one area of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileMutation {
    Rename(NpcName),
    ChangeSkin(SkinReference),
    ChangeDialog(DialogConfig),
    SetAction {
        trigger: ActionTrigger,
        script: Option<ActionScript>,
    },
    ChangeActionSettings(ActionSettings),
    SetEquipment {
        slot: EquipmentSlot,
        item: Option<ItemReference>,
    },
    ChangeScale(Scale),
}

impl ProfileMutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            ProfileMutation::Rename(_) => MutationKind::Rename,
            ProfileMutation::ChangeSkin(_) => MutationKind::SkinChange,
            ProfileMutation::ChangeDialog(_) => MutationKind::DialogChange,
            ProfileMutation::SetAction { .. } => MutationKind::ActionChange,
            ProfileMutation::ChangeActionSettings(_) => MutationKind::ActionSettingsChange,
            ProfileMutation::SetEquipment { .. } => MutationKind::EquipmentChange,
            ProfileMutation::ChangeScale(_) => MutationKind::ScaleChange,
        }
    }
}

/// Configuration state of one NPC
///
/// # Invariants
///
/// - `name` is never blank and at most 32 characters (enforced by `NpcName`)
/// - `skin` syntax always matches its kind and the NPC's skin model
/// - `actions` keys are drawn from the closed `ActionTrigger` set
///
/// # Example
///
/// ```
/// use easynpc_domain::{NpcId, NpcName, NpcProfile, ProfileMutation, SkinModel};
///
/// let mut profile = NpcProfile::spawn(NpcId::new(), SkinModel::Humanoid);
/// assert_eq!(profile.name().as_str(), "Humanoid");
///
/// let name = NpcName::new("Blacksmith").unwrap();
/// profile.apply(ProfileMutation::Rename(name)).unwrap();
/// assert_eq!(profile.name().as_str(), "Blacksmith");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcProfile {
    id: NpcId,
    model: SkinModel,
    name: NpcName,
    skin: SkinReference,
    dialog: DialogConfig,
    actions: BTreeMap<ActionTrigger, ActionScript>,
    action_settings: ActionSettings,
    equipment: BTreeMap<EquipmentSlot, ItemReference>,
    scale: Scale,
}

impl NpcProfile {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// A freshly spawned NPC with default values.
    pub fn spawn(id: NpcId, model: SkinModel) -> Self {
        Self::spawn_with_settings(id, model, ActionSettings::default())
    }

    /// Like `spawn`, with server-wide default action settings.
    pub fn spawn_with_settings(id: NpcId, model: SkinModel, settings: ActionSettings) -> Self {
        Self {
            id,
            model,
            name: NpcName::for_model(model),
            skin: SkinReference::default_for(model),
            dialog: DialogConfig::default(),
            actions: BTreeMap::new(),
            action_settings: settings,
            equipment: BTreeMap::new(),
            scale: Scale::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> NpcId {
        self.id
    }

    #[inline]
    pub fn model(&self) -> SkinModel {
        self.model
    }

    pub fn name(&self) -> &NpcName {
        &self.name
    }

    pub fn skin(&self) -> &SkinReference {
        &self.skin
    }

    pub fn dialog(&self) -> &DialogConfig {
        &self.dialog
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.has_dialog()
    }

    pub fn actions(&self) -> &BTreeMap<ActionTrigger, ActionScript> {
        &self.actions
    }

    pub fn action(&self, trigger: ActionTrigger) -> Option<&ActionScript> {
        self.actions.get(&trigger)
    }

    pub fn action_settings(&self) -> ActionSettings {
        self.action_settings
    }

    pub fn equipment(&self) -> &BTreeMap<EquipmentSlot, ItemReference> {
        &self.equipment
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&ItemReference> {
        self.equipment.get(&slot)
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Validate and apply a mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the payload breaks an invariant
    /// or a rename does not change the name. The profile is untouched on error.
    pub fn apply(&mut self, mutation: ProfileMutation) -> Result<ProfileUpdate, DomainError> {
        self.validate(&mutation)?;

        let update = match mutation {
            ProfileMutation::Rename(name) => ProfileUpdate::Renamed {
                from: std::mem::replace(&mut self.name, name.clone()),
                to: name,
            },
            ProfileMutation::ChangeSkin(skin) => ProfileUpdate::SkinChanged {
                from: std::mem::replace(&mut self.skin, skin.clone()),
                to: skin,
            },
            ProfileMutation::ChangeDialog(dialog) => ProfileUpdate::DialogChanged {
                from: std::mem::replace(&mut self.dialog, dialog.clone()),
                to: dialog,
            },
            ProfileMutation::SetAction { trigger, script } => {
                let from = match &script {
                    Some(script) => self.actions.insert(trigger, script.clone()),
                    None => self.actions.remove(&trigger),
                };
                ProfileUpdate::ActionChanged {
                    trigger,
                    from,
                    to: script,
                }
            }
            ProfileMutation::ChangeActionSettings(settings) => {
                ProfileUpdate::ActionSettingsChanged {
                    from: std::mem::replace(&mut self.action_settings, settings),
                    to: settings,
                }
            }
            ProfileMutation::SetEquipment { slot, item } => {
                let from = match &item {
                    Some(item) => self.equipment.insert(slot, item.clone()),
                    None => self.equipment.remove(&slot),
                };
                ProfileUpdate::EquipmentChanged { slot, from, to: item }
            }
            ProfileMutation::ChangeScale(scale) => ProfileUpdate::ScaleChanged {
                from: std::mem::replace(&mut self.scale, scale),
                to: scale,
            },
        };
        Ok(update)
    }

    fn validate(&self, mutation: &ProfileMutation) -> Result<(), DomainError> {
        match mutation {
            ProfileMutation::Rename(name) => {
                if name == &self.name {
                    return Err(DomainError::validation(format!(
                        "NPC is already named '{}'",
                        name
                    )));
                }
                Ok(())
            }
            ProfileMutation::ChangeSkin(skin) => skin.validate_for(self.model),
            ProfileMutation::ChangeDialog(dialog) => dialog.validate(),
            ProfileMutation::SetAction { .. }
            | ProfileMutation::ChangeActionSettings(_)
            | ProfileMutation::SetEquipment { .. }
            | ProfileMutation::ChangeScale(_) => Ok(()),
        }
    }
}
