//! Name, dialog, action, equipment and scale edits.

use std::collections::BTreeMap;
use std::sync::Arc;

use easynpc_domain::common::none_if_blank;
use easynpc_domain::{
    ActionScript, ActionSettings, ActionTrigger, DialogConfig, DialogKind, DialogTextKey,
    EquipmentSlot, ItemReference, NpcId, NpcName, NpcProfile, PermissionLevel, ProfileMutation,
    Scale,
};
use easynpc_shared::ItemStackData;

use super::{ConfigurationError, ProfileWriter};

pub struct ProfileConfiguration {
    writer: Arc<ProfileWriter>,
}

impl ProfileConfiguration {
    pub fn new(writer: Arc<ProfileWriter>) -> Self {
        Self { writer }
    }

    pub fn get_profile(&self, npc_id: NpcId) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)
    }

    /// Rename an NPC. The name is trimmed and must differ from the current one.
    pub async fn rename(&self, npc_id: NpcId, name: &str) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let name = NpcName::new(name)?;
        self.writer.apply(npc_id, ProfileMutation::Rename(name)).await
    }

    pub async fn change_dialog(
        &self,
        npc_id: NpcId,
        kind: DialogKind,
        texts: BTreeMap<DialogTextKey, String>,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let dialog = DialogConfig::new(kind, texts)?;
        self.writer
            .apply(npc_id, ProfileMutation::ChangeDialog(dialog))
            .await
    }

    /// Bind a script to a trigger. A missing or blank script unbinds it.
    pub async fn set_action(
        &self,
        npc_id: NpcId,
        trigger: ActionTrigger,
        script: Option<&str>,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let script = script
            .and_then(none_if_blank)
            .map(ActionScript::new)
            .transpose()?;
        self.writer
            .apply(npc_id, ProfileMutation::SetAction { trigger, script })
            .await
    }

    pub async fn change_action_settings(
        &self,
        npc_id: NpcId,
        permission_level: u8,
        debug: bool,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let settings = ActionSettings {
            permission_level: PermissionLevel::new(permission_level)?,
            debug,
        };
        self.writer
            .apply(npc_id, ProfileMutation::ChangeActionSettings(settings))
            .await
    }

    /// Put an item into a slot. `None` empties the slot.
    pub async fn set_equipment(
        &self,
        npc_id: NpcId,
        slot: EquipmentSlot,
        item: Option<ItemStackData>,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let item = item
            .map(|stack| ItemReference::new(stack.item_id, stack.count))
            .transpose()?;
        self.writer
            .apply(npc_id, ProfileMutation::SetEquipment { slot, item })
            .await
    }

    pub async fn change_scale(
        &self,
        npc_id: NpcId,
        scale: f32,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let scale = Scale::new(scale)?;
        self.writer
            .apply(npc_id, ProfileMutation::ChangeScale(scale))
            .await
    }
}
