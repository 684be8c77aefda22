//! Privileged operations: opening configuration screens, spawning and
//! removing NPCs.
//!
//! The privilege check runs before the existence check, so unprivileged
//! callers learn nothing about which NPCs exist.

use std::sync::Arc;

use easynpc_domain::{
    ActionSettings, ConfigurationScreen, NpcId, NpcProfile, PlayerId, SkinModel,
};

use super::ConfigurationError;
use crate::infrastructure::ports::{ChangeBroadcastPort, PrivilegePort};
use crate::stores::ProfileStore;

pub struct ConfigurationAccess {
    profiles: Arc<ProfileStore>,
    privileges: Arc<dyn PrivilegePort>,
    broadcast: Arc<dyn ChangeBroadcastPort>,
    spawn_settings: ActionSettings,
}

impl ConfigurationAccess {
    pub fn new(
        profiles: Arc<ProfileStore>,
        privileges: Arc<dyn PrivilegePort>,
        broadcast: Arc<dyn ChangeBroadcastPort>,
        spawn_settings: ActionSettings,
    ) -> Self {
        Self {
            profiles,
            privileges,
            broadcast,
            spawn_settings,
        }
    }

    async fn require_privilege(
        &self,
        caller: PlayerId,
        operation: &str,
    ) -> Result<(), ConfigurationError> {
        if self.privileges.is_privileged(caller).await {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, operation, "Privilege check failed");
            Err(ConfigurationError::Unauthorized(format!(
                "{} requires elevated privilege",
                operation
            )))
        }
    }

    /// Ask for a configuration screen. The profile is returned so the screen
    /// can be filled without a second round-trip.
    pub async fn open_configuration(
        &self,
        caller: PlayerId,
        npc_id: NpcId,
        screen: ConfigurationScreen,
    ) -> Result<(ConfigurationScreen, NpcProfile), ConfigurationError> {
        self.require_privilege(caller, "Opening the configuration")
            .await?;
        let profile = self
            .profiles
            .get(npc_id)
            .ok_or(ConfigurationError::NotFound(npc_id))?;
        Ok((screen, profile))
    }

    /// Delete an NPC and everything cached for it. Irreversible.
    pub async fn remove(
        &self,
        caller: PlayerId,
        npc_id: NpcId,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.require_privilege(caller, "Removing an NPC").await?;
        let profile = self
            .profiles
            .remove(npc_id)
            .ok_or(ConfigurationError::NotFound(npc_id))?;

        tracing::info!(npc_id = %npc_id, caller = %caller, "NPC removed");
        self.broadcast.profile_removed(npc_id).await;
        Ok(profile)
    }

    /// Create a new NPC with spawn defaults.
    pub async fn spawn(
        &self,
        caller: PlayerId,
        model: SkinModel,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.require_privilege(caller, "Spawning an NPC").await?;
        let npc_id = NpcId::new();
        let profile = self.profiles.spawn(npc_id, model, self.spawn_settings);

        tracing::info!(npc_id = %npc_id, model = %model, caller = %caller, "NPC spawned");
        self.broadcast.profile_changed(npc_id, &profile).await;
        Ok(profile)
    }
}
