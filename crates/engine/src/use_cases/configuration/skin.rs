//! Skin changes: free-form locations (throttled), catalog picks and defaults.

use std::sync::Arc;

use easynpc_domain::{NpcId, NpcProfile, ProfileMutation, SkinId, SkinLocation, SkinReference};

use super::{ConfigurationError, ProfileWriter};
use crate::infrastructure::ports::ClockPort;
use crate::stores::{CooldownRejection, CooldownStore};
use crate::use_cases::skins::{SkinCatalog, SkinError};

pub struct SkinConfiguration {
    writer: Arc<ProfileWriter>,
    catalog: Arc<SkinCatalog>,
    cooldowns: Arc<CooldownStore>,
    clock: Arc<dyn ClockPort>,
}

impl SkinConfiguration {
    pub fn new(
        writer: Arc<ProfileWriter>,
        catalog: Arc<SkinCatalog>,
        cooldowns: Arc<CooldownStore>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            writer,
            catalog,
            cooldowns,
            clock,
        }
    }

    /// Change the skin to a player name or URL; an empty location resets the
    /// NPC to its model's default skin.
    ///
    /// Accepted changes start a per-NPC cooldown. A location equal to the
    /// last submitted one is rejected as unchanged.
    pub async fn change_skin_location(
        &self,
        npc_id: NpcId,
        location: &str,
    ) -> Result<NpcProfile, ConfigurationError> {
        let current = self.writer.current(npc_id)?;
        let now = self.clock.now();

        let remaining_secs = self.cooldowns.remaining_secs(npc_id, now);
        if remaining_secs > 0 {
            tracing::warn!(npc_id = %npc_id, remaining_secs, "Skin location change throttled");
            return Err(ConfigurationError::Throttled { remaining_secs });
        }

        let classified = SkinLocation::classify(location, current.model())?;
        let stored = current.skin().location().unwrap_or_default();
        let reservation = self
            .cooldowns
            .try_acquire(npc_id, classified.as_str(), stored, now)
            .map_err(|rejection| match rejection {
                CooldownRejection::Throttled { remaining_secs } => {
                    tracing::warn!(npc_id = %npc_id, remaining_secs, "Skin location change throttled");
                    ConfigurationError::Throttled { remaining_secs }
                }
                CooldownRejection::Unchanged => {
                    ConfigurationError::invalid("Skin location is unchanged")
                }
            })?;

        let reference = classified
            .to_reference()
            .unwrap_or_else(|| SkinReference::default_for(current.model()));
        match self
            .writer
            .apply(npc_id, ProfileMutation::ChangeSkin(reference))
            .await
        {
            Ok(profile) => Ok(profile),
            Err(e) => {
                self.cooldowns.release(reservation);
                Err(e)
            }
        }
    }

    /// Pick a skin from the NPC's model set.
    pub async fn select_skin(
        &self,
        npc_id: NpcId,
        skin_id: SkinId,
    ) -> Result<NpcProfile, ConfigurationError> {
        let current = self.writer.current(npc_id)?;
        let entry = self
            .catalog
            .resolve(current.model(), skin_id)
            .map_err(|e| match e {
                SkinError::NotFound { .. } => ConfigurationError::invalid(e.to_string()),
                SkinError::ProfileNotFound(id) => ConfigurationError::NotFound(id),
            })?;
        self.writer
            .apply(npc_id, ProfileMutation::ChangeSkin(entry.reference))
            .await
    }

    /// Switch to one of the model's built-in variants.
    pub async fn select_default_skin(
        &self,
        npc_id: NpcId,
        variant: &str,
    ) -> Result<NpcProfile, ConfigurationError> {
        self.writer.current(npc_id)?;
        let reference = SkinReference::Default {
            variant: variant.trim().to_string(),
        };
        self.writer
            .apply(npc_id, ProfileMutation::ChangeSkin(reference))
            .await
    }

    /// Seconds until the next skin-location change is accepted.
    pub fn skin_cooldown(&self, npc_id: NpcId) -> Result<u64, ConfigurationError> {
        self.writer.current(npc_id)?;
        Ok(self.cooldowns.remaining_secs(npc_id, self.clock.now()))
    }
}
