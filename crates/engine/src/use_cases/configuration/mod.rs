//! Configuration session use cases.
//!
//! These gate remote mutation requests against the profile store: existence
//! first, then payload validation (and the skin-location cooldown), then an
//! atomic apply followed by a change broadcast.

use std::sync::Arc;

use easynpc_domain::{DomainError, NpcId, NpcProfile, ProfileMutation};

use crate::infrastructure::ports::ChangeBroadcastPort;
use crate::stores::{ProfileStore, ProfileStoreError};

mod access;
mod profile;
mod skin;

pub use access::ConfigurationAccess;
pub use profile::ProfileConfiguration;
pub use skin::SkinConfiguration;

/// Container for configuration use cases.
pub struct ConfigurationUseCases {
    pub profile: Arc<ProfileConfiguration>,
    pub skin: Arc<SkinConfiguration>,
    pub access: Arc<ConfigurationAccess>,
}

impl ConfigurationUseCases {
    pub fn new(
        profile: Arc<ProfileConfiguration>,
        skin: Arc<SkinConfiguration>,
        access: Arc<ConfigurationAccess>,
    ) -> Self {
        Self {
            profile,
            skin,
            access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Terminal for the session: the NPC is gone
    #[error("NPC not found: {0}")]
    NotFound(NpcId),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Skin location changes are on cooldown for {remaining_secs}s")]
    Throttled { remaining_secs: u64 },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ConfigurationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// Whether the caller may resubmit after correcting input or waiting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidPayload(_) | Self::Throttled { .. })
    }
}

impl From<DomainError> for ConfigurationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) | DomainError::Parse(message) => {
                Self::InvalidPayload(message)
            }
            other => Self::InvalidPayload(other.to_string()),
        }
    }
}

impl From<ProfileStoreError> for ConfigurationError {
    fn from(err: ProfileStoreError) -> Self {
        match err {
            ProfileStoreError::NotFound(id) => Self::NotFound(id),
            ProfileStoreError::Invalid(e) => e.into(),
        }
    }
}

/// Applies mutations to the store and broadcasts the resulting profile.
pub struct ProfileWriter {
    profiles: Arc<ProfileStore>,
    broadcast: Arc<dyn ChangeBroadcastPort>,
}

impl ProfileWriter {
    pub fn new(profiles: Arc<ProfileStore>, broadcast: Arc<dyn ChangeBroadcastPort>) -> Self {
        Self {
            profiles,
            broadcast,
        }
    }

    /// Snapshot of an existing profile.
    pub fn current(&self, npc_id: NpcId) -> Result<NpcProfile, ConfigurationError> {
        self.profiles
            .get(npc_id)
            .ok_or(ConfigurationError::NotFound(npc_id))
    }

    pub async fn apply(
        &self,
        npc_id: NpcId,
        mutation: ProfileMutation,
    ) -> Result<NpcProfile, ConfigurationError> {
        let kind = mutation.kind();
        let (profile, _update) = self.profiles.apply_mutation(npc_id, mutation)?;
        tracing::debug!(npc_id = %npc_id, mutation = %kind, "Profile mutation applied");

        self.broadcast.profile_changed(npc_id, &profile).await;
        Ok(profile)
    }
}
