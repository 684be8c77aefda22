//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Privilege checks (operator list, host permission system)
//! - Command execution (host command dispatcher)
//! - Skin set membership (host skin manager, catalog file)
//! - Change notification (connected clients)
//! - Clock (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use easynpc_domain::{NpcId, NpcProfile, PermissionLevel, PlayerId, SkinId, SkinModel, SkinReference};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Command rejected: {0}")]
    Rejected(String),
    #[error("Command executor unavailable")]
    Unavailable,
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// An action script ready to be handed to the host command executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionExecution {
    /// Script with placeholders already resolved
    pub script: String,
    pub npc_id: NpcId,
    /// Player who triggered the action, if any
    pub caller: Option<PlayerId>,
    pub permission_level: PermissionLevel,
    pub debug: bool,
}

/// One member of a model's skin set, as supplied by the skin source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinDescriptor {
    pub skin_id: SkinId,
    pub name: String,
    pub reference: SkinReference,
    /// Renderable handle (texture location)
    pub texture: String,
}

impl SkinDescriptor {
    /// Describe a reference, deriving its id, name and texture handle.
    pub fn from_reference(reference: SkinReference) -> Self {
        let (skin_id, name, texture) = match &reference {
            SkinReference::PlayerName { name, skin_id } => {
                (*skin_id, name.clone(), format!("player/{}", name.to_lowercase()))
            }
            SkinReference::RemoteUrl { url, skin_id, .. } => {
                let name = url
                    .rsplit('/')
                    .find(|segment| !segment.is_empty())
                    .unwrap_or(url.as_str())
                    .to_string();
                (*skin_id, name, url.clone())
            }
            SkinReference::Custom { skin_id } => {
                (*skin_id, skin_id.to_string(), format!("custom/{}.png", skin_id))
            }
            SkinReference::Default { variant } => (
                SkinId::from_location(variant),
                variant.clone(),
                format!("default/{}.png", variant),
            ),
        };
        Self {
            skin_id,
            name,
            reference,
            texture,
        }
    }
}

// =============================================================================
// External Service Ports
// =============================================================================

/// Authorization collaborator gating removal, spawning and configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrivilegePort: Send + Sync {
    async fn is_privileged(&self, caller: PlayerId) -> bool;
}

/// Host command executor. Scripts are opaque to the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandExecutorPort: Send + Sync {
    async fn execute(&self, execution: ActionExecution) -> Result<(), CommandError>;
}

/// Read-only view of the skin sets, one per model, in stable order.
#[cfg_attr(test, mockall::automock)]
pub trait SkinSourcePort: Send + Sync {
    fn snapshot(&self, model: SkinModel) -> Vec<SkinDescriptor>;
}

/// Outbound change notifications for connected collaborators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeBroadcastPort: Send + Sync {
    async fn profile_changed(&self, npc_id: NpcId, profile: &NpcProfile);
    async fn profile_removed(&self, npc_id: NpcId);
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
