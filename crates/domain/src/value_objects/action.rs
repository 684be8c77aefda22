//! Action scripts bound to interaction triggers
//!
//! Scripts are opaque command strings. The only interpretation done here is
//! placeholder substitution before a script is handed to an executor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{NpcId, PlayerId};

/// Maximum length of an action script, in characters.
pub const MAX_ACTION_SCRIPT_LENGTH: usize = 255;

/// Highest permission level an action may run with.
pub const MAX_PERMISSION_LEVEL: u8 = 4;

/// Closed set of events an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTrigger {
    OnInteraction,
    OnOpenDialog,
    OnCloseDialog,
    OnYesSelection,
    OnNoSelection,
}

impl ActionTrigger {
    pub fn all() -> &'static [ActionTrigger] {
        &[
            ActionTrigger::OnInteraction,
            ActionTrigger::OnOpenDialog,
            ActionTrigger::OnCloseDialog,
            ActionTrigger::OnYesSelection,
            ActionTrigger::OnNoSelection,
        ]
    }
}

impl fmt::Display for ActionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionTrigger::OnInteraction => "on_interaction",
            ActionTrigger::OnOpenDialog => "on_open_dialog",
            ActionTrigger::OnCloseDialog => "on_close_dialog",
            ActionTrigger::OnYesSelection => "on_yes_selection",
            ActionTrigger::OnNoSelection => "on_no_selection",
        };
        write!(f, "{}", name)
    }
}

/// A validated command string (non-blank, <=255 chars, no leading slash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionScript(String);

impl ActionScript {
    pub fn new(script: impl Into<String>) -> Result<Self, DomainError> {
        let script = script.into();
        let trimmed = script.trim();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed).trim_start();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Action script cannot be blank"));
        }
        if trimmed.chars().count() > MAX_ACTION_SCRIPT_LENGTH {
            return Err(DomainError::validation(format!(
                "Action script cannot exceed {} characters",
                MAX_ACTION_SCRIPT_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ActionScript {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionScript> for String {
    fn from(script: ActionScript) -> Self {
        script.0
    }
}

/// Permission level actions execute with (0..=4)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PermissionLevel(u8);

impl PermissionLevel {
    pub fn new(level: u8) -> Result<Self, DomainError> {
        if level > MAX_PERMISSION_LEVEL {
            return Err(DomainError::validation(format!(
                "Permission level must be between 0 and {}",
                MAX_PERMISSION_LEVEL
            )));
        }
        Ok(Self(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionLevel> for u8 {
    fn from(level: PermissionLevel) -> Self {
        level.0
    }
}

/// Execution settings shared by all of an NPC's actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSettings {
    pub permission_level: PermissionLevel,
    pub debug: bool,
}

/// Values substituted into a script before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub npc_id: NpcId,
    pub npc_name: String,
    pub initiator: Option<(PlayerId, String)>,
}

impl ActionContext {
    /// Replace `@npc`, `@npc-uuid`, `@initiator` and `@initiator-uuid`.
    ///
    /// Initiator placeholders are left in place when nobody initiated the action.
    pub fn resolve(&self, script: &ActionScript) -> String {
        // uuid forms first, they share a prefix with the name forms
        let mut resolved = script
            .as_str()
            .replace("@npc-uuid", &self.npc_id.to_string())
            .replace("@npc", &self.npc_name);
        if let Some((id, name)) = &self.initiator {
            resolved = resolved
                .replace("@initiator-uuid", &id.to_string())
                .replace("@initiator", name);
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_strips_leading_slash() {
        let script = ActionScript::new("/say hello").unwrap();
        assert_eq!(script.as_str(), "say hello");
    }

    #[test]
    fn script_rejects_blank() {
        assert!(ActionScript::new("").is_err());
        assert!(ActionScript::new(" / ").is_err());
    }

    #[test]
    fn script_rejects_overlong() {
        let script = "a".repeat(MAX_ACTION_SCRIPT_LENGTH + 1);
        assert!(ActionScript::new(script).is_err());
    }

    #[test]
    fn permission_level_bounds() {
        assert!(PermissionLevel::new(0).is_ok());
        assert!(PermissionLevel::new(4).is_ok());
        assert!(PermissionLevel::new(5).is_err());
        let parsed: Result<PermissionLevel, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
    }

    #[test]
    fn resolves_placeholders() {
        let npc_id = NpcId::new();
        let player_id = PlayerId::new();
        let context = ActionContext {
            npc_id,
            npc_name: "Bob".into(),
            initiator: Some((player_id, "Alex".into())),
        };
        let script = ActionScript::new("tell @initiator @npc (@npc-uuid) greets @initiator-uuid").unwrap();
        assert_eq!(
            context.resolve(&script),
            format!("tell Alex Bob ({}) greets {}", npc_id, player_id)
        );
    }

    #[test]
    fn leaves_initiator_placeholder_without_initiator() {
        let context = ActionContext {
            npc_id: NpcId::new(),
            npc_name: "Bob".into(),
            initiator: None,
        };
        let script = ActionScript::new("say @initiator").unwrap();
        assert_eq!(context.resolve(&script), "say @initiator");
    }
}
