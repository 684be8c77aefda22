//! Validated NPC display name
//!
//! A name is valid by construction:
//! - Trimmed of leading/trailing whitespace
//! - Non-blank
//! - At most 32 characters (the rename box limit)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::SkinModel;

/// Maximum length for an NPC display name, in characters.
pub const MAX_NPC_NAME_LENGTH: usize = 32;

/// A validated NPC display name (non-blank, <=32 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NpcName(String);

impl NpcName {
    /// Create a new validated NPC name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is blank after trimming
    /// - The name exceeds 32 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("NPC name cannot be blank"));
        }
        if trimmed.chars().count() > MAX_NPC_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "NPC name cannot exceed {} characters",
                MAX_NPC_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Default name of a freshly spawned NPC. Model display names are
    /// static, non-blank and short.
    pub(crate) fn for_model(model: SkinModel) -> Self {
        Self(model.display_name().to_string())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NpcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NpcName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NpcName> for String {
    fn from(name: NpcName) -> Self {
        name.0
    }
}

impl AsRef<str> for NpcName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
