use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self).map_err(|e| {
                    DomainError::parse(format!(
                        "Invalid {} '{}': {}",
                        stringify!($name),
                        s,
                        e
                    ))
                })
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// NPC entity IDs
define_id!(NpcId);

// Caller (player) IDs
define_id!(PlayerId);

// Skin texture IDs
define_id!(SkinId);

impl SkinId {
    /// Stable id for a submitted player name or skin URL.
    ///
    /// The same location always maps to the same texture key, so repeated
    /// submissions reuse one cache entry.
    pub fn from_location(location: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, location.trim().as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_round_trip_through_display() {
        let id = NpcId::new();
        let parsed: NpcId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_garbage_ids() {
        let err = "not-a-uuid".parse::<PlayerId>().unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("PlayerId"));
    }

    #[test]
    fn skin_id_from_location_is_stable() {
        let a = SkinId::from_location("https://example.com/skin.png");
        let b = SkinId::from_location(" https://example.com/skin.png ");
        let c = SkinId::from_location("Notch");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
