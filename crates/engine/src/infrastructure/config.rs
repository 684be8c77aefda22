//! Engine configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `EASYNPC_HOST` | `0.0.0.0` |
//! | `EASYNPC_PORT` | `3000` |
//! | `EASYNPC_SKIN_COOLDOWN_SECS` | `20` |
//! | `EASYNPC_OPERATORS` | empty, comma-separated player ids |
//! | `EASYNPC_SKIN_CATALOG` | unset, path to a JSON skin catalog |
//! | `EASYNPC_DEFAULT_PERMISSION_LEVEL` | `0` |

use std::path::PathBuf;
use std::time::Duration;

use easynpc_domain::common::none_if_blank;
use easynpc_domain::{PermissionLevel, PlayerId};

pub const DEFAULT_SKIN_COOLDOWN_SECS: u64 = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            var,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    pub skin_cooldown: Duration,
    pub operators: Vec<PlayerId>,
    pub skin_catalog: Option<PathBuf>,
    pub default_permission_level: PermissionLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            skin_cooldown: Duration::from_secs(DEFAULT_SKIN_COOLDOWN_SECS),
            operators: Vec::new(),
            skin_catalog: None,
            default_permission_level: PermissionLevel::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|value| none_if_blank(&value).map(str::to_string))
        };
        let defaults = Self::default();

        let host = get("EASYNPC_HOST").unwrap_or(defaults.host);

        let port = match get("EASYNPC_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("EASYNPC_PORT", e))?,
            None => defaults.port,
        };

        let skin_cooldown = match get("EASYNPC_SKIN_COOLDOWN_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| ConfigError::invalid("EASYNPC_SKIN_COOLDOWN_SECS", e))?,
            ),
            None => defaults.skin_cooldown,
        };

        let operators = match get("EASYNPC_OPERATORS") {
            Some(raw) => raw
                .split(',')
                .filter_map(none_if_blank)
                .map(|id| {
                    id.parse::<PlayerId>()
                        .map_err(|e| ConfigError::invalid("EASYNPC_OPERATORS", e))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.operators,
        };

        let skin_catalog = get("EASYNPC_SKIN_CATALOG").map(PathBuf::from);

        let default_permission_level = match get("EASYNPC_DEFAULT_PERMISSION_LEVEL") {
            Some(raw) => {
                let level = raw
                    .parse::<u8>()
                    .map_err(|e| ConfigError::invalid("EASYNPC_DEFAULT_PERMISSION_LEVEL", e))?;
                PermissionLevel::new(level)
                    .map_err(|e| ConfigError::invalid("EASYNPC_DEFAULT_PERMISSION_LEVEL", e))?
            }
            None => defaults.default_permission_level,
        };

        Ok(Self {
            host,
            port,
            skin_cooldown,
            operators,
            skin_catalog,
            default_permission_level,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
