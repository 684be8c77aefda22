//! In-memory skin sets, optionally seeded from a JSON catalog.
//!
//! Catalog format, keyed by skin model:
//!
//! ```json
//! {
//!   "humanoid": [
//!     { "location": "Notch" },
//!     { "location": "https://example.com/skins/knight.png" },
//!     { "name": "Blacksmith", "texture": "custom/blacksmith.png" }
//!   ]
//! }
//! ```
//!
//! Entries with a `location` become player-name or URL skins; entries
//! without one are custom skins identified by `skin_id` (or by name).

use std::collections::HashMap;
use std::path::Path;

use dashmap::DashMap;
use serde::Deserialize;

use crate::infrastructure::ports::{SkinDescriptor, SkinSourcePort};
use easynpc_domain::{SkinId, SkinLocation, SkinModel, SkinReference};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read skin catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid skin catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid {model} catalog entry '{entry}': {reason}")]
    Entry {
        model: SkinModel,
        entry: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    skin_id: Option<SkinId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    texture: Option<String>,
}

/// Skin sets kept in memory, one ordered list per model.
pub struct InMemorySkinSource {
    sets: DashMap<SkinModel, Vec<SkinDescriptor>>,
}

impl InMemorySkinSource {
    pub fn new() -> Self {
        Self {
            sets: DashMap::new(),
        }
    }

    pub fn from_catalog_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_catalog_str(&raw)
    }

    pub fn from_catalog_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: HashMap<SkinModel, Vec<CatalogEntry>> = serde_json::from_str(raw)?;
        let source = Self::new();
        for (model, entries) in catalog {
            for entry in entries {
                let descriptor = Self::describe(model, entry)?;
                source.register(model, descriptor);
            }
        }
        Ok(source)
    }

    fn describe(model: SkinModel, entry: CatalogEntry) -> Result<SkinDescriptor, CatalogError> {
        if let Some(location) = entry.location {
            let reference = SkinLocation::classify(&location, model)
                .map_err(|e| CatalogError::Entry {
                    model,
                    entry: location.clone(),
                    reason: e.to_string(),
                })?
                .to_reference()
                .ok_or_else(|| CatalogError::Entry {
                    model,
                    entry: location.clone(),
                    reason: "location cannot be empty".to_string(),
                })?;
            let mut descriptor = SkinDescriptor::from_reference(reference);
            if let Some(name) = entry.name {
                descriptor.name = name;
            }
            return Ok(descriptor);
        }

        let name = entry.name.ok_or_else(|| CatalogError::Entry {
            model,
            entry: "<unnamed>".to_string(),
            reason: "custom skins need a name".to_string(),
        })?;
        let skin_id = entry
            .skin_id
            .unwrap_or_else(|| SkinId::from_location(&format!("custom:{}", name)));
        let mut descriptor = SkinDescriptor::from_reference(SkinReference::Custom { skin_id });
        descriptor.name = name;
        if let Some(texture) = entry.texture {
            descriptor.texture = texture;
        }
        Ok(descriptor)
    }

    /// Add a skin to a model's set. Returns false if it was already present.
    pub fn register(&self, model: SkinModel, descriptor: SkinDescriptor) -> bool {
        let mut set = self.sets.entry(model).or_default();
        if set.iter().any(|known| known.skin_id == descriptor.skin_id) {
            return false;
        }
        tracing::debug!(
            model = %model,
            skin_id = %descriptor.skin_id,
            name = %descriptor.name,
            "Skin registered"
        );
        set.push(descriptor);
        true
    }

    /// Remove a skin from a model's set. Returns false if it was absent.
    pub fn unregister(&self, model: SkinModel, skin_id: SkinId) -> bool {
        match self.sets.get_mut(&model) {
            Some(mut set) => {
                let before = set.len();
                set.retain(|known| known.skin_id != skin_id);
                before != set.len()
            }
            None => false,
        }
    }

    pub fn len(&self, model: SkinModel) -> usize {
        self.sets.get(&model).map(|set| set.len()).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.sets.iter().map(|set| set.len()).sum()
    }
}

impl Default for InMemorySkinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SkinSourcePort for InMemorySkinSource {
    fn snapshot(&self, model: SkinModel) -> Vec<SkinDescriptor> {
        self.sets
            .get(&model)
            .map(|set| set.clone())
            .unwrap_or_default()
    }
}
