//! Resolved skin entries, per model and per NPC.
//!
//! A model's entries are rebuilt in one step whenever the observed size of
//! its skin set differs from the previous observation. Readers never see a
//! half-rebuilt model because the whole `ModelCache` is swapped under the
//! map's shard lock.

use std::collections::HashMap;

use dashmap::DashMap;

use crate::infrastructure::ports::SkinDescriptor;
use crate::stores::profile::ProfileObserver;
use easynpc_domain::{NpcId, ProfileUpdate, SkinId, SkinKind, SkinModel, SkinReference};
use easynpc_shared::SkinEntryData;

/// A skin resolved to something renderable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinCacheEntry {
    pub skin_id: SkinId,
    pub model: SkinModel,
    pub reference: SkinReference,
    pub name: String,
    pub texture: String,
}

impl SkinCacheEntry {
    pub fn from_descriptor(model: SkinModel, descriptor: &SkinDescriptor) -> Self {
        Self {
            skin_id: descriptor.skin_id,
            model,
            reference: descriptor.reference.clone(),
            name: descriptor.name.clone(),
            texture: descriptor.texture.clone(),
        }
    }

    pub fn kind(&self) -> SkinKind {
        self.reference.kind()
    }

    pub fn to_data(&self) -> SkinEntryData {
        SkinEntryData {
            skin_id: self.skin_id,
            model: self.model,
            kind: self.kind(),
            name: self.name.clone(),
            texture: self.texture.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct ModelCache {
    observed_count: usize,
    order: Vec<SkinId>,
    entries: HashMap<SkinId, SkinCacheEntry>,
}

impl ModelCache {
    fn build(model: SkinModel, snapshot: &[SkinDescriptor]) -> Self {
        let mut order = Vec::with_capacity(snapshot.len());
        let mut entries = HashMap::with_capacity(snapshot.len());
        for descriptor in snapshot {
            if entries.contains_key(&descriptor.skin_id) {
                continue;
            }
            order.push(descriptor.skin_id);
            entries.insert(
                descriptor.skin_id,
                SkinCacheEntry::from_descriptor(model, descriptor),
            );
        }
        Self {
            observed_count: snapshot.len(),
            order,
            entries,
        }
    }
}

pub struct SkinCache {
    models: DashMap<SkinModel, ModelCache>,
    active: DashMap<NpcId, SkinCacheEntry>,
}

impl SkinCache {
    pub fn new() -> Self {
        Self {
            models: DashMap::new(),
            active: DashMap::new(),
        }
    }

    /// Record a fresh snapshot of a model's skin set.
    ///
    /// Returns true when the cached entries were (re)built, i.e. on the first
    /// observation or when the set's size changed. Resolved active skins of
    /// that model are dropped along with them.
    pub fn sync(&self, model: SkinModel, snapshot: &[SkinDescriptor]) -> bool {
        let rebuilt = match self.models.get_mut(&model) {
            Some(mut cache) if cache.observed_count != snapshot.len() => {
                tracing::debug!(
                    model = %model,
                    previous = cache.observed_count,
                    current = snapshot.len(),
                    "Skin set size changed, invalidating cached entries"
                );
                *cache = ModelCache::build(model, snapshot);
                true
            }
            Some(_) => false,
            None => {
                self.models.insert(model, ModelCache::build(model, snapshot));
                return true;
            }
        };
        if rebuilt {
            self.active.retain(|_, entry| entry.model != model);
        }
        rebuilt
    }

    /// Ordered skin ids of the last synced snapshot.
    pub fn ids(&self, model: SkinModel) -> Vec<SkinId> {
        self.models
            .get(&model)
            .map(|cache| cache.order.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, model: SkinModel, skin_id: SkinId) -> Option<SkinCacheEntry> {
        self.models
            .get(&model)
            .and_then(|cache| cache.entries.get(&skin_id).cloned())
    }

    /// Resolve a run of ids, skipping ids that are no longer cached.
    pub fn entries(&self, model: SkinModel, ids: &[SkinId]) -> Vec<SkinCacheEntry> {
        match self.models.get(&model) {
            Some(cache) => ids
                .iter()
                .filter_map(|id| cache.entries.get(id).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn set_active(&self, npc_id: NpcId, entry: SkinCacheEntry) {
        self.active.insert(npc_id, entry);
    }

    pub fn clear_active(&self, npc_id: NpcId) {
        self.active.remove(&npc_id);
    }

    pub fn active(&self, npc_id: NpcId) -> Option<SkinCacheEntry> {
        self.active.get(&npc_id).map(|entry| entry.value().clone())
    }

    /// Forget everything cached for a model.
    pub fn invalidate(&self, model: SkinModel) {
        self.models.remove(&model);
        self.active.retain(|_, entry| entry.model != model);
    }
}

impl Default for SkinCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileObserver for SkinCache {
    fn profile_updated(&self, npc_id: NpcId, update: &ProfileUpdate) {
        if matches!(update, ProfileUpdate::SkinChanged { .. }) {
            self.active.remove(&npc_id);
        }
    }

    fn profile_removed(&self, npc_id: NpcId) {
        self.active.remove(&npc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easynpc_domain::SkinLocation;

    fn descriptor(location: &str) -> SkinDescriptor {
        let reference = SkinLocation::classify(location, SkinModel::Humanoid)
            .expect("valid location")
            .to_reference()
            .expect("non-empty location");
        SkinDescriptor::from_reference(reference)
    }

    fn snapshot(names: &[&str]) -> Vec<SkinDescriptor> {
        names.iter().map(|name| descriptor(name)).collect()
    }

    #[test]
    fn first_sync_builds_entries_in_order() {
        let cache = SkinCache::new();
        let skins = snapshot(&["Alex", "Steve", "Notch"]);

        assert!(cache.sync(SkinModel::Humanoid, &skins));
        let ids = cache.ids(SkinModel::Humanoid);
        assert_eq!(ids, skins.iter().map(|s| s.skin_id).collect::<Vec<_>>());

        let entry = cache.get(SkinModel::Humanoid, ids[1]).expect("cached");
        assert_eq!(entry.name, "Steve");
        assert_eq!(entry.kind(), SkinKind::PlayerSkin);
    }

    #[test]
    fn same_size_snapshot_keeps_entries() {
        let cache = SkinCache::new();
        cache.sync(SkinModel::Humanoid, &snapshot(&["Alex", "Steve"]));
        assert!(!cache.sync(SkinModel::Humanoid, &snapshot(&["Alex", "Steve"])));
    }

    #[test]
    fn size_change_invalidates_model_and_active_skins() {
        let cache = SkinCache::new();
        let skins = snapshot(&["Alex", "Steve"]);
        cache.sync(SkinModel::Humanoid, &skins);

        let npc_id = NpcId::new();
        let entry = cache
            .get(SkinModel::Humanoid, skins[0].skin_id)
            .expect("cached");
        cache.set_active(npc_id, entry);

        let grown = snapshot(&["Alex", "Steve", "Notch"]);
        assert!(cache.sync(SkinModel::Humanoid, &grown));
        assert_eq!(cache.ids(SkinModel::Humanoid).len(), 3);
        assert!(cache.active(npc_id).is_none());
    }

    #[test]
    fn skin_change_and_removal_evict_active_entry() {
        let cache = SkinCache::new();
        let skins = snapshot(&["Alex"]);
        cache.sync(SkinModel::Humanoid, &skins);
        let entry = cache
            .get(SkinModel::Humanoid, skins[0].skin_id)
            .expect("cached");

        let npc_id = NpcId::new();
        cache.set_active(npc_id, entry.clone());
        cache.profile_updated(
            npc_id,
            &ProfileUpdate::SkinChanged {
                from: SkinReference::default_for(SkinModel::Humanoid),
                to: entry.reference.clone(),
            },
        );
        assert!(cache.active(npc_id).is_none());

        cache.set_active(npc_id, entry);
        cache.profile_removed(npc_id);
        assert!(cache.active(npc_id).is_none());
    }

    #[test]
    fn entries_skip_unknown_ids() {
        let cache = SkinCache::new();
        let skins = snapshot(&["Alex", "Steve"]);
        cache.sync(SkinModel::Humanoid, &skins);

        let ids = vec![skins[1].skin_id, SkinId::new()];
        let entries = cache.entries(SkinModel::Humanoid, &ids);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to_data().name, "Steve");
    }
}
