//! Authoritative NPC profile storage.
//!
//! Each profile lives in its own `DashMap` entry, so a mutation holds the
//! entry's shard lock for the whole validate-then-write step. Observers are
//! notified after the lock is released.

use std::sync::Arc;

use dashmap::DashMap;

use easynpc_domain::{
    ActionSettings, DomainError, NpcId, NpcProfile, ProfileMutation, ProfileUpdate, SkinModel,
};

/// Dependent state that must follow profile changes (e.g. cached skins).
pub trait ProfileObserver: Send + Sync {
    fn profile_updated(&self, npc_id: NpcId, update: &ProfileUpdate);
    fn profile_removed(&self, npc_id: NpcId);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("NPC profile not found: {0}")]
    NotFound(NpcId),
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

pub struct ProfileStore {
    profiles: DashMap<NpcId, NpcProfile>,
    observers: Vec<Arc<dyn ProfileObserver>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::with_observers(Vec::new())
    }

    pub fn with_observers(observers: Vec<Arc<dyn ProfileObserver>>) -> Self {
        Self {
            profiles: DashMap::new(),
            observers,
        }
    }

    /// Insert (or replace) a profile.
    pub fn insert(&self, profile: NpcProfile) {
        self.profiles.insert(profile.id(), profile);
    }

    /// Create a profile with spawn defaults and return a snapshot of it.
    pub fn spawn(&self, id: NpcId, model: SkinModel, settings: ActionSettings) -> NpcProfile {
        let profile = NpcProfile::spawn_with_settings(id, model, settings);
        self.insert(profile.clone());
        profile
    }

    /// Read-only snapshot.
    pub fn get(&self, id: NpcId) -> Option<NpcProfile> {
        self.profiles.get(&id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: NpcId) -> bool {
        self.profiles.contains_key(&id)
    }

    /// Validate and apply a mutation atomically. On success returns the full
    /// resulting profile together with what changed.
    pub fn apply_mutation(
        &self,
        id: NpcId,
        mutation: ProfileMutation,
    ) -> Result<(NpcProfile, ProfileUpdate), ProfileStoreError> {
        let (profile, update) = {
            let mut entry = self
                .profiles
                .get_mut(&id)
                .ok_or(ProfileStoreError::NotFound(id))?;
            let update = entry.apply(mutation)?;
            (entry.value().clone(), update)
        };

        for observer in &self.observers {
            observer.profile_updated(id, &update);
        }
        Ok((profile, update))
    }

    /// Delete a profile. Removing an absent id is a no-op returning `None`.
    pub fn remove(&self, id: NpcId) -> Option<NpcProfile> {
        let (_, profile) = self.profiles.remove(&id)?;
        for observer in &self.observers {
            observer.profile_removed(id);
        }
        Some(profile)
    }

    /// All known ids, sorted for stable output.
    pub fn list_ids(&self) -> Vec<NpcId> {
        let mut ids: Vec<NpcId> = self.profiles.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
