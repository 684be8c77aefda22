//! Skin resolution and pagination use cases.
//!
//! Every query takes a fresh snapshot from the skin source first, so a
//! membership change is noticed (and the model's cache rebuilt) on the next
//! read.

use std::sync::Arc;

use easynpc_domain::{
    NavigationControls, NpcId, PageDirection, PaginationState, SkinId, SkinModel,
    DEFAULT_PAGE_SIZE,
};

use easynpc_shared::SkinPageData;

use crate::infrastructure::ports::{SkinDescriptor, SkinSourcePort};
use crate::stores::{ProfileStore, SkinCache, SkinCacheEntry};

/// Container for skin use cases.
pub struct SkinUseCases {
    pub catalog: Arc<SkinCatalog>,
}

impl SkinUseCases {
    pub fn new(catalog: Arc<SkinCatalog>) -> Self {
        Self { catalog }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SkinError {
    #[error("Skin {skin_id} not found for model {model}")]
    NotFound { model: SkinModel, skin_id: SkinId },
    #[error("NPC profile not found: {0}")]
    ProfileNotFound(NpcId),
}

/// One page of a skin set.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinPage {
    pub model: SkinModel,
    pub entries: Vec<SkinCacheEntry>,
    pub state: PaginationState,
    pub controls: NavigationControls,
}

impl SkinPage {
    pub fn to_data(&self) -> SkinPageData {
        SkinPageData {
            model: self.model,
            entries: self.entries.iter().map(SkinCacheEntry::to_data).collect(),
            state: self.state,
            controls: self.controls,
        }
    }
}

pub struct SkinCatalog {
    source: Arc<dyn SkinSourcePort>,
    cache: Arc<SkinCache>,
    profiles: Arc<ProfileStore>,
}

impl SkinCatalog {
    pub fn new(
        source: Arc<dyn SkinSourcePort>,
        cache: Arc<SkinCache>,
        profiles: Arc<ProfileStore>,
    ) -> Self {
        Self {
            source,
            cache,
            profiles,
        }
    }

    fn refresh(&self, model: SkinModel) {
        let snapshot = self.source.snapshot(model);
        self.cache.sync(model, &snapshot);
    }

    /// Ordered skin ids of a model's set, stable while the set is unchanged.
    pub fn list_skin_ids(&self, model: SkinModel) -> Vec<SkinId> {
        self.refresh(model);
        self.cache.ids(model)
    }

    pub fn resolve(&self, model: SkinModel, skin_id: SkinId) -> Result<SkinCacheEntry, SkinError> {
        self.refresh(model);
        self.cache
            .get(model, skin_id)
            .ok_or(SkinError::NotFound { model, skin_id })
    }

    /// Restore the window at `start_index`, clamp it to the current set size,
    /// apply `direction` and return the visible entries.
    pub fn page(
        &self,
        model: SkinModel,
        start_index: usize,
        page_size: Option<usize>,
        direction: Option<PageDirection>,
    ) -> SkinPage {
        let ids = self.list_skin_ids(model);
        let mut state = PaginationState::with_state(
            start_index,
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            ids.len(),
        );
        if let Some(direction) = direction {
            state.advance(direction);
        }

        let entries = self.cache.entries(model, state.page(&ids));
        SkinPage {
            model,
            entries,
            state,
            controls: state.controls(),
        }
    }

    /// Resolve the skin an NPC currently renders with.
    ///
    /// Skins missing from the model's set (e.g. a player name that was never
    /// added to it) are described directly from the profile's reference.
    pub fn resolve_active(&self, npc_id: NpcId) -> Result<SkinCacheEntry, SkinError> {
        let profile = self
            .profiles
            .get(npc_id)
            .ok_or(SkinError::ProfileNotFound(npc_id))?;
        let reference = profile.skin();

        if let Some(active) = self.cache.active(npc_id) {
            if &active.reference == reference {
                return Ok(active);
            }
        }

        let model = profile.model();
        let entry = match reference.skin_id() {
            Some(skin_id) => {
                self.refresh(model);
                self.cache.get(model, skin_id)
            }
            None => None,
        }
        .unwrap_or_else(|| {
            SkinCacheEntry::from_descriptor(model, &SkinDescriptor::from_reference(reference.clone()))
        });

        self.cache.set_active(npc_id, entry.clone());

        // A removal or skin change may have landed while resolving.
        let still_current = self
            .profiles
            .get(npc_id)
            .is_some_and(|current| current.skin() == reference);
        if !still_current {
            self.cache.clear_active(npc_id);
            if !self.profiles.contains(npc_id) {
                return Err(SkinError::ProfileNotFound(npc_id));
            }
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockSkinSourcePort;
    use easynpc_domain::{ActionSettings, SkinKind, SkinReference, MAX_PAGE_SIZE};
    use std::sync::Mutex;

    fn custom_skins(count: usize) -> Vec<SkinDescriptor> {
        (0..count)
            .map(|_| {
                SkinDescriptor::from_reference(SkinReference::Custom {
                    skin_id: SkinId::new(),
                })
            })
            .collect()
    }

    fn catalog_with(skins: Vec<SkinDescriptor>) -> (SkinCatalog, Arc<ProfileStore>) {
        let mut source = MockSkinSourcePort::new();
        source.expect_snapshot().returning(move |_| skins.clone());
        let profiles = Arc::new(ProfileStore::new());
        let catalog = SkinCatalog::new(
            Arc::new(source),
            Arc::new(SkinCache::new()),
            profiles.clone(),
        );
        (catalog, profiles)
    }

    #[test]
    fn list_and_resolve() {
        let skins = custom_skins(3);
        let expected: Vec<SkinId> = skins.iter().map(|s| s.skin_id).collect();
        let (catalog, _) = catalog_with(skins);

        assert_eq!(catalog.list_skin_ids(SkinModel::Humanoid), expected);
        let entry = catalog
            .resolve(SkinModel::Humanoid, expected[2])
            .expect("known skin");
        assert_eq!(entry.kind(), SkinKind::Custom);

        let missing = SkinId::new();
        assert_eq!(
            catalog.resolve(SkinModel::Humanoid, missing),
            Err(SkinError::NotFound {
                model: SkinModel::Humanoid,
                skin_id: missing
            })
        );
    }

    #[test]
    fn pages_through_twelve_skins() {
        let (catalog, _) = catalog_with(custom_skins(12));

        let page = catalog.page(SkinModel::Humanoid, 0, None, Some(PageDirection::NextPage));
        assert_eq!(page.state.start_index(), 5);
        assert_eq!(page.entries.len(), 5);

        let page = catalog.page(SkinModel::Humanoid, 5, None, Some(PageDirection::NextPage));
        assert_eq!(page.state.start_index(), 7);
        assert!(!page.controls.next);
        assert!(page.controls.prev);

        let page = catalog.page(SkinModel::Humanoid, 7, None, Some(PageDirection::PrevPage));
        assert_eq!(page.state.start_index(), 2);
        assert!(page.controls.visible);
    }

    #[test]
    fn small_sets_hide_controls() {
        let (catalog, _) = catalog_with(custom_skins(3));
        let page = catalog.page(SkinModel::Humanoid, 0, Some(5), None);
        assert!(!page.controls.visible);
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.to_data().entries.len(), 3);
    }

    #[test]
    fn stale_start_index_is_clamped_after_shrink() {
        let sizes = Arc::new(Mutex::new(vec![4usize, 12]));
        let pool = custom_skins(12);
        let mut source = MockSkinSourcePort::new();
        let sizes_in_mock = sizes.clone();
        source.expect_snapshot().returning(move |_| {
            let len = sizes_in_mock.lock().expect("lock").pop().unwrap_or(4);
            pool[..len].to_vec()
        });
        let catalog = SkinCatalog::new(
            Arc::new(source),
            Arc::new(SkinCache::new()),
            Arc::new(ProfileStore::new()),
        );

        let page = catalog.page(SkinModel::Villager, 7, None, None);
        assert_eq!(page.state.start_index(), 7);

        // set shrank to 4 entries
        let page = catalog.page(SkinModel::Villager, 7, None, None);
        assert_eq!(page.state.start_index(), 0);
        assert_eq!(page.entries.len(), 4);
    }

    #[test]
    fn oversized_page_request_is_clamped() {
        let (catalog, _) = catalog_with(custom_skins(12));

        let page = catalog.page(
            SkinModel::Humanoid,
            usize::MAX,
            Some(usize::MAX),
            Some(PageDirection::NextPage),
        );
        assert_eq!(page.state.page_size(), MAX_PAGE_SIZE);
        assert_eq!(page.state.start_index(), 12);
        assert!(page.entries.is_empty());
        assert!(!page.controls.visible);

        let page = catalog.page(SkinModel::Humanoid, usize::MAX, None, Some(PageDirection::Next));
        assert_eq!(page.state.start_index(), 7);
        assert_eq!(page.entries.len(), 5);
    }

    #[test]
    fn removal_during_resolve_active_leaves_no_active_entry() {
        let skins = custom_skins(1);
        let listed = skins[0].clone();
        let profiles = Arc::new(ProfileStore::new());
        let npc_id = NpcId::new();
        profiles.spawn(npc_id, SkinModel::Humanoid, ActionSettings::default());
        profiles
            .apply_mutation(
                npc_id,
                easynpc_domain::ProfileMutation::ChangeSkin(listed.reference.clone()),
            )
            .expect("skin change");

        let mut source = MockSkinSourcePort::new();
        let removing = profiles.clone();
        source.expect_snapshot().returning(move |_| {
            removing.remove(npc_id);
            skins.clone()
        });
        let cache = Arc::new(SkinCache::new());
        let catalog = SkinCatalog::new(Arc::new(source), cache.clone(), profiles);

        assert_eq!(
            catalog.resolve_active(npc_id),
            Err(SkinError::ProfileNotFound(npc_id))
        );
        assert!(cache.active(npc_id).is_none());
    }

    #[test]
    fn resolve_active_describes_default_and_unlisted_skins() {
        let (catalog, profiles) = catalog_with(Vec::new());
        let npc_id = NpcId::new();
        profiles.spawn(npc_id, SkinModel::Cat, ActionSettings::default());

        let entry = catalog.resolve_active(npc_id).expect("active skin");
        assert_eq!(entry.kind(), SkinKind::Default);
        assert_eq!(entry.name, SkinModel::Cat.default_variant());

        let unknown = NpcId::new();
        assert_eq!(
            catalog.resolve_active(unknown),
            Err(SkinError::ProfileNotFound(unknown))
        );
    }

    #[test]
    fn resolve_active_prefers_listed_entry() {
        let skins = custom_skins(2);
        let listed = skins[1].clone();
        let (catalog, profiles) = catalog_with(skins);

        let npc_id = NpcId::new();
        profiles.spawn(npc_id, SkinModel::Humanoid, ActionSettings::default());
        profiles
            .apply_mutation(
                npc_id,
                easynpc_domain::ProfileMutation::ChangeSkin(listed.reference.clone()),
            )
            .expect("skin change");

        let entry = catalog.resolve_active(npc_id).expect("active skin");
        assert_eq!(entry.skin_id, listed.skin_id);
        assert_eq!(entry.texture, listed.texture);
    }
}
