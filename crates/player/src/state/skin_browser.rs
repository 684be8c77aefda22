//! Paged skin selection view-model.

use easynpc_domain::common::normalize_label;
use easynpc_domain::{
    NavigationControls, PaginationState, SkinId, SkinModel, DEFAULT_PAGE_SIZE,
};
use easynpc_shared::{SkinEntryData, SkinPageData};

/// Labels under skin previews are cut to this many characters.
pub const SKIN_LABEL_LENGTH: usize = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct SkinBrowser {
    model: SkinModel,
    state: PaginationState,
    entries: Vec<SkinEntryData>,
    active: Option<SkinId>,
}

impl SkinBrowser {
    pub fn new(model: SkinModel) -> Self {
        Self {
            model,
            state: PaginationState::new(DEFAULT_PAGE_SIZE),
            entries: Vec::new(),
            active: None,
        }
    }

    pub fn model(&self) -> SkinModel {
        self.model
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn controls(&self) -> NavigationControls {
        self.state.controls()
    }

    /// Entries of the current page.
    pub fn entries(&self) -> &[SkinEntryData] {
        &self.entries
    }

    /// Adopt a page returned by the engine.
    pub fn apply_page(&mut self, page: SkinPageData) {
        self.state = page.state;
        self.entries = page.entries;
    }

    /// Record a new set size. When it changed the window is re-clamped and
    /// the current entries are stale.
    pub fn observe_total(&mut self, total_count: usize) -> bool {
        let changed = self.state.observe_total(total_count);
        if changed {
            tracing::debug!(model = %self.model, total_count, "Skin set size changed");
        }
        changed
    }

    pub fn set_active(&mut self, skin_id: Option<SkinId>) {
        self.active = skin_id;
    }

    pub fn is_active(&self, skin_id: SkinId) -> bool {
        self.active == Some(skin_id)
    }

    /// Labels for the visible entries.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| normalize_label(&entry.name, SKIN_LABEL_LENGTH))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easynpc_domain::SkinKind;

    fn entry(model: SkinModel) -> SkinEntryData {
        SkinEntryData {
            skin_id: SkinId::new(),
            model,
            kind: SkinKind::Custom,
            name: "custom".to_string(),
            texture: "custom/skin.png".to_string(),
        }
    }

    #[test]
    fn long_skin_names_are_shortened() {
        let mut browser = SkinBrowser::new(SkinModel::Humanoid);
        let mut long = entry(SkinModel::Humanoid);
        long.name = "abcdefghijklmnop".to_string();
        browser.apply_page(SkinPageData {
            model: SkinModel::Humanoid,
            entries: vec![entry(SkinModel::Humanoid), long],
            state: PaginationState::with_state(0, DEFAULT_PAGE_SIZE, 2),
            controls: NavigationControls::default(),
        });
        assert_eq!(browser.labels(), vec!["custom", "abcdefghij…"]);
    }

    #[test]
    fn shrinking_set_pulls_the_window_back() {
        let mut browser = SkinBrowser::new(SkinModel::Humanoid);
        browser.apply_page(SkinPageData {
            model: SkinModel::Humanoid,
            entries: vec![entry(SkinModel::Humanoid)],
            state: PaginationState::with_state(7, DEFAULT_PAGE_SIZE, 12),
            controls: NavigationControls::default(),
        });
        assert_eq!(browser.state().start_index(), 7);

        assert!(browser.observe_total(9));
        assert_eq!(browser.state().start_index(), 4);
        assert!(!browser.observe_total(9));
    }

    #[test]
    fn active_skin_is_highlighted() {
        let mut browser = SkinBrowser::new(SkinModel::Humanoid);
        let shown = entry(SkinModel::Humanoid);
        let skin_id = shown.skin_id;
        browser.apply_page(SkinPageData {
            model: SkinModel::Humanoid,
            entries: vec![shown],
            state: PaginationState::with_state(0, DEFAULT_PAGE_SIZE, 1),
            controls: NavigationControls::default(),
        });
        browser.set_active(Some(skin_id));
        assert!(browser.is_active(skin_id));
        assert!(!browser.controls().visible);
        assert_eq!(browser.labels().len(), 1);
    }
}
