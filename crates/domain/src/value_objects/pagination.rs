//! Paging over a skin set of changing size
//!
//! The state is a sliding window `[start_index, start_index + page_size)`
//! over an ordered id list. `NEXT`/`PREV` move by one entry, the page
//! directions move by a whole page.

use serde::{Deserialize, Serialize};

/// Number of entries shown per page by the selection screens.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Largest page a client may ask for.
pub const MAX_PAGE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Next,
    Prev,
    NextPage,
    PrevPage,
}

/// Visibility and enablement of the four navigation buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationControls {
    pub visible: bool,
    pub next: bool,
    pub prev: bool,
    pub next_page: bool,
    pub prev_page: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    start_index: usize,
    page_size: usize,
    total_count: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// A window at the start of an empty set. The page size is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(page_size: usize) -> Self {
        Self {
            start_index: 0,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            total_count: 0,
        }
    }

    /// Restore a window, clamping the start index into range.
    pub fn with_state(start_index: usize, page_size: usize, total_count: usize) -> Self {
        let mut state = Self {
            start_index,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            total_count,
        };
        state.clamp();
        state
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Largest start index that still shows a full page.
    pub fn last_start(&self) -> usize {
        self.total_count.saturating_sub(self.page_size)
    }

    /// Move the window.
    pub fn advance(&mut self, direction: PageDirection) {
        match direction {
            PageDirection::Next => {
                if self.start_index < self.last_start() {
                    self.start_index += 1;
                }
            }
            PageDirection::Prev => {
                if self.start_index > 0 {
                    self.start_index -= 1;
                }
            }
            PageDirection::NextPage => {
                if self.total_count <= self.page_size {
                    // only reachable when the controls are hidden
                    self.start_index = self.total_count;
                } else {
                    let next = self.start_index.saturating_add(self.page_size);
                    self.start_index = if next.saturating_add(self.page_size) > self.total_count {
                        self.last_start()
                    } else {
                        next
                    };
                }
            }
            PageDirection::PrevPage => {
                self.start_index = self.start_index.saturating_sub(self.page_size);
            }
        }
    }

    /// Record a freshly observed total. Returns true if it changed, in which
    /// case the start index is pulled back onto the last full page.
    pub fn observe_total(&mut self, total_count: usize) -> bool {
        if total_count == self.total_count {
            return false;
        }
        self.total_count = total_count;
        self.clamp();
        true
    }

    fn clamp(&mut self) {
        self.start_index = self.start_index.min(self.last_start());
    }

    pub fn controls(&self) -> NavigationControls {
        let visible = self.total_count > self.page_size;
        let has_more = self.start_index.saturating_add(self.page_size) < self.total_count;
        let has_less = self.start_index > 0;
        NavigationControls {
            visible,
            next: visible && has_more,
            prev: visible && has_less,
            next_page: visible && has_more,
            prev_page: visible && has_less,
        }
    }

    /// The visible part of `items`; empty when the window is past the end.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index.min(items.len());
        let end = self.start_index.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Range of absolute indices currently visible.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.start_index.min(self.total_count);
        let end = self.start_index.saturating_add(self.page_size).min(self.total_count);
        start..end
    }
}
