//! The cross-search selection set and its serialized store.

use crate::error::BrowserError;
use crate::presenter::UiContext;
use crate::task_queue::SerialQueue;
use gofont_catalog::SelectedFont;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A true set of selected `(family, variant)` keys, kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    fonts: BTreeSet<SelectedFont>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `font`; returns false if it was already present.
    pub fn select(&mut self, font: SelectedFont) -> bool {
        self.fonts.insert(font)
    }

    /// Remove `font`; returns false if it was not present.
    pub fn unselect(&mut self, font: &SelectedFont) -> bool {
        self.fonts.remove(font)
    }

    pub fn contains(&self, font: &SelectedFont) -> bool {
        self.fonts.contains(font)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedFont> {
        self.fonts.iter()
    }

    /// Distinct family names represented in the selection.
    pub fn family_names(&self) -> BTreeSet<String> {
        self.fonts.iter().map(|f| f.family().to_string()).collect()
    }

    /// Selected variant ids within `family` (possibly empty).
    pub fn variant_ids(&self, family: &str) -> BTreeSet<String> {
        self.fonts
            .iter()
            .filter(|f| f.family() == family)
            .map(|f| f.variant_id().to_string())
            .collect()
    }

    /// Empty the set, returning its contents in key order.
    pub fn take_all(&mut self) -> Vec<SelectedFont> {
        std::mem::take(&mut self.fonts).into_iter().collect()
    }
}

/// The selection set, owned by the work queue.
///
/// Every read and write is a round-trip onto that queue, so callers on other
/// threads never see the set mid-mutation. Edits post the download-enabled
/// flag from the work queue too, so the UI sees flag changes in edit order.
#[derive(Clone)]
pub struct SelectionStore {
    queue: Arc<SerialQueue>,
    ui: UiContext,
    set: Arc<Mutex<SelectionSet>>,
}

impl SelectionStore {
    pub fn new(queue: Arc<SerialQueue>, ui: UiContext) -> Self {
        Self {
            queue,
            ui,
            set: Arc::new(Mutex::new(SelectionSet::new())),
        }
    }

    fn with_set<R: Send + 'static>(
        &self,
        f: impl FnOnce(&mut SelectionSet) -> R + Send + 'static,
    ) -> Result<R, BrowserError> {
        let set = Arc::clone(&self.set);
        self.queue.sync(move || f(&mut set.lock()))
    }

    /// Add `font` and enable downloads; returns whether it was new.
    pub fn select(&self, font: SelectedFont) -> Result<bool, BrowserError> {
        let ui = self.ui.clone();
        self.with_set(move |set| {
            let added = set.select(font);
            ui.set_download_enabled(true);
            added
        })
    }

    /// Remove `font`; downloads stay enabled while anything is selected.
    /// Returns whether the selection is non-empty afterwards.
    pub fn unselect(&self, font: SelectedFont) -> Result<bool, BrowserError> {
        let ui = self.ui.clone();
        self.with_set(move |set| {
            set.unselect(&font);
            let enabled = !set.is_empty();
            ui.set_download_enabled(enabled);
            enabled
        })
    }

    pub fn family_names(&self) -> Result<BTreeSet<String>, BrowserError> {
        self.with_set(|set| set.family_names())
    }

    pub fn variant_ids(&self, family: &str) -> Result<BTreeSet<String>, BrowserError> {
        let family = family.to_string();
        self.with_set(move |set| set.variant_ids(&family))
    }

    /// A consistent copy of the whole set.
    pub fn snapshot(&self) -> Result<SelectionSet, BrowserError> {
        self.with_set(|set| set.clone())
    }

    /// Atomically take and clear the selection, sorted by key, and disable
    /// downloads.
    pub fn take_all(&self) -> Result<Vec<SelectedFont>, BrowserError> {
        let ui = self.ui.clone();
        self.with_set(move |set| {
            let fonts = set.take_all();
            ui.set_download_enabled(false);
            fonts
        })
    }
}
