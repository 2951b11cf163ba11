//! The browsing session: search state, selection and downloads wired onto
//! their serial queues.
//!
//! Four queues are involved:
//! - `search`: query, filter, sort, sample and page state, plus rendering
//! - `work`: the selection set and status bar updates
//! - `download`: batch downloads
//! - `ui`: every call into the [`PresentationSink`]
//!
//! Public methods only enqueue work (or round-trip through a queue), so they
//! can be called from any thread.

use crate::debounce::Debouncer;
use crate::download::{DownloadHandle, Downloader, FontWriter, FsWriter};
use crate::error::BrowserError;
use crate::events::UiMessage;
use crate::presenter::{PresentationSink, UiContext};
use crate::render::{PageRequest, SampleSettings, compose_page, compose_welcome};
use crate::selection::{SelectionSet, SelectionStore};
use crate::status_bar::StatusBar;
use crate::task_queue::SerialQueue;
use gofont_catalog::{
    FontCategory, FontFamily, FontFilter, FontHandler, FontManager, FontQuery, FontSort, FontStyle,
    FontWeight, SelectedFont,
};
use gofont_config::Config;
use gofont_template::TemplateEngine;
use parking_lot::Mutex;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Sample sentences, one of which is picked at random per session.
pub const PANGRAMS: [&str; 7] = [
    "Grumpy wizards make toxic brew for the evil Queen and Jack.",
    "The quick brown fox jumps over the lazy dog.",
    "Jack amazed a few girls by dropping the antique onyx vase.",
    "Six crazy kings vowed to abolish my quite pitiful jousts.",
    "Five or six big jet planes zoomed quickly by the tower.",
    "My grandfather picks up quartz and valuable onyx jewels.",
    "Pack my box with five dozen liquor jugs.",
];

pub const SEARCHING: &str = "Searching...";
pub const LOADING: &str = "Loading...";

/// Pick a random pangram.
pub fn random_pangram() -> &'static str {
    PANGRAMS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PANGRAMS[0])
}

/// Session settings.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub page_size: usize,
    pub font_size: String,
    /// Default sample text; a random pangram when `None`.
    pub sample_text: Option<String>,
    pub sort: FontSort,
    pub search_delay: Duration,
    pub sample_delay: Duration,
    pub status_delay: Duration,
    pub version: String,
    pub copyright: String,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            page_size: gofont_config::defaults::page_size(),
            font_size: gofont_config::defaults::font_size(),
            sample_text: None,
            sort: FontSort::default(),
            search_delay: Duration::from_millis(gofont_config::defaults::search_delay_ms()),
            sample_delay: Duration::from_millis(gofont_config::defaults::sample_delay_ms()),
            status_delay: Duration::from_millis(gofont_config::defaults::status_delay_ms()),
            version: crate::VERSION.to_string(),
            copyright: crate::COPYRIGHT.to_string(),
        }
    }
}

impl BrowserOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            font_size: config.font_size.clone(),
            sample_text: config.sample_text.clone().filter(|s| !s.trim().is_empty()),
            sort: config.default_sort,
            search_delay: config.search_delay(),
            sample_delay: config.sample_delay(),
            status_delay: config.status_delay(),
            ..Self::default()
        }
    }
}

/// State owned by the search queue.
struct SearchState {
    last_search: String,
    custom_text: String,
    font_size: String,
    sort: FontSort,
    filter: FontFilter,
    results: Vec<Arc<dyn FontFamily>>,
    page: usize,
}

struct Inner {
    manager: Arc<FontManager>,
    templates: Arc<TemplateEngine>,
    search_queue: Arc<SerialQueue>,
    work_queue: Arc<SerialQueue>,
    ui: UiContext,
    status: StatusBar,
    selection: SelectionStore,
    downloader: Downloader,
    state: Mutex<SearchState>,
    sample_text: String,
    page_size: usize,
    search_debounce: Debouncer,
    sample_debounce: Debouncer,
    size_debounce: Debouncer,
}

/// A font browsing session.
#[derive(Clone)]
pub struct Browser {
    inner: Arc<Inner>,
}

impl Browser {
    /// Start a session and show the welcome page.
    pub fn new(
        manager: Arc<FontManager>,
        templates: Arc<TemplateEngine>,
        sink: Arc<dyn PresentationSink>,
        options: BrowserOptions,
    ) -> Result<Self, BrowserError> {
        let search_queue = Arc::new(SerialQueue::new("search")?);
        let work_queue = Arc::new(SerialQueue::new("work")?);
        let download_queue = Arc::new(SerialQueue::new("download")?);
        let ui_queue = Arc::new(SerialQueue::new("ui")?);

        let ui = UiContext::new(ui_queue, sink);
        let status = StatusBar::new(Arc::clone(&work_queue), ui.clone(), options.status_delay);
        let selection = SelectionStore::new(Arc::clone(&work_queue), ui.clone());
        let downloader = Downloader::new(download_queue, Arc::clone(&manager), status.clone());

        let sample_text = options
            .sample_text
            .clone()
            .unwrap_or_else(|| random_pangram().to_string());
        log::info!("Sample text: {}", sample_text);

        let inner = Inner {
            search_debounce: Debouncer::new(Arc::clone(&search_queue), options.search_delay),
            sample_debounce: Debouncer::new(Arc::clone(&search_queue), options.sample_delay),
            size_debounce: Debouncer::new(Arc::clone(&search_queue), options.sample_delay),
            manager,
            templates,
            search_queue,
            work_queue,
            ui,
            status,
            selection,
            downloader,
            state: Mutex::new(SearchState {
                last_search: String::new(),
                custom_text: String::new(),
                font_size: options.font_size.clone(),
                sort: options.sort,
                filter: FontFilter::default(),
                results: Vec::new(),
                page: 1,
            }),
            sample_text,
            page_size: options.page_size.max(1),
        };

        let welcome = compose_welcome(&inner.templates, &options.version, &options.copyright);
        inner.ui.present(welcome, inner.templates.base_url());

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    fn on_search_queue(&self, job: impl FnOnce(&Inner) + Send + 'static) {
        let inner = Arc::clone(&self.inner);
        self.inner.search_queue.exec(move || job(&inner));
    }

    /// Register a provider, then re-run the current search.
    pub fn add_provider(&self, handler: Arc<dyn FontHandler>) {
        self.on_search_queue(move |inner| {
            let name = handler.name().to_string();
            inner.manager.add_handler(handler);
            inner.status.flash(format!("{name} Ready"));
            inner.perform_search();
        });
    }

    /// Show `text` in the status bar until the next update.
    pub fn set_status(&self, text: impl Into<String>) {
        self.inner.status.set(text);
    }

    /// Re-run the current query and show page 1.
    pub fn refresh(&self) {
        self.on_search_queue(|inner| inner.perform_search());
    }

    /// Search box edit; debounced.
    pub fn search_text_changed(&self, text: &str) {
        let input = text.trim().to_string();
        let inner = Arc::clone(&self.inner);
        self.inner
            .search_debounce
            .schedule(move || inner.search_for(input));
    }

    /// Search box submitted; runs without delay.
    pub fn submit_search(&self, text: &str) {
        let input = text.trim().to_string();
        self.inner.search_debounce.cancel();
        self.on_search_queue(move |inner| inner.search_for(input));
    }

    /// Sample text edit; debounced, re-renders without re-querying.
    pub fn sample_text_changed(&self, text: &str) {
        let input = text.trim().to_string();
        let inner = Arc::clone(&self.inner);
        self.inner
            .sample_debounce
            .schedule(move || inner.use_sample_text(input));
    }

    /// Sample text submitted; runs without delay.
    pub fn submit_sample_text(&self, text: &str) {
        let input = text.trim().to_string();
        self.inner.sample_debounce.cancel();
        self.on_search_queue(move |inner| inner.use_sample_text(input));
    }

    /// Sample size change (e.g. `"18pt"`); debounced.
    pub fn set_font_size(&self, size: &str) {
        let input = size.trim().to_string();
        let inner = Arc::clone(&self.inner);
        self.inner.size_debounce.schedule(move || {
            let changed = {
                let mut state = inner.state.lock();
                if !input.is_empty() && input != state.font_size {
                    state.font_size = input;
                    true
                } else {
                    false
                }
            };
            if changed {
                inner.update_view(None);
            }
        });
    }

    pub fn set_sort(&self, sort: FontSort) {
        self.on_search_queue(move |inner| {
            log::debug!("Sorting: {}", sort);
            inner.state.lock().sort = sort;
            inner.perform_search();
        });
    }

    /// Replace the category filter. An empty set is ignored.
    pub fn set_categories(&self, categories: HashSet<FontCategory>) {
        self.update_filter("category", categories.is_empty(), move |filter| {
            filter.categories = categories
        });
    }

    /// Replace the weight filter. An empty set is ignored.
    pub fn set_weights(&self, weights: HashSet<FontWeight>) {
        self.update_filter("weight", weights.is_empty(), move |filter| {
            filter.weights = weights
        });
    }

    /// Replace the style filter. An empty set is ignored.
    pub fn set_styles(&self, styles: HashSet<FontStyle>) {
        self.update_filter("style", styles.is_empty(), move |filter| filter.styles = styles);
    }

    fn update_filter(
        &self,
        kind: &str,
        empty: bool,
        apply: impl FnOnce(&mut FontFilter) + Send + 'static,
    ) {
        if empty {
            log::warn!("Ignoring empty {} filter; at least one value must stay selected", kind);
            return;
        }
        self.on_search_queue(move |inner| {
            apply(&mut inner.state.lock().filter);
            inner.perform_search();
        });
    }

    /// Handle a raw message from the page. Malformed messages are logged
    /// and dropped.
    pub fn handle_event(&self, name: &str, body: &serde_json::Value) {
        match UiMessage::parse(name, body) {
            Ok(message) => self.handle_message(message),
            Err(e) => log::error!("Dropping '{}' message: {}", name, e),
        }
    }

    pub fn handle_message(&self, message: UiMessage) {
        let result = match message {
            UiMessage::LoadPage(page) => {
                self.load_page(page);
                Ok(())
            }
            UiMessage::SelectFont(font) => self.select_font(font),
            UiMessage::UnselectFont(font) => self.unselect_font(font),
        };
        if let Err(e) = result {
            log::error!("Unable to apply UI message: {}", e);
        }
    }

    /// Show `page` of the current results.
    pub fn load_page(&self, page: usize) {
        self.on_search_queue(move |inner| inner.update_view(Some(page.max(1))));
    }

    /// Add a variant to the selection after checking it exists.
    pub fn select_font(&self, font: SelectedFont) -> Result<(), BrowserError> {
        self.inner.manager.resolve(&font)?;
        log::debug!("Selecting: {}", font);
        self.inner.selection.select(font)?;
        Ok(())
    }

    /// Remove a variant from the selection after checking it exists.
    pub fn unselect_font(&self, font: SelectedFont) -> Result<(), BrowserError> {
        self.inner.manager.resolve(&font)?;
        log::debug!("Unselecting: {}", font);
        self.inner.selection.unselect(font)?;
        Ok(())
    }

    /// Download every selected variant into `dir`.
    pub fn download_selected(&self, dir: impl Into<PathBuf>) -> Result<DownloadHandle, BrowserError> {
        self.download_selected_with(dir, Arc::new(FsWriter))
    }

    /// Like [`Browser::download_selected`] with a custom writer.
    ///
    /// The selection is snapshotted and cleared in one step before the batch
    /// is queued; selections made afterwards belong to the next batch.
    pub fn download_selected_with(
        &self,
        dir: impl Into<PathBuf>,
        writer: Arc<dyn FontWriter>,
    ) -> Result<DownloadHandle, BrowserError> {
        let dir = dir.into();
        let fonts = self.inner.selection.take_all()?;
        log::info!("Downloading {} fonts to {}", fonts.len(), dir.display());
        Ok(self.inner.downloader.start(fonts, dir, writer))
    }

    /// Consistent copy of the selection.
    pub fn selection_snapshot(&self) -> Result<SelectionSet, BrowserError> {
        self.inner.selection.snapshot()
    }

    /// Page currently shown.
    pub fn current_page(&self) -> Result<usize, BrowserError> {
        let inner = Arc::clone(&self.inner);
        self.inner.search_queue.sync(move || inner.state.lock().page)
    }

    /// Number of families in the current result set.
    pub fn result_count(&self) -> Result<usize, BrowserError> {
        let inner = Arc::clone(&self.inner);
        self.inner.search_queue.sync(move || inner.state.lock().results.len())
    }

    /// Names of the families in the current result set, in order.
    pub fn result_names(&self) -> Result<Vec<String>, BrowserError> {
        let inner = Arc::clone(&self.inner);
        self.inner.search_queue.sync(move || {
            inner
                .state
                .lock()
                .results
                .iter()
                .map(|f| f.name().to_string())
                .collect()
        })
    }

    /// Block until pending searches (including debounced ones) have run and
    /// their output has reached the sink.
    pub fn wait_idle(&self) -> Result<(), BrowserError> {
        self.inner.search_queue.settle()?;
        self.inner.work_queue.barrier()?;
        self.inner.ui.queue().barrier()?;
        // A presented page clears "Loading..." back through the work queue.
        self.inner.work_queue.barrier()?;
        self.inner.ui.queue().barrier()
    }
}

impl Inner {
    fn search_for(&self, input: String) {
        {
            let mut state = self.state.lock();
            if input == state.last_search {
                return;
            }
            state.last_search = input;
        }
        self.perform_search();
    }

    fn use_sample_text(&self, input: String) {
        {
            let mut state = self.state.lock();
            if input == state.custom_text {
                return;
            }
            state.custom_text = input;
        }
        self.update_view(None);
    }

    /// Query every provider with the current state and show page 1.
    fn perform_search(&self) {
        self.search_debounce.cancel();
        self.status.set(SEARCHING);

        let query = {
            let state = self.state.lock();
            FontQuery::new(state.last_search.clone(), state.sort).with_filter(state.filter.clone())
        };
        crate::debug_info!(
            "SEARCH",
            "Searching for '{}' sorted by {}",
            query.search,
            query.sort
        );
        let results = self.manager.query_fonts(&query);
        log::info!("Search '{}' matched {} families", query.search, results.len());
        self.state.lock().results = results;

        self.status.clear();
        self.update_view(Some(1));
    }

    /// Render the current results at `page` (or the current page) and
    /// present them. "Loading..." shows until the sink has taken the page.
    fn update_view(&self, page: Option<usize>) {
        self.status.set(LOADING);
        let selection = match self.selection.snapshot() {
            Ok(selection) => selection,
            Err(e) => {
                log::error!("Unable to read selection: {}", e);
                SelectionSet::new()
            }
        };

        let html = {
            let mut state = self.state.lock();
            if let Some(page) = page {
                state.page = page;
            }
            let sample = if state.custom_text.is_empty() {
                self.sample_text.as_str()
            } else {
                state.custom_text.as_str()
            };
            let request = PageRequest {
                results: &state.results,
                filter: &state.filter,
                page: state.page,
                page_size: self.page_size,
                sample: SampleSettings {
                    text: sample,
                    size: &state.font_size,
                },
            };
            compose_page(&self.templates, &self.manager, &request, &selection)
        };

        let status = self.status.clone();
        self.ui
            .present_then(html, self.templates.base_url(), move || status.clear());
    }
}
