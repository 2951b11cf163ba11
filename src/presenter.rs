//! Outbound side of the session: where rendered pages and status text go.

use crate::task_queue::SerialQueue;
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives everything the session shows to the user.
///
/// Calls always arrive on the UI queue, one at a time.
pub trait PresentationSink: Send + Sync {
    /// Replace the displayed document.
    fn present(&self, html: &str, base_url: &str);

    /// Replace the status line; an empty string clears it.
    fn set_status(&self, text: &str);

    /// Enable or disable the download action.
    fn set_download_enabled(&self, enabled: bool);
}

/// The UI-affinity queue paired with the sink it drives.
#[derive(Clone)]
pub struct UiContext {
    queue: Arc<SerialQueue>,
    sink: Arc<dyn PresentationSink>,
}

impl UiContext {
    pub fn new(queue: Arc<SerialQueue>, sink: Arc<dyn PresentationSink>) -> Self {
        Self { queue, sink }
    }

    pub fn queue(&self) -> &Arc<SerialQueue> {
        &self.queue
    }

    /// Run `f` against the sink on the UI queue.
    pub fn post(&self, f: impl FnOnce(&dyn PresentationSink) + Send + 'static) {
        let sink = Arc::clone(&self.sink);
        self.queue.exec(move || f(sink.as_ref()));
    }

    pub fn present(&self, html: String, base_url: String) {
        self.post(move |sink| sink.present(&html, &base_url));
    }

    /// Present a document, then run `loaded` on the UI queue once the sink
    /// has returned from [`PresentationSink::present`].
    pub fn present_then(
        &self,
        html: String,
        base_url: String,
        loaded: impl FnOnce() + Send + 'static,
    ) {
        self.post(move |sink| {
            sink.present(&html, &base_url);
            loaded();
        });
    }

    pub fn set_status(&self, text: String) {
        self.post(move |sink| sink.set_status(&text));
    }

    pub fn set_download_enabled(&self, enabled: bool) {
        self.post(move |sink| sink.set_download_enabled(enabled));
    }
}

#[derive(Debug, Default)]
struct Captured {
    document: Option<(String, String)>,
    documents: usize,
    statuses: Vec<String>,
    download_enabled: bool,
}

/// A sink that records what it was asked to show.
///
/// Used by the command-line front end to collect the final page, and by
/// tests to observe the session.
#[derive(Debug, Default)]
pub struct CapturingSink {
    inner: Mutex<Captured>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently presented document.
    pub fn document(&self) -> Option<String> {
        self.inner.lock().document.as_ref().map(|(html, _)| html.clone())
    }

    /// Base URL of the most recently presented document.
    pub fn base_url(&self) -> Option<String> {
        self.inner.lock().document.as_ref().map(|(_, base)| base.clone())
    }

    /// Number of documents presented so far.
    pub fn document_count(&self) -> usize {
        self.inner.lock().documents
    }

    /// Every status text set, in order (including clears).
    pub fn status_history(&self) -> Vec<String> {
        self.inner.lock().statuses.clone()
    }

    /// Current status text.
    pub fn status(&self) -> String {
        self.inner.lock().statuses.last().cloned().unwrap_or_default()
    }

    pub fn download_enabled(&self) -> bool {
        self.inner.lock().download_enabled
    }
}

impl PresentationSink for CapturingSink {
    fn present(&self, html: &str, base_url: &str) {
        let mut inner = self.inner.lock();
        inner.document = Some((html.to_string(), base_url.to_string()));
        inner.documents += 1;
    }

    fn set_status(&self, text: &str) {
        if !text.is_empty() {
            log::debug!("Status: {}", text);
        }
        self.inner.lock().statuses.push(text.to_string());
    }

    fn set_download_enabled(&self, enabled: bool) {
        self.inner.lock().download_enabled = enabled;
    }
}
