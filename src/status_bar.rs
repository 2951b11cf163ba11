//! Transient status text with delayed auto-clear.

use crate::presenter::UiContext;
use crate::task_queue::{DelayedTask, SerialQueue};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Status line driver.
///
/// Updates are serialized on the work queue. An update cancels any pending
/// auto-clear; a flashed message schedules a new one after `delay`. A clear
/// that was already due when cancelled still checks the update generation
/// and does nothing.
#[derive(Clone)]
pub struct StatusBar {
    queue: Arc<SerialQueue>,
    ui: UiContext,
    delay: Duration,
    pending: Arc<Mutex<Option<DelayedTask>>>,
    generation: Arc<AtomicU64>,
}

impl StatusBar {
    pub fn new(queue: Arc<SerialQueue>, ui: UiContext, delay: Duration) -> Self {
        Self {
            queue,
            ui,
            delay,
            pending: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Show `text`; with `cleanup` it is cleared again after the delay.
    pub fn update(&self, text: impl Into<String>, cleanup: bool) {
        let text = text.into();
        let this = self.clone();
        self.queue.exec(move || this.apply(text, cleanup));
    }

    /// Show `text` until the next update.
    pub fn set(&self, text: impl Into<String>) {
        self.update(text, false);
    }

    /// Show `text` and clear it after the delay.
    pub fn flash(&self, text: impl Into<String>) {
        self.update(text, true);
    }

    pub fn clear(&self) {
        self.update(String::new(), false);
    }

    fn apply(&self, text: String, cleanup: bool) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut pending = self.pending.lock();
        if let Some(task) = pending.take() {
            task.cancel();
        }
        if cleanup {
            let this = self.clone();
            *pending = Some(self.queue.exec_after(self.delay, move || {
                if this.generation.load(Ordering::SeqCst) == generation {
                    this.apply(String::new(), false);
                }
            }));
        }
        drop(pending);
        self.ui.set_status(text);
    }
}
