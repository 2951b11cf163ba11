//! Cancel-and-replace scheduling for edits that arrive in bursts.

use crate::task_queue::{DelayedTask, SerialQueue};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Coalesces bursts of calls so only the last one within `delay` runs.
///
/// Every [`Debouncer::schedule`] bumps a generation counter and cancels the
/// previous pending task; the task body also checks its generation before
/// acting, so a task that slipped past cancellation still does nothing.
pub struct Debouncer {
    queue: Arc<SerialQueue>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<DelayedTask>>,
}

impl Debouncer {
    pub fn new(queue: Arc<SerialQueue>, delay: Duration) -> Self {
        Self {
            queue,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Replace any pending task with `job`, to run after the delay.
    pub fn schedule(&self, job: impl FnOnce() + Send + 'static) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let task = self.queue.exec_after(self.delay, move || {
            if current.load(Ordering::SeqCst) == generation {
                job();
            }
        });
        *pending = Some(task);
    }

    /// Drop the pending task, if any.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.lock().take() {
            previous.cancel();
        }
    }
}
