//! Single-worker serial task queues.
//!
//! Each queue owns one named thread that drains a `tokio::sync::mpsc`
//! channel and runs submitted jobs strictly in order. Jobs can be queued
//! immediately ([`SerialQueue::exec`]), after a delay with cancellation
//! ([`SerialQueue::exec_after`]), or run as a blocking round-trip that
//! returns the job's result ([`SerialQueue::sync`]). A job that has started
//! always runs to completion.
//!
//! Delays are `tokio::time::sleep` tasks on a shared timer runtime; when a
//! delay elapses the job is forwarded into the queue's channel.

use crate::error::BrowserError;
use parking_lot::Mutex;
use std::sync::LazyLock;
use std::thread::ThreadId;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runtime driving every queue's delayed jobs. Never dropped.
static TIMER_RUNTIME: LazyLock<Result<Runtime, String>> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("gofont-timer")
        .enable_time()
        .build()
        .map_err(|e| e.to_string())
});

fn timer_runtime() -> Result<&'static Runtime, BrowserError> {
    TIMER_RUNTIME
        .as_ref()
        .map_err(|e| BrowserError::Queue(format!("failed to start timer runtime: {e}")))
}

/// Handle to a job scheduled with [`SerialQueue::exec_after`].
///
/// Cancelling before the delay elapses guarantees the job never runs.
#[derive(Debug)]
pub struct DelayedTask {
    handle: AbortHandle,
}

impl DelayedTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

/// A named queue backed by a single worker thread.
pub struct SerialQueue {
    name: String,
    sender: mpsc::UnboundedSender<Job>,
    runtime: &'static Runtime,
    timers: Mutex<Vec<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl SerialQueue {
    /// Start a queue whose worker thread is named `gofont-<name>`.
    pub fn new(name: &str) -> Result<Self, BrowserError> {
        let runtime = timer_runtime()?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker_name = name.to_string();
        let handle = std::thread::Builder::new()
            .name(format!("gofont-{name}"))
            .spawn(move || run_worker(&worker_name, receiver))
            .map_err(|e| BrowserError::Queue(format!("failed to spawn {name} queue: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            sender,
            runtime,
            timers: Mutex::new(Vec::new()),
            worker_id: handle.thread().id(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when called from this queue's worker thread.
    pub fn is_current(&self) -> bool {
        std::thread::current().id() == self.worker_id
    }

    fn stopped(&self) -> BrowserError {
        BrowserError::Queue(format!("{} queue has stopped", self.name))
    }

    /// Queue `job` to run after everything already queued.
    pub fn exec(&self, job: impl FnOnce() + Send + 'static) {
        if self.sender.send(Box::new(job)).is_err() {
            log::error!("Dropping job: {}", self.stopped());
        }
    }

    /// Queue `job` to run once `delay` has elapsed.
    pub fn exec_after(&self, delay: Duration, job: impl FnOnce() + Send + 'static) -> DelayedTask {
        crate::debug_trace!("QUEUE", "{}: job scheduled in {:?}", self.name, delay);
        let sender = self.sender.clone();
        let name = self.name.clone();
        let job: Job = Box::new(job);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(job).is_err() {
                log::debug!("{} queue stopped before a delayed job was due", name);
            }
        });

        let task = DelayedTask {
            handle: handle.abort_handle(),
        };
        let mut timers = self.timers.lock();
        timers.retain(|t| !t.is_finished());
        timers.push(handle);
        task
    }

    /// Run `job` on the queue and wait for its result.
    ///
    /// Called from the worker itself, the job runs inline so a job can
    /// round-trip into its own queue without deadlocking. Must not be called
    /// from inside an async task.
    pub fn sync<R: Send + 'static>(
        &self,
        job: impl FnOnce() -> R + Send + 'static,
    ) -> Result<R, BrowserError> {
        if self.is_current() {
            return Ok(job());
        }
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Box::new(move || {
                let _ = tx.send(job());
            }))
            .map_err(|_| self.stopped())?;
        rx.blocking_recv().map_err(|_| {
            BrowserError::Queue(format!("{} queue dropped a job before replying", self.name))
        })
    }

    /// Block until every job queued so far has run.
    pub fn barrier(&self) -> Result<(), BrowserError> {
        self.sync(|| ())
    }

    /// Block until every job queued so far has run and no delayed job is
    /// still waiting, including delayed jobs scheduled while settling.
    pub fn settle(&self) -> Result<(), BrowserError> {
        if self.is_current() {
            return Err(BrowserError::Queue(format!(
                "{} queue cannot wait for itself to settle",
                self.name
            )));
        }
        loop {
            self.barrier()?;
            let pending = std::mem::take(&mut *self.timers.lock());
            if pending.is_empty() {
                return Ok(());
            }
            for timer in pending {
                // An aborted timer resolves at once with a cancellation error.
                let _ = self.runtime.block_on(timer);
            }
        }
    }
}

impl std::fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialQueue").field("name", &self.name).finish()
    }
}

impl Drop for SerialQueue {
    fn drop(&mut self) {
        // The worker exits once every sender, including the timers', is gone.
        for timer in self.timers.lock().drain(..) {
            timer.abort();
        }
    }
}

fn run_worker(name: &str, mut receiver: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = receiver.blocking_recv() {
        job();
    }
    log::debug!("{} queue stopped", name);
}
