// Library exports for testing and the command-line front end.
//
// # Queue Usage Policy
//
// Session state is owned by single-worker serial queues (`task_queue`), not
// by locks shared across threads:
//
//   - search queue: query, filter, sort, sample and page state; rendering.
//   - work queue: the selection set and status bar updates. Other queues
//     read the selection with a blocking `sync`.
//   - download queue: batch downloads, kept off the search and work queues.
//   - ui queue: every call into the presentation sink.
//
// `parking_lot::Mutex` guards the state each queue owns; it is only ever
// locked from that queue's worker, or briefly by the debouncer.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Copyright line shown on the welcome page.
pub const COPYRIGHT: &str = "Copyright © 2017 Jason Stapels";

#[macro_use]
pub mod debug;

pub mod app;
pub mod browser;
pub mod cli;
pub mod debounce;
pub mod download;
pub mod error;
pub mod events;
pub mod pagination;
pub mod presenter;
pub mod render;
pub mod selection;
pub mod status_bar;
pub mod task_queue;

pub use browser::{Browser, BrowserOptions};
pub use download::{DownloadHandle, DownloadReport, FontWriter, FsWriter};
pub use error::BrowserError;
pub use events::UiMessage;
pub use presenter::{CapturingSink, PresentationSink};
pub use selection::{SelectionSet, SelectionStore};
