//! Errors raised by the browser session.

use gofont_catalog::CatalogError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures inside the session layer.
///
/// Every one of these is reported (logged or returned to the caller) and the
/// session keeps running.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A downloaded font could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A selected font delivered no data.
    #[error("Download failed: {0}")]
    Download(String),

    /// An inbound UI message had the wrong shape.
    #[error("Invalid UI event: {0}")]
    Event(String),

    /// A serial queue could not be started or has shut down.
    #[error("Task queue error: {0}")]
    Queue(String),
}
