//! Typed errors for template resource loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading template text from a [`crate::TemplateSource`].
///
/// These never escape [`crate::TemplateEngine::render`]; the engine logs them
/// and substitutes a diagnostic string instead.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No resource is registered under the requested key.
    #[error("Error finding resource: {key}")]
    Resource {
        /// Template key that was requested.
        key: String,
    },

    /// The resource exists but could not be read.
    #[error("Failed to read template '{}': {source}", path.display())]
    Io {
        /// Path of the template file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
