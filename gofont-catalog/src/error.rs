//! Typed errors for catalog fetching, parsing and lookup.

use thiserror::Error;

/// Errors raised by providers and the catalog aggregator.
///
/// None of these are fatal: construction-time failures degrade a provider's
/// ordering to empty, and lookup or download failures are logged and the
/// affected item skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A catalog snapshot or font file could not be fetched.
    #[error("Network error fetching '{url}': {message}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Transport or status failure description.
        message: String,
    },

    /// A provider response could not be parsed.
    #[error("Failed to parse catalog response: {0}")]
    Parse(String),

    /// An unknown family name, variant id or malformed font id.
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

impl CatalogError {
    pub fn network(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CatalogError::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}
