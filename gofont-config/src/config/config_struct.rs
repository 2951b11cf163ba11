//! Core `Config` struct definition.

use crate::types::LogLevel;
use gofont_catalog::FontSort;
use serde::{Deserialize, Serialize};

/// Browser configuration, stored as YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Catalog
    // ========================================================================
    /// Google Fonts Developer API key.
    ///
    /// `${GOOGLE_FONTS_API_KEY}` by default, resolved from the environment.
    #[serde(default = "crate::defaults::google_fonts_api_key")]
    pub google_fonts_api_key: String,

    /// Developer API listing endpoint.
    #[serde(default = "crate::defaults::google_fonts_url")]
    pub google_fonts_url: String,

    /// Sort mode selected at start-up.
    #[serde(default = "crate::defaults::default_sort")]
    pub default_sort: FontSort,

    // ========================================================================
    // Page
    // ========================================================================
    /// Families shown per page (must be at least 1).
    #[serde(default = "crate::defaults::page_size")]
    pub page_size: usize,

    /// CSS font size for sample text (e.g. "12pt", "18px").
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: String,

    /// Fixed sample text; a random pangram is chosen when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_text: Option<String>,

    /// Directory containing replacement HTML templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_directory: Option<String>,

    // ========================================================================
    // Timing
    // ========================================================================
    /// Debounce delay for search text edits.
    #[serde(default = "crate::defaults::search_delay_ms")]
    pub search_delay_ms: u64,

    /// Debounce delay for sample text and size edits.
    #[serde(default = "crate::defaults::sample_delay_ms")]
    pub sample_delay_ms: u64,

    /// How long a status message stays up before it is cleared.
    #[serde(default = "crate::defaults::status_delay_ms")]
    pub status_delay_ms: u64,

    // ========================================================================
    // Downloads
    // ========================================================================
    /// Destination for downloaded font files (`~` is expanded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_directory: Option<String>,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Controls verbosity of the debug log file.
    /// Environment variable RUST_LOG and --log-level CLI flag take precedence.
    #[serde(default)]
    pub log_level: LogLevel,

    // ========================================================================
    // Security
    // ========================================================================
    /// Resolve every `${VAR}` reference, not only allowlisted ones.
    #[serde(default = "crate::defaults::bool_false")]
    pub allow_all_env_vars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_fonts_api_key: crate::defaults::google_fonts_api_key(),
            google_fonts_url: crate::defaults::google_fonts_url(),
            default_sort: crate::defaults::default_sort(),
            page_size: crate::defaults::page_size(),
            font_size: crate::defaults::font_size(),
            sample_text: None,
            template_directory: None,
            search_delay_ms: crate::defaults::search_delay_ms(),
            sample_delay_ms: crate::defaults::sample_delay_ms(),
            status_delay_ms: crate::defaults::status_delay_ms(),
            download_directory: None,
            log_level: LogLevel::default(),
            allow_all_env_vars: crate::defaults::bool_false(),
        }
    }
}
