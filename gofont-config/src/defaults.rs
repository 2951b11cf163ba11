//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields and by `impl Default for Config`.

use gofont_catalog::FontSort;

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

// ── Catalog ────────────────────────────────────────────────────────────────

/// Resolved from the environment when the config is loaded.
pub fn google_fonts_api_key() -> String {
    "${GOOGLE_FONTS_API_KEY}".to_string()
}

pub fn google_fonts_url() -> String {
    gofont_catalog::DEFAULT_GOOGLE_FONTS_URL.to_string()
}

pub fn default_sort() -> FontSort {
    FontSort::Popularity
}

// ── Page ───────────────────────────────────────────────────────────────────

pub fn page_size() -> usize {
    20
}

pub fn font_size() -> String {
    "12pt".to_string()
}

// ── Timing ─────────────────────────────────────────────────────────────────

pub fn search_delay_ms() -> u64 {
    250
}

pub fn sample_delay_ms() -> u64 {
    10
}

pub fn status_delay_ms() -> u64 {
    3000
}
