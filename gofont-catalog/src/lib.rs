//! Font catalog model, providers and aggregation for gofont.
//!
//! Provides:
//! - `model`: value types for categories, weights, styles, sort modes and
//!   the `SelectedFont` selection key
//! - `family`: the `FontFamily` / `FontVariant` capability traits
//! - `handler`: the `FontHandler` provider abstraction
//! - `manager`: `FontManager`, which merges and filters results from every
//!   registered provider
//! - `google`: the Google Fonts provider
//! - `http`: the fetch collaborator used by providers

pub mod error;
pub mod family;
pub mod google;
pub mod handler;
pub mod http;
pub mod manager;
pub mod model;

pub use error::CatalogError;
pub use family::{FontFamily, FontVariant, describe_variant, escape_html, escape_js_string};
pub use google::{
    DEFAULT_GOOGLE_FONTS_URL, GoogleFontFamily, GoogleFontVariant, GoogleFonts, GoogleFontsOptions,
    catalog_url,
};
pub use handler::{FontHandler, matches_search};
pub use http::{Fetcher, HttpFetcher, StaticFetcher};
pub use manager::{FontFilter, FontManager, FontQuery};
pub use model::{FontCategory, FontSort, FontStyle, FontWeight, SelectedFont};
