//! Value types describing catalog entries.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Broad classification reported by a provider for each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    Serif,
    SansSerif,
    Display,
    Handwriting,
    Monospace,
    Unknown,
}

impl FontCategory {
    /// Every category, in display order.
    pub const ALL: [FontCategory; 6] = [
        FontCategory::Serif,
        FontCategory::SansSerif,
        FontCategory::Display,
        FontCategory::Handwriting,
        FontCategory::Monospace,
        FontCategory::Unknown,
    ];

    /// Raw token used by provider APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontCategory::Serif => "serif",
            FontCategory::SansSerif => "sans-serif",
            FontCategory::Display => "display",
            FontCategory::Handwriting => "handwriting",
            FontCategory::Monospace => "monospace",
            FontCategory::Unknown => "unknown",
        }
    }

    /// Map a provider category string, falling back to [`FontCategory::Unknown`].
    pub fn from_api(token: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == token)
            .unwrap_or(FontCategory::Unknown)
    }
}

impl fmt::Display for FontCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == token || (token == "sans" && *c == FontCategory::SansSerif))
            .ok_or_else(|| CatalogError::Lookup(format!("unknown font category '{s}'")))
    }
}

/// Font weight, ordered by a fixed rank from thin to black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Every weight, lightest first.
    pub const ALL: [FontWeight; 9] = [
        FontWeight::Thin,
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Normal,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
        FontWeight::Black,
    ];

    /// Position in the thin..black ordering.
    pub fn rank(&self) -> u8 {
        match self {
            FontWeight::Thin => 0,
            FontWeight::ExtraLight => 1,
            FontWeight::Light => 2,
            FontWeight::Normal => 3,
            FontWeight::Medium => 4,
            FontWeight::SemiBold => 5,
            FontWeight::Bold => 6,
            FontWeight::ExtraBold => 7,
            FontWeight::Black => 8,
        }
    }

    /// Raw token as it appears in variant ids (`"700"`, or `"regular"` for normal).
    pub fn raw(&self) -> &'static str {
        match self {
            FontWeight::Thin => "100",
            FontWeight::ExtraLight => "200",
            FontWeight::Light => "300",
            FontWeight::Normal => "regular",
            FontWeight::Medium => "500",
            FontWeight::SemiBold => "600",
            FontWeight::Bold => "700",
            FontWeight::ExtraBold => "800",
            FontWeight::Black => "900",
        }
    }

    /// Numeric CSS `font-weight` value.
    pub fn css_value(&self) -> u16 {
        (self.rank() as u16 + 1) * 100
    }

    /// Human readable label (`"semi bold"`).
    pub fn label(&self) -> &'static str {
        match self {
            FontWeight::Thin => "thin",
            FontWeight::ExtraLight => "extra light",
            FontWeight::Light => "light",
            FontWeight::Normal => "normal",
            FontWeight::Medium => "medium",
            FontWeight::SemiBold => "semi bold",
            FontWeight::Bold => "bold",
            FontWeight::ExtraBold => "extra bold",
            FontWeight::Black => "black",
        }
    }

    /// Token used in downloaded file names (`"SemiBold"`).
    pub fn file_token(&self) -> &'static str {
        match self {
            FontWeight::Thin => "Thin",
            FontWeight::ExtraLight => "ExtraLight",
            FontWeight::Light => "Light",
            FontWeight::Normal => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::SemiBold => "SemiBold",
            FontWeight::Bold => "Bold",
            FontWeight::ExtraBold => "ExtraBold",
            FontWeight::Black => "Black",
        }
    }

    /// Look up a weight by its raw variant-id token.
    pub fn from_raw(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.raw() == token)
    }
}

impl Ord for FontWeight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for FontWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FontWeight {
    type Err = CatalogError;

    /// Accepts the raw token (`"700"`, `"regular"`), the CSS value
    /// (`"400"`) or the label with spaces, hyphens or nothing between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let squashed: String = token.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        Self::ALL
            .into_iter()
            .find(|w| {
                w.raw() == token
                    || w.css_value().to_string() == token
                    || w.label().replace(' ', "") == squashed
            })
            .ok_or_else(|| CatalogError::Lookup(format!("unknown font weight '{s}'")))
    }
}

/// Upright or italic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[serde(rename = "normal")]
    Regular,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 2] = [FontStyle::Regular, FontStyle::Italic];

    pub fn rank(&self) -> u8 {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Italic => 1,
        }
    }

    /// Raw token, also the CSS `font-style` value.
    pub fn raw(&self) -> &'static str {
        match self {
            FontStyle::Regular => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl Ord for FontStyle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for FontStyle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl FromStr for FontStyle {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "regular" | "upright" => Ok(FontStyle::Regular),
            "italic" => Ok(FontStyle::Italic),
            _ => Err(CatalogError::Lookup(format!("unknown font style '{s}'"))),
        }
    }
}

/// Result ordering offered by providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSort {
    Alpha,
    Newest,
    #[default]
    Popularity,
    Trending,
}

impl FontSort {
    pub const ALL: [FontSort; 4] = [
        FontSort::Alpha,
        FontSort::Newest,
        FontSort::Popularity,
        FontSort::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSort::Alpha => "alpha",
            FontSort::Newest => "newest",
            FontSort::Popularity => "popularity",
            FontSort::Trending => "trending",
        }
    }
}

impl fmt::Display for FontSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSort {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "alpha" | "alphabetical" | "name" => Ok(FontSort::Alpha),
            "newest" | "date" => Ok(FontSort::Newest),
            "popularity" | "popular" => Ok(FontSort::Popularity),
            "trending" => Ok(FontSort::Trending),
            _ => Err(CatalogError::Lookup(format!("unknown sort mode '{s}'"))),
        }
    }
}

/// Selection key for one variant of one family.
///
/// Identity is the `(family, variant_id)` pair; ordering is by family name,
/// then variant id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectedFont {
    family: String,
    variant_id: String,
}

impl SelectedFont {
    pub fn new(family: impl Into<String>, variant_id: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            variant_id: variant_id.into(),
        }
    }

    /// Parse a `"<familyName>|<variantId>"` id posted by the page.
    pub fn parse_id(id: &str) -> Result<Self, CatalogError> {
        match id.split_once('|') {
            Some((family, variant)) if !family.is_empty() && !variant.is_empty() => {
                Ok(Self::new(family, variant))
            }
            _ => Err(CatalogError::Lookup(format!("malformed font id '{id}'"))),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    /// The `"<familyName>|<variantId>"` form used by the page.
    pub fn font_id(&self) -> String {
        format!("{}|{}", self.family, self.variant_id)
    }
}

impl fmt::Display for SelectedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.family, self.variant_id)
    }
}
