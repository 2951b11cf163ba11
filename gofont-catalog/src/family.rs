//! Capability traits implemented by each provider's family and variant types.

use crate::error::CatalogError;
use crate::model::{FontCategory, FontStyle, FontWeight};
use gofont_template::TemplateEngine;
use std::collections::BTreeSet;
use std::fmt;

/// Human description derived from weight and style alone.
///
/// Upright variants are described by their weight label; italic variants
/// append `"italic"`, except that a normal-weight italic is just `"italic"`.
pub fn describe_variant(weight: FontWeight, style: FontStyle) -> String {
    match (style, weight) {
        (FontStyle::Regular, weight) => weight.label().to_string(),
        (FontStyle::Italic, FontWeight::Normal) => "italic".to_string(),
        (FontStyle::Italic, weight) => format!("{} italic", weight.label()),
    }
}

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape quotes so a name can sit inside a single- or double-quoted JS string.
pub fn escape_js_string(text: &str) -> String {
    text.replace('\'', "\\'").replace('"', "\\\"")
}

/// One weight/style combination within a family.
pub trait FontVariant: Send + Sync + fmt::Debug {
    /// Provider-defined id, unique within the owning family (e.g. `"700italic"`).
    fn id(&self) -> &str;

    fn weight(&self) -> FontWeight;

    fn style(&self) -> FontStyle;

    /// Canonical file name used when the variant is saved to disk.
    fn filename(&self) -> String;

    fn description(&self) -> String {
        describe_variant(self.weight(), self.style())
    }

    /// Render this variant's sample row.
    fn render_html(
        &self,
        templates: &TemplateEngine,
        sample: &str,
        size: &str,
        selected: bool,
    ) -> String;
}

/// A named catalog entry with one or more variants.
pub trait FontFamily: Send + Sync + fmt::Debug {
    /// Family name, the primary key within a provider.
    fn name(&self) -> &str;

    fn category(&self) -> FontCategory;

    /// Variant ids in display/default order.
    fn variant_ids(&self) -> &[String];

    fn variant(&self, id: &str) -> Option<&dyn FontVariant>;

    /// Variants in [`FontFamily::variant_ids`] order.
    fn variants(&self) -> Vec<&dyn FontVariant> {
        self.variant_ids()
            .iter()
            .filter_map(|id| self.variant(id))
            .collect()
    }

    /// Fetch the binary font data for `variant_id`.
    fn download(&self, variant_id: &str) -> Result<Vec<u8>, CatalogError>;

    /// Render the family section showing the variants listed in `ids`
    /// (unknown ids are ignored), checking those contained in `selected`.
    fn render_html(
        &self,
        templates: &TemplateEngine,
        sample: &str,
        size: &str,
        ids: &[String],
        selected: &BTreeSet<String>,
    ) -> String;
}
