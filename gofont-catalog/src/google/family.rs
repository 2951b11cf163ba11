//! Google Fonts family and variant types.

use crate::error::CatalogError;
use crate::family::{FontFamily, FontVariant, escape_html, escape_js_string};
use crate::http::{Fetcher, MAX_FONT_SIZE};
use crate::model::{FontCategory, FontStyle, FontWeight};
use chrono::NaiveDate;
use gofont_template::{TemplateEngine, keys};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

/// File extension used when a file URL does not carry one.
const DEFAULT_EXTENSION: &str = "ttf";

/// One Google Fonts variant, backed by a single font file URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleFontVariant {
    pub(crate) id: String,
    pub(crate) family_name: String,
    pub(crate) weight: FontWeight,
    pub(crate) style: FontStyle,
    pub(crate) url: String,
}

impl GoogleFontVariant {
    /// Secure URL of the font file.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn extension(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| {
                Path::new(u.path())
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase)
            })
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }
}

impl FontVariant for GoogleFontVariant {
    fn id(&self) -> &str {
        &self.id
    }

    fn weight(&self) -> FontWeight {
        self.weight
    }

    fn style(&self) -> FontStyle {
        self.style
    }

    fn filename(&self) -> String {
        let base: String = self.family_name.chars().filter(|c| *c != ' ').collect();
        let style_token = match self.style {
            FontStyle::Regular => "",
            FontStyle::Italic => "Italic",
        };
        format!(
            "{}-{}{}.{}",
            base,
            self.weight.file_token(),
            style_token,
            self.extension()
        )
    }

    fn render_html(
        &self,
        templates: &TemplateEngine,
        sample: &str,
        size: &str,
        selected: bool,
    ) -> String {
        let family_id = escape_js_string(&self.family_name);
        let weight = self.weight.css_value().to_string();
        let description = self.description();
        let sample = escape_html(sample);
        let size = escape_html(size);

        templates.render(
            keys::GOOGLE_FONTS_VARIANT,
            &[
                ("familyId", &family_id),
                ("variantId", &self.id),
                ("checked", if selected { "checked" } else { "" }),
                ("style", self.style.raw()),
                ("weight", &weight),
                ("description", &description),
                ("sample", &sample),
                ("size", &size),
                ("url", &self.url),
            ],
        )
    }
}

/// A Google Fonts family as described by the Developer API.
pub struct GoogleFontFamily {
    pub(crate) name: String,
    pub(crate) category: FontCategory,
    pub(crate) variant_ids: Vec<String>,
    pub(crate) variants: HashMap<String, GoogleFontVariant>,
    pub(crate) kind: Option<String>,
    pub(crate) subsets: Vec<String>,
    pub(crate) version: Option<String>,
    pub(crate) last_modified: Option<NaiveDate>,
    pub(crate) fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for GoogleFontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleFontFamily")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("variant_ids", &self.variant_ids)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl GoogleFontFamily {
    /// API resource kind (`"webfonts#webfont"`), when reported.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn subsets(&self) -> &[String] {
        &self.subsets
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn last_modified(&self) -> Option<NaiveDate> {
        self.last_modified
    }

    pub fn google_variant(&self, id: &str) -> Option<&GoogleFontVariant> {
        self.variants.get(id)
    }
}

impl FontFamily for GoogleFontFamily {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> FontCategory {
        self.category
    }

    fn variant_ids(&self) -> &[String] {
        &self.variant_ids
    }

    fn variant(&self, id: &str) -> Option<&dyn FontVariant> {
        self.variants.get(id).map(|v| v as &dyn FontVariant)
    }

    fn download(&self, variant_id: &str) -> Result<Vec<u8>, CatalogError> {
        let variant = self.variants.get(variant_id).ok_or_else(|| {
            CatalogError::Lookup(format!(
                "variant id '{}' not found in '{}'",
                variant_id, self.name
            ))
        })?;
        self.fetcher.fetch(&variant.url, MAX_FONT_SIZE)
    }

    fn render_html(
        &self,
        templates: &TemplateEngine,
        sample: &str,
        size: &str,
        ids: &[String],
        selected: &BTreeSet<String>,
    ) -> String {
        let samples: Vec<String> = ids
            .iter()
            .filter_map(|id| self.variants.get(id))
            .map(|v| v.render_html(templates, sample, size, selected.contains(&v.id)))
            .collect();
        let family = escape_html(&self.name);
        let family_id = escape_js_string(&self.name);
        let variants = self.variant_ids.join(",");
        let samples = samples.join("\n");

        templates.render(
            keys::GOOGLE_FONTS_FAMILY,
            &[
                ("family", &family),
                ("familyId", &family_id),
                ("variants", &variants),
                ("samples", &samples),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StaticFetcher;
    use gofont_template::StaticTemplates;

    fn variant(family: &str, id: &str, weight: FontWeight, style: FontStyle, url: &str) -> GoogleFontVariant {
        GoogleFontVariant {
            id: id.to_string(),
            family_name: family.to_string(),
            weight,
            style,
            url: url.to_string(),
        }
    }

    fn family(fetcher: Arc<dyn Fetcher>) -> GoogleFontFamily {
        let regular = variant("Open Sans", "regular", FontWeight::Normal, FontStyle::Regular, "https://f.test/os-r.ttf");
        let bold_italic = variant("Open Sans", "700italic", FontWeight::Bold, FontStyle::Italic, "https://f.test/os-bi.ttf");
        GoogleFontFamily {
            name: "Open Sans".to_string(),
            category: FontCategory::SansSerif,
            variant_ids: vec!["regular".to_string(), "700italic".to_string()],
            variants: [("regular".to_string(), regular), ("700italic".to_string(), bold_italic)]
                .into_iter()
                .collect(),
            kind: None,
            subsets: vec![],
            version: None,
            last_modified: None,
            fetcher,
        }
    }

    #[test]
    fn test_filename_strips_spaces_and_appends_tokens() {
        let v = variant("Open Sans", "700italic", FontWeight::Bold, FontStyle::Italic, "https://f.test/a/b.ttf");
        assert_eq!(v.filename(), "OpenSans-BoldItalic.ttf");

        let v = variant("Lato", "regular", FontWeight::Normal, FontStyle::Regular, "https://f.test/lato.woff2");
        assert_eq!(v.filename(), "Lato-Regular.woff2");

        let v = variant("Lato", "100", FontWeight::Thin, FontStyle::Regular, "https://f.test/lato");
        assert_eq!(v.filename(), "Lato-Thin.ttf");
    }

    #[test]
    fn test_download_unknown_variant_is_lookup_error() {
        let fetcher = Arc::new(StaticFetcher::new().with("https://f.test/os-r.ttf", b"FONT".to_vec()));
        let family = family(fetcher);

        assert_eq!(family.download("regular").unwrap(), b"FONT");
        assert!(matches!(family.download("900"), Err(CatalogError::Lookup(_))));
        assert!(matches!(family.download("700italic"), Err(CatalogError::Network { .. })));
    }

    #[test]
    fn test_render_html_marks_selected_and_skips_unknown_ids() {
        let templates = TemplateEngine::new(
            StaticTemplates::new()
                .with(keys::GOOGLE_FONTS_FAMILY, "[{{family}}|{{familyId}}|{{variants}}]{{samples}}")
                .with(keys::GOOGLE_FONTS_VARIANT, "<{{variantId}}:{{checked}}:{{description}}:{{weight}}:{{sample}}:{{size}}>"),
        );
        let family = family(Arc::new(StaticFetcher::new()));
        let selected: BTreeSet<String> = ["700italic".to_string()].into_iter().collect();

        let html = family.render_html(
            &templates,
            "A & B",
            "12pt",
            &["700italic".to_string(), "bogus".to_string(), "regular".to_string()],
            &selected,
        );

        assert_eq!(
            html,
            "[Open Sans|Open Sans|regular,700italic]\
             <700italic:checked:bold italic:700:A &amp; B:12pt>\n\
             <regular::normal:400:A &amp; B:12pt>"
        );
    }

    #[test]
    fn test_family_id_escapes_quotes() {
        let templates = TemplateEngine::new(
            StaticTemplates::new().with(keys::GOOGLE_FONTS_VARIANT, "{{familyId}}"),
        );
        let v = variant("Jim's \"Font\"", "regular", FontWeight::Normal, FontStyle::Regular, "https://f.test/x.ttf");
        assert_eq!(v.render_html(&templates, "", "", false), r#"Jim\'s \"Font\""#);
    }
}
