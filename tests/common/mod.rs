//! Shared integration test helpers for gofont.
//!
//! Provides a stub font provider, a Google Fonts provider served from canned
//! JSON, compact test templates and a session builder with zero delays.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{google_provider, stub_provider, TestSession};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use gofont::{Browser, BrowserOptions, CapturingSink};
use gofont_catalog::{
    CatalogError, FontCategory, FontFamily, FontHandler, FontManager, FontSort, FontStyle,
    FontVariant, FontWeight, GoogleFonts, GoogleFontsOptions, StaticFetcher, matches_search,
};
use gofont_template::{StaticTemplates, TemplateEngine, keys};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://fonts.test/webfonts";
pub const API_KEY: &str = "k";

/// Catalog served for the alpha and popularity orderings.
pub const CATALOG: &str = r#"{
  "kind": "webfonts#webfontList",
  "items": [
    {
      "family": "Roboto",
      "category": "sans-serif",
      "variants": ["300", "regular", "italic", "700"],
      "files": {
        "300": "http://fonts.test/roboto/Roboto-Light.ttf",
        "regular": "http://fonts.test/roboto/Roboto-Regular.ttf",
        "italic": "http://fonts.test/roboto/Roboto-Italic.ttf",
        "700": "http://fonts.test/roboto/Roboto-Bold.ttf"
      }
    },
    {
      "family": "Lobster",
      "category": "display",
      "variants": ["regular"],
      "files": {"regular": "http://fonts.test/lobster/Lobster-Regular.ttf"}
    },
    {
      "family": "Roboto Mono",
      "category": "monospace",
      "variants": ["100", "100italic"],
      "files": {
        "100": "http://fonts.test/robotomono/RobotoMono-Thin.ttf",
        "100italic": "http://fonts.test/robotomono/RobotoMono-ThinItalic.ttf"
      }
    },
    {
      "family": "Lato",
      "category": "sans-serif",
      "variants": ["regular", "900"],
      "files": {
        "regular": "http://fonts.test/lato/Lato-Regular.ttf",
        "900": "http://fonts.test/lato/Lato-Black.ttf"
      }
    }
  ]
}"#;

/// Canned fetcher serving [`CATALOG`] plus every font file except
/// Roboto Mono Thin Italic, which fails to download.
pub fn fixture_fetcher() -> Arc<StaticFetcher> {
    Arc::new(
        StaticFetcher::new()
            .with(format!("{BASE_URL}?key={API_KEY}"), CATALOG)
            .with(format!("{BASE_URL}?key={API_KEY}&sort=popularity"), CATALOG)
            .with("https://fonts.test/roboto/Roboto-Light.ttf", b"roboto-300".to_vec())
            .with("https://fonts.test/roboto/Roboto-Regular.ttf", b"roboto-regular".to_vec())
            .with("https://fonts.test/roboto/Roboto-Italic.ttf", b"roboto-italic".to_vec())
            .with("https://fonts.test/roboto/Roboto-Bold.ttf", b"roboto-700".to_vec())
            .with("https://fonts.test/lobster/Lobster-Regular.ttf", b"lobster-regular".to_vec())
            .with("https://fonts.test/robotomono/RobotoMono-Thin.ttf", b"mono-100".to_vec())
            .with("https://fonts.test/lato/Lato-Regular.ttf", b"lato-regular".to_vec())
            .with("https://fonts.test/lato/Lato-Black.ttf", b"lato-900".to_vec()),
    )
}

/// Google Fonts provider over [`fixture_fetcher`].
pub fn google_provider() -> Arc<dyn FontHandler> {
    let options = GoogleFontsOptions::new(API_KEY).with_base_url(BASE_URL);
    Arc::new(GoogleFonts::new(options, fixture_fetcher()))
}

/// Templates that render compactly enough to compare whole documents.
///
/// A variant renders as `(<id>[checked] <size> <sample>)`, a family as
/// `[<family>:<variants>]`.
pub fn test_templates() -> TemplateEngine {
    TemplateEngine::new(
        StaticTemplates::new()
            .with(
                keys::FONTS_VIEW,
                "{{summary}}|{{index}}|{{pages}}|{{fonts}}|{{selectedFonts}}|{{selections}}",
            )
            .with(keys::GOOGLE_FONTS_FAMILY, "[{{family}}:{{samples}}]")
            .with(
                keys::GOOGLE_FONTS_VARIANT,
                "({{variantId}}{{checked}} {{size}} {{sample}})",
            )
            .with(keys::WELCOME, "welcome {{version}}"),
    )
}

#[derive(Debug)]
pub struct StubVariant {
    pub id: String,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontVariant for StubVariant {
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
        format!("Stub-{}.otf", self.id)
    }
    fn render_html(&self, _: &TemplateEngine, _: &str, _: &str, selected: bool) -> String {
        if selected {
            format!("{}*", self.id)
        } else {
            self.id.clone()
        }
    }
}

/// A family whose variant ids are the raw weight tokens, upright only.
#[derive(Debug)]
pub struct StubFamily {
    pub name: String,
    pub category: FontCategory,
    pub ids: Vec<String>,
    pub variants: Vec<StubVariant>,
}

impl StubFamily {
    pub fn new(name: &str, category: FontCategory, weights: &[FontWeight]) -> Self {
        let variants: Vec<StubVariant> = weights
            .iter()
            .map(|w| StubVariant {
                id: w.raw().to_string(),
                weight: *w,
                style: FontStyle::Regular,
            })
            .collect();
        Self {
            name: name.to_string(),
            category,
            ids: variants.iter().map(|v| v.id.clone()).collect(),
            variants,
        }
    }
}

impl FontFamily for StubFamily {
    fn name(&self) -> &str {
        &self.name
    }
    fn category(&self) -> FontCategory {
        self.category
    }
    fn variant_ids(&self) -> &[String] {
        &self.ids
    }
    fn variant(&self, id: &str) -> Option<&dyn FontVariant> {
        self.variants
            .iter()
            .find(|v| v.id == id)
            .map(|v| v as &dyn FontVariant)
    }
    fn download(&self, variant_id: &str) -> Result<Vec<u8>, CatalogError> {
        self.variant(variant_id)
            .map(|_| format!("{}-{}", self.name, variant_id).into_bytes())
            .ok_or_else(|| CatalogError::Lookup(variant_id.to_string()))
    }
    fn render_html(
        &self,
        templates: &TemplateEngine,
        sample: &str,
        size: &str,
        ids: &[String],
        selected: &BTreeSet<String>,
    ) -> String {
        let variants: Vec<String> = ids
            .iter()
            .filter_map(|id| self.variant(id))
            .map(|v| v.render_html(templates, sample, size, selected.contains(v.id())))
            .collect();
        format!("[{}:{}]", self.name, variants.join(","))
    }
}

/// Provider that returns its families in the same order for every sort.
pub struct StubProvider {
    pub name: String,
    pub families: Vec<Arc<dyn FontFamily>>,
}

impl FontHandler for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }
    fn query(&self, search: &str, _sort: FontSort) -> Vec<Arc<dyn FontFamily>> {
        self.families
            .iter()
            .filter(|f| matches_search(f.name(), search))
            .cloned()
            .collect()
    }
    fn get_font(&self, name: &str) -> Option<Arc<dyn FontFamily>> {
        self.families.iter().find(|f| f.name() == name).cloned()
    }
}

pub fn stub_provider(name: &str, families: Vec<StubFamily>) -> Arc<dyn FontHandler> {
    Arc::new(StubProvider {
        name: name.to_string(),
        families: families
            .into_iter()
            .map(|f| Arc::new(f) as Arc<dyn FontFamily>)
            .collect(),
    })
}

/// Session options with no delays and small pages.
pub fn test_options() -> BrowserOptions {
    BrowserOptions {
        page_size: 2,
        font_size: "12pt".to_string(),
        sample_text: Some("Sphinx".to_string()),
        sort: FontSort::Popularity,
        search_delay: Duration::ZERO,
        sample_delay: Duration::ZERO,
        status_delay: Duration::ZERO,
        version: "9.9.9".to_string(),
        copyright: String::new(),
    }
}

/// A session plus the sink it presents to.
pub struct TestSession {
    pub browser: Browser,
    pub sink: Arc<CapturingSink>,
    pub manager: Arc<FontManager>,
}

impl TestSession {
    /// Start a session with `options` and register `providers` in order.
    pub fn with_options(providers: Vec<Arc<dyn FontHandler>>, options: BrowserOptions) -> Self {
        let sink = Arc::new(CapturingSink::new());
        let manager = Arc::new(FontManager::new());
        let browser = Browser::new(
            Arc::clone(&manager),
            Arc::new(test_templates()),
            sink.clone(),
            options,
        )
        .expect("session starts");
        for provider in providers {
            browser.add_provider(provider);
        }
        browser.wait_idle().expect("session settles");
        Self {
            browser,
            sink,
            manager,
        }
    }

    pub fn new(providers: Vec<Arc<dyn FontHandler>>) -> Self {
        Self::with_options(providers, test_options())
    }

    /// Session over the Google Fonts fixture.
    pub fn google() -> Self {
        Self::new(vec![google_provider()])
    }

    /// Wait for queued work, then return the presented document.
    pub fn page(&self) -> String {
        self.browser.wait_idle().expect("session settles");
        self.sink.document().expect("a document was presented")
    }
}
