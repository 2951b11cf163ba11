//! Placeholder substitution and the memoizing template engine.

use crate::source::TemplateSource;
use parking_lot::Mutex;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Matches `{{name}}` placeholders. Names may not contain braces.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}]+)\}\}")
        .expect("template placeholder regex is a compile-time constant and must be valid")
});

/// Text rendered in place of a template whose resource could not be found.
pub fn missing_resource_text(key: &str) -> String {
    format!("Error finding resource: {key}")
}

/// A loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace every `{{name}}` with its bound value.
    ///
    /// Placeholders without a binding are left verbatim. Bound values are
    /// inserted as-is and never scanned for further placeholders.
    pub fn render(&self, bindings: &[(&str, &str)]) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(&self.text, |caps: &Captures| {
                let name = &caps[1];
                bindings
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Renders named templates loaded lazily from a [`TemplateSource`].
///
/// Each key is loaded at most once; later renders reuse the cached text.
pub struct TemplateEngine {
    source: Box<dyn TemplateSource>,
    cache: Mutex<HashMap<String, Arc<Template>>>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the template for `key`, loading it on first use.
    ///
    /// A missing resource yields a template containing only the diagnostic
    /// text from [`missing_resource_text`].
    pub fn template(&self, key: &str) -> Arc<Template> {
        if let Some(template) = self.cache.lock().get(key) {
            return Arc::clone(template);
        }

        let template = match self.source.load(key) {
            Ok(text) => Template::new(text),
            Err(e) => {
                log::error!("Template '{}' unavailable: {}", key, e);
                Template::new(missing_resource_text(key))
            }
        };

        // Another thread may have loaded the same key meanwhile; keep the first.
        let mut cache = self.cache.lock();
        Arc::clone(
            cache
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(template)),
        )
    }

    /// Render the template registered under `key`.
    pub fn render(&self, key: &str, bindings: &[(&str, &str)]) -> String {
        self.template(key).render(bindings)
    }

    /// Base URL for documents produced by this engine.
    pub fn base_url(&self) -> String {
        self.source.base_url()
    }
}
