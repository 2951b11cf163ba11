//! Catalog aggregation across every registered provider.

use crate::error::CatalogError;
use crate::family::{FontFamily, FontVariant};
use crate::handler::FontHandler;
use crate::model::{FontCategory, FontSort, FontStyle, FontWeight, SelectedFont};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Category, weight and style filters. The default lets everything through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFilter {
    pub categories: HashSet<FontCategory>,
    pub weights: HashSet<FontWeight>,
    pub styles: HashSet<FontStyle>,
}

impl Default for FontFilter {
    fn default() -> Self {
        Self {
            categories: FontCategory::ALL.into_iter().collect(),
            weights: FontWeight::ALL.into_iter().collect(),
            styles: FontStyle::ALL.into_iter().collect(),
        }
    }
}

impl FontFilter {
    /// Family-level inclusion: category must match, and at least one variant
    /// must have a matching weight and at least one a matching style.
    pub fn includes_family(&self, family: &dyn FontFamily) -> bool {
        if !self.categories.contains(&family.category()) {
            return false;
        }
        let variants = family.variants();
        variants.iter().any(|v| self.weights.contains(&v.weight()))
            && variants.iter().any(|v| self.styles.contains(&v.style()))
    }

    /// Variant-level match used when choosing which variants to display.
    pub fn includes_variant(&self, variant: &dyn FontVariant) -> bool {
        self.weights.contains(&variant.weight()) && self.styles.contains(&variant.style())
    }

    /// Ids of the variants to display for `family`, ordered by weight then style.
    pub fn display_variant_ids(&self, family: &dyn FontFamily) -> Vec<String> {
        let mut shown: Vec<&dyn FontVariant> = family
            .variants()
            .into_iter()
            .filter(|v| self.includes_variant(*v))
            .collect();
        shown.sort_by_key(|v| (v.weight(), v.style()));
        shown.into_iter().map(|v| v.id().to_string()).collect()
    }
}

/// Parameters for [`FontManager::query_fonts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontQuery {
    pub search: String,
    pub sort: FontSort,
    pub filter: FontFilter,
}

impl FontQuery {
    pub fn new(search: impl Into<String>, sort: FontSort) -> Self {
        Self {
            search: search.into(),
            sort,
            filter: FontFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: FontFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Routes queries to every registered [`FontHandler`].
///
/// Holds no catalog data of its own. Registration order decides result
/// order; families with the same name from different providers all appear.
#[derive(Default)]
pub struct FontManager {
    handlers: RwLock<Vec<Arc<dyn FontHandler>>>,
}

impl std::fmt::Debug for FontManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .handlers
            .read()
            .iter()
            .map(|h| h.name().to_string())
            .collect();
        f.debug_struct("FontManager")
            .field("handlers", &names)
            .finish()
    }
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with `handlers` registered in order.
    pub fn with_handlers(handlers: Vec<Arc<dyn FontHandler>>) -> Self {
        Self {
            handlers: RwLock::new(handlers),
        }
    }

    /// Register a provider after any already present.
    pub fn add_handler(&self, handler: Arc<dyn FontHandler>) {
        log::info!("Registering font handler: {}", handler.name());
        self.handlers.write().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Concatenate every provider's results for the query's search and
    /// sort, then apply the category/weight/style filter.
    pub fn query_fonts(&self, query: &FontQuery) -> Vec<Arc<dyn FontFamily>> {
        let handlers = self.handlers.read().clone();
        handlers
            .iter()
            .flat_map(|h| h.query(&query.search, query.sort))
            .filter(|family| query.filter.includes_family(family.as_ref()))
            .collect()
    }

    /// First family named `name` across providers, in registration order.
    pub fn get_font(&self, name: &str) -> Option<Arc<dyn FontFamily>> {
        let handlers = self.handlers.read().clone();
        handlers.iter().find_map(|h| h.get_font(name))
    }

    /// Resolve a selection key to its family, checking the variant exists.
    pub fn resolve(&self, font: &SelectedFont) -> Result<Arc<dyn FontFamily>, CatalogError> {
        let family = self.get_font(font.family()).ok_or_else(|| {
            CatalogError::Lookup(format!("unable to find font family '{}'", font.family()))
        })?;
        if family.variant(font.variant_id()).is_none() {
            return Err(CatalogError::Lookup(format!(
                "unable to find variant '{}' of '{}'",
                font.variant_id(),
                font.family()
            )));
        }
        Ok(family)
    }

    /// Download a selected variant through the provider that owns its family.
    ///
    /// Returns `None` (after logging) when the family is unknown or the
    /// provider fails to deliver data.
    pub fn download(&self, font: &SelectedFont) -> Option<Vec<u8>> {
        let handlers = self.handlers.read().clone();
        for handler in &handlers {
            if let Some(family) = handler.get_font(font.family()) {
                return handler.download(family.as_ref(), font.variant_id());
            }
        }
        log::error!("Unable to find font family for download: {}", font.family());
        None
    }
}
