//! The provider abstraction: one implementation per remote catalog.

use crate::family::FontFamily;
use crate::model::FontSort;
use std::sync::Arc;

/// Case-insensitive substring match; an empty search matches everything.
pub fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// A remote font catalog.
///
/// Catalog data is loaded once when the handler is constructed and never
/// mutated afterwards, so queries are cheap and side-effect free.
pub trait FontHandler: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Families in this provider's `sort` ordering whose name contains
    /// `search` (case-insensitive). No category/weight/style filtering.
    fn query(&self, search: &str, sort: FontSort) -> Vec<Arc<dyn FontFamily>>;

    /// Exact, case-sensitive lookup by family name.
    fn get_font(&self, name: &str) -> Option<Arc<dyn FontFamily>>;

    /// Fetch a variant's font data, logging and returning `None` on failure
    /// so a batch can carry on with its next item.
    fn download(&self, family: &dyn FontFamily, variant_id: &str) -> Option<Vec<u8>> {
        match family.download(variant_id) {
            Ok(data) => Some(data),
            Err(e) => {
                log::error!(
                    "[{}] Failed to download {}|{}: {}",
                    self.name(),
                    family.name(),
                    variant_id,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Roboto Mono", ""));
        assert!(matches_search("Roboto Mono", "mono"));
        assert!(matches_search("Roboto Mono", "ROBO"));
        assert!(!matches_search("Roboto Mono", "lato"));
    }
}
