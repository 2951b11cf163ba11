//! Google Fonts provider.
//!
//! The Developer API only sorts a full listing, so each sort mode is fetched
//! once at construction. Families are merged into one map, and each mode keeps
//! its own ordering of names.

mod family;
mod parse;

pub use family::{GoogleFontFamily, GoogleFontVariant};
pub use parse::parse_variant_id;

use crate::error::CatalogError;
use crate::family::FontFamily;
use crate::handler::{FontHandler, matches_search};
use crate::http::{Fetcher, MAX_CATALOG_SIZE};
use crate::model::FontSort;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;

/// Default Developer API endpoint.
pub const DEFAULT_GOOGLE_FONTS_URL: &str = "https://www.googleapis.com/webfonts/v1/webfonts";

/// Connection settings for the Developer API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleFontsOptions {
    pub base_url: String,
    pub api_key: String,
}

impl GoogleFontsOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_GOOGLE_FONTS_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Remote `sort` parameter for a mode; alpha uses the unsorted listing.
fn sort_param(sort: FontSort) -> Option<&'static str> {
    match sort {
        FontSort::Alpha => None,
        FontSort::Newest => Some("date"),
        FontSort::Popularity => Some("popularity"),
        FontSort::Trending => Some("trending"),
    }
}

/// Build the listing URL for one sort mode.
pub fn catalog_url(options: &GoogleFontsOptions, sort: FontSort) -> Result<String, CatalogError> {
    let mut url = url::Url::parse(&options.base_url)
        .map_err(|e| CatalogError::network(&options.base_url, e))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("key", &options.api_key);
        if let Some(param) = sort_param(sort) {
            query.append_pair("sort", param);
        }
    }
    Ok(url.to_string())
}

fn fetch_listing(
    options: &GoogleFontsOptions,
    sort: FontSort,
    fetcher: &Arc<dyn Fetcher>,
) -> Result<Vec<GoogleFontFamily>, CatalogError> {
    let url = catalog_url(options, sort)?;
    let bytes = fetcher.fetch(&url, MAX_CATALOG_SIZE)?;
    parse::parse_catalog(&bytes, fetcher)
}

/// Font handler for the Google Fonts Developer API.
pub struct GoogleFonts {
    families: HashMap<String, Arc<GoogleFontFamily>>,
    orderings: HashMap<FontSort, Vec<String>>,
}

impl GoogleFonts {
    /// Fetch every sort mode concurrently and build the catalog.
    ///
    /// Never fails: a mode whose fetch or parse fails is left empty, and the
    /// families of every successful fetch remain available for lookup.
    pub fn new(options: GoogleFontsOptions, fetcher: Arc<dyn Fetcher>) -> Self {
        let listings: Vec<(FontSort, Option<Vec<GoogleFontFamily>>)> = thread::scope(|scope| {
            let handles: Vec<_> = FontSort::ALL
                .into_iter()
                .map(|sort| {
                    let options = &options;
                    let fetcher = &fetcher;
                    let handle = thread::Builder::new()
                        .name(format!("gofont-google-{}", sort.as_str()))
                        .spawn_scoped(scope, move || fetch_listing(options, sort, fetcher));
                    (sort, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(sort, handle)| {
                    let result = match handle {
                        Ok(handle) => handle.join().unwrap_or_else(|_| {
                            Err(CatalogError::network(&options.base_url, "fetch thread panicked"))
                        }),
                        Err(e) => {
                            log::warn!("Failed to spawn fetch thread, fetching inline: {}", e);
                            fetch_listing(&options, sort, &fetcher)
                        }
                    };
                    match result {
                        Ok(families) => {
                            log::info!(
                                "Google Fonts {} listing: {} families",
                                sort.as_str(),
                                families.len()
                            );
                            (sort, Some(families))
                        }
                        Err(e) => {
                            log::warn!("Google Fonts {} listing unavailable: {}", sort.as_str(), e);
                            (sort, None)
                        }
                    }
                })
                .collect()
        });

        Self::from_listings(listings)
    }

    fn from_listings(listings: Vec<(FontSort, Option<Vec<GoogleFontFamily>>)>) -> Self {
        let mut families: HashMap<String, Arc<GoogleFontFamily>> = HashMap::new();
        let mut fetched: Vec<(FontSort, Vec<String>)> = Vec::new();

        for (sort, listing) in listings {
            let Some(listing) = listing else { continue };
            let names = parse::parse_family_names(&listing);
            for family in listing {
                families
                    .entry(family.name.clone())
                    .or_insert_with(|| Arc::new(family));
            }
            fetched.push((sort, names));
        }

        let mut orderings: HashMap<FontSort, Vec<String>> = HashMap::new();
        let mut alpha: Vec<String> = families.keys().cloned().collect();
        alpha.sort();
        orderings.insert(FontSort::Alpha, alpha);

        for (sort, names) in fetched {
            if sort == FontSort::Alpha {
                continue;
            }
            let mut seen = HashSet::new();
            let ordered = names
                .into_iter()
                .filter(|n| families.contains_key(n) && seen.insert(n.clone()))
                .collect();
            orderings.insert(sort, ordered);
        }

        Self {
            families,
            orderings,
        }
    }

    /// Number of distinct families known to the provider.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Typed lookup, for callers that need Google-specific metadata.
    pub fn google_family(&self, name: &str) -> Option<Arc<GoogleFontFamily>> {
        self.families.get(name).cloned()
    }
}

impl FontHandler for GoogleFonts {
    fn name(&self) -> &str {
        "Google Fonts"
    }

    fn query(&self, search: &str, sort: FontSort) -> Vec<Arc<dyn FontFamily>> {
        let Some(names) = self.orderings.get(&sort) else {
            return Vec::new();
        };
        names
            .iter()
            .filter(|name| matches_search(name, search))
            .filter_map(|name| self.families.get(name))
            .map(|family| Arc::clone(family) as Arc<dyn FontFamily>)
            .collect()
    }

    fn get_font(&self, name: &str) -> Option<Arc<dyn FontFamily>> {
        self.families
            .get(name)
            .map(|family| Arc::clone(family) as Arc<dyn FontFamily>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StaticFetcher;

    const BASE: &str = "https://fonts.test/webfonts";

    fn options() -> GoogleFontsOptions {
        GoogleFontsOptions::new("k").with_base_url(BASE)
    }

    fn listing(names: &[&str]) -> Vec<u8> {
        let items: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{"family": "{n}", "category": "serif", "variants": ["regular"],
                        "files": {{"regular": "http://f.test/{n}.ttf"}}}}"#
                )
            })
            .collect();
        format!(r#"{{"items": [{}]}}"#, items.join(",")).into_bytes()
    }

    fn names(families: Vec<Arc<dyn FontFamily>>) -> Vec<String> {
        families.iter().map(|f| f.name().to_string()).collect()
    }

    #[test]
    fn test_catalog_urls() {
        let o = options();
        assert_eq!(catalog_url(&o, FontSort::Alpha).unwrap(), "https://fonts.test/webfonts?key=k");
        assert_eq!(
            catalog_url(&o, FontSort::Newest).unwrap(),
            "https://fonts.test/webfonts?key=k&sort=date"
        );
        assert_eq!(
            catalog_url(&o, FontSort::Popularity).unwrap(),
            "https://fonts.test/webfonts?key=k&sort=popularity"
        );
        assert_eq!(
            catalog_url(&o, FontSort::Trending).unwrap(),
            "https://fonts.test/webfonts?key=k&sort=trending"
        );
        assert!(catalog_url(&GoogleFontsOptions::new("k").with_base_url("::"), FontSort::Alpha).is_err());
    }

    #[test]
    fn test_orderings_per_sort_mode() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with(format!("{BASE}?key=k"), listing(&["Lato", "Arvo", "Roboto"]))
                .with(format!("{BASE}?key=k&sort=date"), listing(&["Roboto", "Lato", "Arvo"]))
                .with(format!("{BASE}?key=k&sort=popularity"), listing(&["Roboto", "Arvo", "Lato"]))
                .with(format!("{BASE}?key=k&sort=trending"), listing(&["Arvo", "Roboto", "Lato"])),
        );
        let google = GoogleFonts::new(options(), fetcher.clone());

        assert_eq!(google.family_count(), 3);
        assert_eq!(names(google.query("", FontSort::Alpha)), ["Arvo", "Lato", "Roboto"]);
        assert_eq!(names(google.query("", FontSort::Newest)), ["Roboto", "Lato", "Arvo"]);
        assert_eq!(names(google.query("", FontSort::Popularity)), ["Roboto", "Arvo", "Lato"]);
        assert_eq!(names(google.query("", FontSort::Trending)), ["Arvo", "Roboto", "Lato"]);
        assert_eq!(names(google.query("RO", FontSort::Popularity)), ["Roboto"]);
        assert_eq!(fetcher.requests().len(), 4);
    }

    #[test]
    fn test_failed_modes_degrade_to_empty() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with(format!("{BASE}?key=k&sort=popularity"), listing(&["Roboto", "Arvo"]))
                .with(format!("{BASE}?key=k&sort=date"), b"{broken".to_vec()),
        );
        let google = GoogleFonts::new(options(), fetcher);

        assert_eq!(names(google.query("", FontSort::Popularity)), ["Roboto", "Arvo"]);
        assert_eq!(names(google.query("", FontSort::Alpha)), ["Arvo", "Roboto"]);
        assert!(google.query("", FontSort::Newest).is_empty());
        assert!(google.query("", FontSort::Trending).is_empty());
        assert!(google.get_font("Roboto").is_some());
    }

    #[test]
    fn test_everything_failing_yields_empty_provider() {
        let google = GoogleFonts::new(options(), Arc::new(StaticFetcher::new()));
        assert_eq!(google.family_count(), 0);
        for sort in FontSort::ALL {
            assert!(google.query("", sort).is_empty());
        }
        assert!(google.get_font("Roboto").is_none());
    }

    #[test]
    fn test_get_font_is_exact_and_case_sensitive() {
        let fetcher = Arc::new(StaticFetcher::new().with(format!("{BASE}?key=k"), listing(&["Open Sans"])));
        let google = GoogleFonts::new(options(), fetcher);

        assert_eq!(google.get_font("Open Sans").unwrap().name(), "Open Sans");
        assert!(google.get_font("open sans").is_none());
        assert!(google.get_font("Open").is_none());

        let family = google.google_family("Open Sans").unwrap();
        assert_eq!(family.google_variant("regular").unwrap().url(), "https://f.test/Open Sans.ttf");
    }

    #[test]
    fn test_handler_download_logs_and_returns_none() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with(format!("{BASE}?key=k"), listing(&["Arvo"]))
                .with("https://f.test/Arvo.ttf", b"ARVO".to_vec()),
        );
        let google = GoogleFonts::new(options(), fetcher);
        let arvo = google.get_font("Arvo").unwrap();

        assert_eq!(google.download(arvo.as_ref(), "regular"), Some(b"ARVO".to_vec()));
        assert_eq!(google.download(arvo.as_ref(), "700"), None);
    }
}
