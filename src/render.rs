//! Composition of the results page from a query, a page number and the
//! selection.

use crate::pagination::{page_label, page_slice, pagination_html, results_summary, total_pages};
use crate::selection::SelectionSet;
use gofont_catalog::{FontFamily, FontFilter, FontManager};
use gofont_template::{TemplateEngine, keys};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Heading shown above families that are selected but not on the page.
pub const PREVIOUSLY_SELECTED_HEADING: &str = "Previously Selected Fonts";

/// Sample rendering inputs shared by every family on a page.
#[derive(Debug, Clone, Copy)]
pub struct SampleSettings<'a> {
    pub text: &'a str,
    pub size: &'a str,
}

/// Everything needed to render one page of results.
pub struct PageRequest<'a> {
    pub results: &'a [Arc<dyn FontFamily>],
    pub filter: &'a FontFilter,
    pub page: usize,
    pub page_size: usize,
    pub sample: SampleSettings<'a>,
}

/// Render the `FontsView` document for `request`.
///
/// Families on the page show their filtered variants; families that have
/// selections but are not on the page are appended under
/// [`PREVIOUSLY_SELECTED_HEADING`] with only their selected variants.
pub fn compose_page(
    templates: &TemplateEngine,
    manager: &FontManager,
    request: &PageRequest<'_>,
    selection: &SelectionSet,
) -> String {
    let count = request.results.len();
    let pages = total_pages(count, request.page_size);
    let shown = page_slice(request.results, request.page_size, request.page);

    let fonts: Vec<String> = shown
        .iter()
        .map(|family| {
            let ids = request.filter.display_variant_ids(family.as_ref());
            let selected = selection.variant_ids(family.name());
            family.render_html(templates, request.sample.text, request.sample.size, &ids, &selected)
        })
        .collect();

    let shown_names: HashSet<&str> = shown.iter().map(|f| f.name()).collect();
    let selections = render_previous_selections(
        templates,
        manager,
        selection,
        &shown_names,
        request.sample,
    );
    let heading = if selections.is_empty() {
        ""
    } else {
        PREVIOUSLY_SELECTED_HEADING
    };

    let summary = results_summary(count);
    let index = pagination_html(count, request.page_size, request.page);
    let label = page_label(request.page, pages);
    let fonts = fonts.join("");
    let selections = selections.join("");

    templates.render(
        keys::FONTS_VIEW,
        &[
            ("summary", &summary),
            ("index", &index),
            ("pages", &label),
            ("fonts", &fonts),
            ("selectedFonts", heading),
            ("selections", &selections),
        ],
    )
}

fn render_previous_selections(
    templates: &TemplateEngine,
    manager: &FontManager,
    selection: &SelectionSet,
    shown: &HashSet<&str>,
    sample: SampleSettings<'_>,
) -> Vec<String> {
    selection
        .family_names()
        .into_iter()
        .filter(|name| !shown.contains(name.as_str()))
        .filter_map(|name| {
            let Some(family) = manager.get_font(&name) else {
                log::warn!("Selected family '{}' is no longer in the catalog", name);
                return None;
            };
            let selected: BTreeSet<String> = selection.variant_ids(&name);
            let ids: Vec<String> = family
                .variant_ids()
                .iter()
                .filter(|id| selected.contains(*id))
                .cloned()
                .collect();
            Some(family.render_html(templates, sample.text, sample.size, &ids, &selected))
        })
        .collect()
}

/// Render the welcome page shown before the first search completes.
pub fn compose_welcome(templates: &TemplateEngine, version: &str, copyright: &str) -> String {
    templates.render(
        keys::WELCOME,
        &[("version", version), ("copyright", copyright)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofont_catalog::{
        CatalogError, FontCategory, FontHandler, FontSort, FontStyle, FontVariant, FontWeight,
        SelectedFont, matches_search,
    };
    use gofont_template::StaticTemplates;

    #[derive(Debug)]
    struct Variant {
        id: String,
        weight: FontWeight,
        style: FontStyle,
    }

    impl FontVariant for Variant {
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
            format!("{}.ttf", self.id)
        }
        fn render_html(&self, _: &TemplateEngine, _: &str, _: &str, _: bool) -> String {
            self.id.clone()
        }
    }

    #[derive(Debug)]
    struct Family {
        name: String,
        ids: Vec<String>,
        variants: Vec<Variant>,
    }

    impl FontFamily for Family {
        fn name(&self) -> &str {
            &self.name
        }
        fn category(&self) -> FontCategory {
            FontCategory::Serif
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
        fn download(&self, _: &str) -> Result<Vec<u8>, CatalogError> {
            Ok(Vec::new())
        }
        fn render_html(
            &self,
            _: &TemplateEngine,
            _: &str,
            _: &str,
            ids: &[String],
            selected: &BTreeSet<String>,
        ) -> String {
            let marked: Vec<String> = ids
                .iter()
                .map(|id| {
                    if selected.contains(id) {
                        format!("{id}*")
                    } else {
                        id.clone()
                    }
                })
                .collect();
            format!("[{}:{}]", self.name, marked.join(","))
        }
    }

    fn family(name: &str) -> Arc<dyn FontFamily> {
        let variants = vec![
            Variant { id: "700".into(), weight: FontWeight::Bold, style: FontStyle::Regular },
            Variant { id: "italic".into(), weight: FontWeight::Normal, style: FontStyle::Italic },
            Variant { id: "regular".into(), weight: FontWeight::Normal, style: FontStyle::Regular },
        ];
        Arc::new(Family {
            name: name.to_string(),
            ids: variants.iter().map(|v| v.id.clone()).collect(),
            variants,
        })
    }

    struct Handler(Vec<Arc<dyn FontFamily>>);

    impl FontHandler for Handler {
        fn name(&self) -> &str {
            "test"
        }
        fn query(&self, search: &str, _: FontSort) -> Vec<Arc<dyn FontFamily>> {
            self.0
                .iter()
                .filter(|f| matches_search(f.name(), search))
                .cloned()
                .collect()
        }
        fn get_font(&self, name: &str) -> Option<Arc<dyn FontFamily>> {
            self.0.iter().find(|f| f.name() == name).cloned()
        }
    }

    fn engine() -> TemplateEngine {
        TemplateEngine::new(
            StaticTemplates::new()
                .with(
                    keys::FONTS_VIEW,
                    "{{summary}}|{{index}}|{{pages}}|{{fonts}}|{{selectedFonts}}|{{selections}}",
                )
                .with(keys::WELCOME, "GoFont {{version}} {{copyright}}"),
        )
    }

    fn render(results: &[Arc<dyn FontFamily>], page: usize, selection: &SelectionSet) -> String {
        let manager = FontManager::new();
        manager.add_handler(Arc::new(Handler(results.to_vec())));
        let filter = FontFilter::default();
        let request = PageRequest {
            results,
            filter: &filter,
            page,
            page_size: 2,
            sample: SampleSettings { text: "Sphinx", size: "12pt" },
        };
        compose_page(&engine(), &manager, &request, selection)
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(render(&[], 1, &SelectionSet::new()), "No results||Page 1 of 1|||");
    }

    #[test]
    fn test_page_shows_filtered_variants_in_weight_order() {
        let results = vec![family("Arvo")];
        let mut selection = SelectionSet::new();
        selection.select(SelectedFont::new("Arvo", "700"));

        assert_eq!(
            render(&results, 1, &selection),
            "1 results||Page 1 of 1|[Arvo:regular,italic,700*]||"
        );
    }

    #[test]
    fn test_selected_families_off_page_are_listed_separately() {
        let results = vec![family("Arvo"), family("Bitter"), family("Cabin")];
        let mut selection = SelectionSet::new();
        selection.select(SelectedFont::new("Cabin", "regular"));
        selection.select(SelectedFont::new("Cabin", "700"));
        selection.select(SelectedFont::new("Arvo", "italic"));

        let page = render(&results, 1, &selection);
        assert_eq!(
            page,
            "3 results|[ 1 | <a href='javascript:loadPage(2)'>2</a> ]|Page 1 of 2|\
             [Arvo:regular,italic*,700][Bitter:regular,italic,700]|\
             Previously Selected Fonts|[Cabin:700*,regular*]"
        );
    }

    #[test]
    fn test_unknown_selected_family_is_skipped() {
        let results = vec![family("Arvo")];
        let mut selection = SelectionSet::new();
        selection.select(SelectedFont::new("Gone", "regular"));

        assert_eq!(
            render(&results, 1, &selection),
            "1 results||Page 1 of 1|[Arvo:regular,italic,700]||"
        );
    }

    #[test]
    fn test_welcome_page() {
        assert_eq!(compose_welcome(&engine(), "0.3.0", "(c)"), "GoFont 0.3.0 (c)");
    }
}
