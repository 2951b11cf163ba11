//! Several providers behind one aggregator.

mod common;

use common::{StubFamily, TestSession, google_provider, stub_provider};
use gofont_catalog::{FontCategory, FontFilter, FontManager, FontQuery, FontSort, FontWeight};
use std::sync::Arc;

fn roboto_and_rocket() -> (Arc<dyn gofont_catalog::FontHandler>, Arc<dyn gofont_catalog::FontHandler>) {
    (
        stub_provider(
            "a",
            vec![StubFamily::new("Roboto", FontCategory::SansSerif, &[FontWeight::Normal, FontWeight::Bold])],
        ),
        stub_provider(
            "b",
            vec![StubFamily::new("Rocket", FontCategory::Display, &[FontWeight::Black])],
        ),
    )
}

#[test]
fn test_results_concatenate_in_registration_order() {
    let (a, b) = roboto_and_rocket();
    let manager = FontManager::new();
    manager.add_handler(Arc::clone(&a));
    manager.add_handler(Arc::clone(&b));

    let results = manager.query_fonts(&FontQuery::new("ro", FontSort::Alpha));
    let names: Vec<&str> = results.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["Roboto", "Rocket"]);

    // The aggregator hands back the providers' own instances.
    assert!(Arc::ptr_eq(&results[0], &a.get_font("Roboto").unwrap()));
    assert!(Arc::ptr_eq(&results[1], &b.get_font("Rocket").unwrap()));
    assert_eq!(results[0].variant_ids(), ["regular", "700"]);
}

#[test]
fn test_family_level_weight_filter() {
    let (a, b) = roboto_and_rocket();
    let manager = FontManager::with_handlers(vec![a, b]);
    let mut filter = FontFilter::default();
    filter.weights = [FontWeight::Thin, FontWeight::Light].into_iter().collect();
    assert!(manager.query_fonts(&FontQuery::default().with_filter(filter)).is_empty());

    let mut filter = FontFilter::default();
    filter.weights = [FontWeight::Bold].into_iter().collect();
    let results = manager.query_fonts(&FontQuery::default().with_filter(filter));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "Roboto");
}

#[test]
fn test_session_over_two_providers() {
    let (a, b) = roboto_and_rocket();
    let session = TestSession::new(vec![a, b]);
    session.browser.submit_search("ro");

    assert_eq!(session.page(), "2 results||Page 1 of 1|[Roboto:regular,700][Rocket:900]||");

    session.browser.handle_event("selectFont", &serde_json::json!("Rocket|900"));
    session.browser.load_page(1);
    assert!(session.page().contains("[Rocket:900*]"));
}

#[test]
fn test_same_name_from_two_providers_both_listed_first_wins_lookup() {
    let session = TestSession::new(vec![
        google_provider(),
        stub_provider(
            "stub",
            vec![StubFamily::new("Lato", FontCategory::Serif, &[FontWeight::Thin])],
        ),
    ]);
    session.browser.submit_search("lato");
    session.browser.wait_idle().unwrap();

    assert_eq!(session.browser.result_names().unwrap(), vec!["Lato", "Lato"]);
    let lato = session.manager.get_font("Lato").unwrap();
    assert_eq!(lato.category(), FontCategory::SansSerif);
}
