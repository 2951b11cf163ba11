//! Tolerant parsing of Google Fonts Developer API responses.
//!
//! Only `family`, `category`, `variants` and `files` are required to build a
//! usable family. Everything else is optional metadata, and a malformed item
//! is skipped without failing the rest of the response.

use super::family::{GoogleFontFamily, GoogleFontVariant};
use crate::error::CatalogError;
use crate::http::{Fetcher, upgrade_to_https};
use crate::model::{FontCategory, FontStyle, FontWeight};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Decode the weight and style encoded in a Google variant id.
///
/// `"italic"` anywhere marks the italic style; what remains is the weight
/// token, with an empty remainder meaning normal (`"italic"` → normal italic).
pub fn parse_variant_id(id: &str) -> Option<(FontWeight, FontStyle)> {
    let style = if id.contains("italic") {
        FontStyle::Italic
    } else {
        FontStyle::Regular
    };
    let token = id.replace("italic", "");
    let weight = if token.is_empty() {
        FontWeight::Normal
    } else {
        FontWeight::from_raw(&token)?
    };
    Some((weight, style))
}

/// Parse a full catalog response into families, in response order.
pub(crate) fn parse_catalog(
    bytes: &[u8],
    fetcher: &Arc<dyn Fetcher>,
) -> Result<Vec<GoogleFontFamily>, CatalogError> {
    let items = parse_items(bytes)?;
    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| parse_item(index, item, fetcher))
        .collect())
}

fn parse_items(bytes: &[u8]) -> Result<Vec<Value>, CatalogError> {
    let document: Value = serde_json::from_slice(bytes)?;
    match document {
        Value::Object(mut root) => match root.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(CatalogError::Parse("'items' is not an array".to_string())),
            None => Err(CatalogError::Parse("response has no 'items'".to_string())),
        },
        _ => Err(CatalogError::Parse(
            "response is not a JSON object".to_string(),
        )),
    }
}

fn string_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(item: &Map<String, Value>, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_item(
    index: usize,
    item: &Value,
    fetcher: &Arc<dyn Fetcher>,
) -> Option<GoogleFontFamily> {
    let Some(item) = item.as_object() else {
        log::warn!("Skipping catalog item {}: not an object", index);
        return None;
    };
    let Some(name) = string_field(item, "family") else {
        log::warn!("Skipping catalog item {}: missing family name", index);
        return None;
    };

    let category = string_field(item, "category")
        .map(|c| FontCategory::from_api(&c))
        .unwrap_or(FontCategory::Unknown);

    let files: HashMap<&str, String> = item
        .get("files")
        .and_then(Value::as_object)
        .map(|files| {
            files
                .iter()
                .filter_map(|(id, url)| url.as_str().map(|u| (id.as_str(), upgrade_to_https(u))))
                .collect()
        })
        .unwrap_or_default();

    let mut variant_ids = Vec::new();
    let mut variants = HashMap::new();
    for id in string_list(item, "variants") {
        let Some((weight, style)) = parse_variant_id(&id) else {
            log::warn!("Skipping variant '{}' of '{}': unrecognised weight", id, name);
            continue;
        };
        let Some(url) = files.get(id.as_str()) else {
            log::warn!("Skipping variant '{}' of '{}': no file URL", id, name);
            continue;
        };
        if variants.contains_key(&id) {
            continue;
        }
        variants.insert(
            id.clone(),
            GoogleFontVariant {
                id: id.clone(),
                family_name: name.clone(),
                weight,
                style,
                url: url.clone(),
            },
        );
        variant_ids.push(id);
    }

    let last_modified = string_field(item, "lastModified")
        .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());

    Some(GoogleFontFamily {
        name,
        category,
        variant_ids,
        variants,
        kind: string_field(item, "kind"),
        subsets: string_list(item, "subsets"),
        version: string_field(item, "version"),
        last_modified,
        fetcher: Arc::clone(fetcher),
    })
}

/// Family names in response order, for orderings that only need names.
pub(crate) fn parse_family_names(families: &[GoogleFontFamily]) -> Vec<String> {
    families.iter().map(|f| f.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{FontFamily, FontVariant};
    use crate::http::StaticFetcher;

    fn fetcher() -> Arc<dyn Fetcher> {
        Arc::new(StaticFetcher::new())
    }

    #[test]
    fn test_parse_variant_id_convention() {
        assert_eq!(parse_variant_id("regular"), Some((FontWeight::Normal, FontStyle::Regular)));
        assert_eq!(parse_variant_id("italic"), Some((FontWeight::Normal, FontStyle::Italic)));
        assert_eq!(parse_variant_id("700"), Some((FontWeight::Bold, FontStyle::Regular)));
        assert_eq!(parse_variant_id("100italic"), Some((FontWeight::Thin, FontStyle::Italic)));
        assert_eq!(parse_variant_id("950"), None);
    }

    #[test]
    fn test_parse_full_item() {
        let json = br#"{
            "kind": "webfonts#webfontList",
            "items": [{
                "kind": "webfonts#webfont",
                "family": "Roboto",
                "category": "sans-serif",
                "variants": ["100", "regular", "700italic"],
                "subsets": ["latin", "cyrillic"],
                "version": "v20",
                "lastModified": "2019-07-24",
                "files": {
                    "100": "http://fonts.gstatic.com/s/roboto/v20/thin.ttf",
                    "regular": "https://fonts.gstatic.com/s/roboto/v20/regular.ttf",
                    "700italic": "http://fonts.gstatic.com/s/roboto/v20/bolditalic.ttf"
                }
            }]
        }"#;

        let families = parse_catalog(json, &fetcher()).unwrap();
        assert_eq!(families.len(), 1);
        let roboto = &families[0];
        assert_eq!(roboto.name(), "Roboto");
        assert_eq!(roboto.category(), FontCategory::SansSerif);
        assert_eq!(roboto.variant_ids(), ["100", "regular", "700italic"]);
        assert_eq!(roboto.kind(), Some("webfonts#webfont"));
        assert_eq!(roboto.subsets(), ["latin", "cyrillic"]);
        assert_eq!(roboto.version(), Some("v20"));
        assert_eq!(roboto.last_modified(), NaiveDate::from_ymd_opt(2019, 7, 24));

        let thin = roboto.google_variant("100").unwrap();
        assert_eq!(thin.url(), "https://fonts.gstatic.com/s/roboto/v20/thin.ttf");
        let bold_italic = roboto.variant("700italic").unwrap();
        assert_eq!(bold_italic.weight(), FontWeight::Bold);
        assert_eq!(bold_italic.style(), FontStyle::Italic);
    }

    #[test]
    fn test_optional_fields_may_be_missing_or_malformed() {
        let json = br#"{"items": [{
            "family": "Bungee",
            "category": "blackletter",
            "variants": ["regular"],
            "subsets": 7,
            "version": null,
            "lastModified": "yesterday",
            "files": {"regular": "https://f.test/bungee.ttf"}
        }]}"#;

        let families = parse_catalog(json, &fetcher()).unwrap();
        let bungee = &families[0];
        assert_eq!(bungee.category(), FontCategory::Unknown);
        assert!(bungee.subsets().is_empty());
        assert_eq!(bungee.version(), None);
        assert_eq!(bungee.last_modified(), None);
        assert_eq!(bungee.kind(), None);
    }

    #[test]
    fn test_bad_items_and_variants_are_skipped() {
        let json = br#"{"items": [
            "not an object",
            {"category": "serif"},
            {
                "family": "Partial",
                "category": "serif",
                "variants": ["regular", "950", "700"],
                "files": {"regular": "https://f.test/p.ttf", "950": "https://f.test/p9.ttf"}
            }
        ]}"#;

        let families = parse_catalog(json, &fetcher()).unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].variant_ids(), ["regular"]);
        assert!(families[0].variant("700").is_none());
        assert_eq!(parse_family_names(&families), vec!["Partial"]);
    }

    #[test]
    fn test_malformed_documents_are_parse_errors() {
        assert!(matches!(parse_catalog(b"{not json", &fetcher()), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_catalog(b"[]", &fetcher()), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_catalog(br#"{"items": {}}"#, &fetcher()), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_catalog(br#"{"kind": "x"}"#, &fetcher()), Err(CatalogError::Parse(_))));
    }
}
