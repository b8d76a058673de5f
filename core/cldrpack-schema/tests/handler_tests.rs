use cldrpack_schema::{DocumentLayout, Handler, PayloadTree, detect_category};
use cldrpack_types::{Category, FormatError, LocaleId};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn identity(language: &str) -> Value {
    json!({"version": {"_cldrVersion": "36"}, "language": language})
}

fn main_doc(code: &str, identity: Value, key: &str, data: Value) -> Value {
    json!({"main": {code: {"identity": identity, key: data}}})
}

fn rbnf_doc(identity: Value, data: Option<Value>) -> Value {
    let mut root = json!({"identity": identity});
    if let Some(data) = data {
        root["rbnf"] = data;
    }
    json!({"rbnf": root})
}

fn locale(code: &str) -> LocaleId {
    LocaleId::parse(code).unwrap()
}

// ── Dispatch table ────────────────────────────────────────────────

#[test]
fn every_category_has_a_handler() {
    for category in Category::ALL {
        let handler = Handler::for_category(category);
        assert_eq!(handler.category(), category);
        assert!(!handler.payload_key().is_empty());
    }
}

#[test]
fn payload_keys_are_unique_across_categories() {
    let mut keys: Vec<_> = Category::ALL
        .iter()
        .map(|c| Handler::for_category(*c).payload_key())
        .collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), Category::ALL.len());
}

#[test]
fn rbnf_and_segments_are_rooted() {
    assert_eq!(
        Handler::for_category(Category::Rbnf).layout(),
        DocumentLayout::Rooted { root: "rbnf", data: "rbnf" }
    );
    assert_eq!(
        Handler::for_category(Category::Segments).payload_key(),
        "segmentations"
    );
    assert_eq!(
        Handler::for_category(Category::LocaleNames).layout(),
        DocumentLayout::Main { payload_key: "localeDisplayNames" }
    );
}

// ── extract_metadata ──────────────────────────────────────────────

#[test]
fn metadata_from_main_document() {
    let doc = main_doc("fr", identity("fr"), "dates", json!({"calendars": {}}));
    let meta = Handler::for_category(Category::Dates).extract_metadata(&doc).unwrap();
    assert_eq!(meta.locale, locale("fr"));
    assert_eq!(meta.source_version, "36");
}

#[test]
fn metadata_reads_optional_fields() {
    let id = json!({
        "version": {"cldrVersion": "29"},
        "language": "sr",
        "script": "Latn",
        "territory": "BA"
    });
    let doc = main_doc("sr-Latn-BA", id, "numbers", json!({"symbols": {}}));
    let meta = Handler::for_category(Category::Numbers).extract_metadata(&doc).unwrap();
    assert_eq!(meta.locale.script(), Some("Latn"));
    assert_eq!(meta.locale.territory(), Some("BA"));
    assert_eq!(meta.locale.variant(), None);
    assert_eq!(meta.source_version, "29");
}

#[test]
fn metadata_from_rooted_document() {
    let doc = rbnf_doc(identity("ja"), Some(json!({"SpelloutRules": {}})));
    let meta = Handler::for_category(Category::Rbnf).extract_metadata(&doc).unwrap();
    assert_eq!(meta.locale, locale("ja"));
}

#[test]
fn missing_language_is_format_error() {
    let doc = main_doc("fr", json!({"version": {"_cldrVersion": "36"}}), "dates", json!({}));
    let err = Handler::for_category(Category::Dates).extract_metadata(&doc).unwrap_err();
    assert_eq!(err, FormatError::MissingProperty { name: "language".into() });
}

#[test]
fn missing_language_in_rooted_document_is_format_error() {
    let doc = rbnf_doc(json!({"version": {"_cldrVersion": "36"}}), None);
    assert!(Handler::for_category(Category::Rbnf).extract_metadata(&doc).is_err());
}

#[test]
fn missing_identity_block_is_format_error() {
    let doc = json!({"rbnf": {"rbnf": {"x": "y"}}});
    let err = Handler::for_category(Category::Rbnf).extract_metadata(&doc).unwrap_err();
    assert_eq!(err, FormatError::MissingProperty { name: "identity".into() });
}

#[test]
fn missing_version_is_format_error() {
    let doc = rbnf_doc(json!({"version": {}, "language": "ja"}), None);
    let err = Handler::for_category(Category::Rbnf).extract_metadata(&doc).unwrap_err();
    assert_eq!(err, FormatError::MissingProperty { name: "cldrVersion".into() });
}

#[test]
fn keyed_code_must_match_identity() {
    let doc = main_doc("fr-CA", identity("fr"), "dates", json!({}));
    let err = Handler::for_category(Category::Dates).extract_metadata(&doc).unwrap_err();
    assert_eq!(
        err,
        FormatError::LocaleMismatch {
            keyed: "fr-CA".into(),
            declared: "fr".into()
        }
    );
}

#[test]
fn invalid_identity_subtag_is_format_error() {
    let id = json!({"version": {"_cldrVersion": "36"}, "language": "fr", "territory": "Canada"});
    let doc = rbnf_doc(id, None);
    let err = Handler::for_category(Category::Rbnf).extract_metadata(&doc).unwrap_err();
    assert!(matches!(err, FormatError::InvalidLocaleCode { .. }));
}

#[test]
fn wrong_layout_for_category() {
    let doc = main_doc("fr", identity("fr"), "dates", json!({}));
    let err = Handler::for_category(Category::Rbnf).extract_metadata(&doc).unwrap_err();
    assert!(matches!(err, FormatError::PropertyCount { .. } | FormatError::MissingProperty { .. }));
}

#[test]
fn non_object_document_is_category_mismatch() {
    let err = Handler::for_category(Category::Dates)
        .extract_metadata(&json!("fr"))
        .unwrap_err();
    assert_eq!(err, FormatError::CategoryMismatch(Category::Dates));
}

#[test]
fn main_with_two_locales_is_rejected() {
    let doc = json!({"main": {
        "fr": {"identity": identity("fr"), "dates": {}},
        "de": {"identity": identity("de"), "dates": {}}
    }});
    let err = Handler::for_category(Category::Dates).extract_metadata(&doc).unwrap_err();
    assert_eq!(err, FormatError::PropertyCount { expected: 1, found: 2 });
}

// ── remove_metadata ───────────────────────────────────────────────

#[test]
fn remove_metadata_excises_identity() {
    let mut doc = main_doc("fr", identity("fr"), "dates", json!({"a": "b"}));
    Handler::for_category(Category::Dates).remove_metadata(&mut doc).unwrap();
    assert_eq!(doc, json!({"main": {"fr": {"dates": {"a": "b"}}}}));
}

#[test]
fn remove_metadata_twice_fails() {
    let handler = Handler::for_category(Category::Rbnf);
    let mut doc = rbnf_doc(identity("ja"), None);
    handler.remove_metadata(&mut doc).unwrap();
    assert!(handler.remove_metadata(&mut doc).is_err());
}

// ── prepare_for_merge ─────────────────────────────────────────────

#[test]
fn prepare_isolates_main_payload() {
    let handler = Handler::for_category(Category::Numbers);
    let mut doc = main_doc("fr", identity("fr"), "numbers", json!({"symbols": {"decimal": ","}}));
    handler.remove_metadata(&mut doc).unwrap();

    let payload = handler.prepare_for_merge(&locale("fr"), doc).unwrap().unwrap();
    assert_eq!(
        payload,
        PayloadTree::single("numbers", json!({"symbols": {"decimal": ","}}))
    );
}

#[test]
fn prepare_isolates_rbnf_payload_under_rbnf_key() {
    let handler = Handler::for_category(Category::Rbnf);
    let rules = json!({"SpelloutRules": {"%spellout-numbering": {"0": "〇;"}}});
    let mut doc = rbnf_doc(identity("ja"), Some(rules.clone()));
    handler.remove_metadata(&mut doc).unwrap();

    let payload = handler.prepare_for_merge(&locale("ja"), doc).unwrap().unwrap();
    assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["rbnf"]);
    assert_eq!(payload.get("rbnf"), Some(&rules));
}

#[test]
fn rbnf_with_empty_data_has_no_payload() {
    let handler = Handler::for_category(Category::Rbnf);
    let mut doc = rbnf_doc(identity("ja"), Some(json!({})));
    handler.remove_metadata(&mut doc).unwrap();
    assert_eq!(handler.prepare_for_merge(&locale("ja"), doc).unwrap(), None);
}

#[test]
fn rbnf_with_absent_data_has_no_payload() {
    let handler = Handler::for_category(Category::Rbnf);
    let mut doc = rbnf_doc(identity("ja"), None);
    handler.remove_metadata(&mut doc).unwrap();
    assert_eq!(handler.prepare_for_merge(&locale("ja"), doc).unwrap(), None);
}

#[test]
fn residual_property_is_rejected() {
    let handler = Handler::for_category(Category::Dates);
    let doc = json!({"main": {"fr": {"dates": {"a": "b"}, "extra": {}}}});
    let err = handler.prepare_for_merge(&locale("fr"), doc).unwrap_err();
    assert_eq!(err, FormatError::PropertyCount { expected: 0, found: 1 });
}

#[test]
fn identity_left_in_place_is_rejected() {
    let handler = Handler::for_category(Category::Dates);
    let doc = main_doc("fr", identity("fr"), "dates", json!({"a": "b"}));
    assert!(handler.prepare_for_merge(&locale("fr"), doc).is_err());
}

#[test]
fn string_data_node_is_wrong_type() {
    let handler = Handler::for_category(Category::Segments);
    let doc = json!({"segments": {"segmentations": "none"}});
    let err = handler.prepare_for_merge(&locale("de"), doc).unwrap_err();
    assert!(matches!(err, FormatError::WrongPropertyType { .. }));
}

// ── detect_category ───────────────────────────────────────────────

#[test]
fn detects_main_categories_by_payload_key() {
    let doc = main_doc("fr", identity("fr"), "listPatterns", json!({"x": "y"}));
    assert_eq!(detect_category(&doc), Some(Category::ListPatterns));
}

#[test]
fn detects_rooted_categories() {
    assert_eq!(detect_category(&rbnf_doc(identity("ja"), None)), Some(Category::Rbnf));
    let seg = json!({"segments": {"identity": identity("de"), "segmentations": {}}});
    assert_eq!(detect_category(&seg), Some(Category::Segments));
}

#[test]
fn unknown_shape_is_not_detected() {
    assert_eq!(detect_category(&json!({"supplemental": {}})), None);
    assert_eq!(detect_category(&json!({"main": {"fr": {"identity": {}}}})), None);
}
