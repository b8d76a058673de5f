use cldrpack_merge::{LocaleRecordStore, MergeConflict};
use cldrpack_schema::PayloadTree;
use cldrpack_types::{Category, LocaleId};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;

fn locale(code: &str) -> LocaleId {
    LocaleId::parse(code).unwrap()
}

fn dates() -> PayloadTree {
    PayloadTree::single("dates", json!({"calendars": {"gregorian": {"months": {}}}}))
}

fn numbers() -> PayloadTree {
    PayloadTree::single("numbers", json!({"symbols": {"decimal": ","}}))
}

// ── merge_into ────────────────────────────────────────────────────

#[test]
fn first_payload_creates_record() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    assert_eq!(store.len(), 1);
    let record = store.get(&locale("fr")).unwrap();
    assert_eq!(record.locale(), &locale("fr"));
    assert_eq!(record.data(), dates().as_map());
    assert_eq!(record.source_of("dates"), Some(Category::Dates));
}

#[test]
fn different_categories_union_at_top_level() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();
    store.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();

    let record = store.get(&locale("fr")).unwrap();
    let keys: Vec<_> = record.data().keys().cloned().collect();
    assert_eq!(keys, vec!["dates".to_string(), "numbers".to_string()]);
    assert_eq!(record.data()["dates"], dates().as_map()["dates"]);
    assert_eq!(record.data()["numbers"], numbers().as_map()["numbers"]);
    assert_eq!(
        record.categories(),
        BTreeSet::from([Category::Dates, Category::Numbers])
    );
}

#[test]
fn different_locales_get_separate_records() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();
    store.merge_into(locale("fr-CA"), Category::Dates, dates()).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.contains(&locale("fr-CA")));
}

#[test]
fn same_category_twice_is_conflict() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    let err = store
        .merge_into(
            locale("fr"),
            Category::Dates,
            PayloadTree::single("dates", json!({"fields": {}})),
        )
        .unwrap_err();
    assert_eq!(
        err,
        MergeConflict {
            locale: locale("fr"),
            category: Category::Dates,
            key: Some("dates".into()),
        }
    );
}

#[test]
fn same_category_with_new_key_is_still_conflict() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    let err = store
        .merge_into(
            locale("fr"),
            Category::Dates,
            PayloadTree::single("dateFields", json!({"era": {}})),
        )
        .unwrap_err();
    assert_eq!(err.key, None);
    assert_eq!(err.category, Category::Dates);
}

#[test]
fn key_reused_by_other_category_is_conflict() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();
    let err = store
        .merge_into(locale("fr"), Category::Rbnf, numbers())
        .unwrap_err();
    assert_eq!(err.category, Category::Rbnf);
    assert_eq!(err.key.as_deref(), Some("numbers"));
}

#[test]
fn conflict_leaves_store_unchanged() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();
    let before = store.clone();

    let mut payload = numbers().into_map();
    payload.insert("units".into(), json!({"short": {}}));
    assert!(
        store
            .merge_into(locale("fr"), Category::Units, PayloadTree::new(payload))
            .is_err()
    );
    assert_eq!(store, before);
}

#[test]
fn empty_payload_is_a_no_op() {
    let mut store = LocaleRecordStore::new();
    store
        .merge_into(locale("ja"), Category::Rbnf, PayloadTree::default())
        .unwrap();
    assert!(store.is_empty());
}

#[test]
fn conflict_message_names_locale_and_category() {
    let conflict = MergeConflict {
        locale: locale("de-AT"),
        category: Category::Units,
        key: None,
    };
    let msg = conflict.to_string();
    assert!(msg.contains("de-AT"));
    assert!(msg.contains("units"));
}

// ── absorb ────────────────────────────────────────────────────────

#[test]
fn absorb_combines_disjoint_runs() {
    let mut first = LocaleRecordStore::new();
    first.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    let mut second = LocaleRecordStore::new();
    second.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();
    second.merge_into(locale("de"), Category::Numbers, numbers()).unwrap();

    first.absorb(second).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(
        first.get(&locale("fr")).unwrap().categories(),
        BTreeSet::from([Category::Dates, Category::Numbers])
    );
}

#[test]
fn absorb_equals_merging_everything_in_one_store() {
    let mut first = LocaleRecordStore::new();
    first.merge_into(locale("fr"), Category::Dates, dates()).unwrap();
    let mut second = LocaleRecordStore::new();
    second.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();
    first.absorb(second).unwrap();

    let mut single = LocaleRecordStore::new();
    single.merge_into(locale("fr"), Category::Numbers, numbers()).unwrap();
    single.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    assert_eq!(first, single);
}

#[test]
fn absorb_conflict_leaves_store_unchanged() {
    let mut first = LocaleRecordStore::new();
    first.merge_into(locale("fr"), Category::Dates, dates()).unwrap();
    let before = first.clone();

    let mut second = LocaleRecordStore::new();
    second.merge_into(locale("de"), Category::Numbers, numbers()).unwrap();
    second.merge_into(locale("fr"), Category::Dates, dates()).unwrap();

    let err = first.absorb(second).unwrap_err();
    assert_eq!(err.locale, locale("fr"));
    assert_eq!(first, before);
}

// ── Accessors ─────────────────────────────────────────────────────

#[test]
fn sorted_orders_by_locale() {
    let mut store = LocaleRecordStore::new();
    for code in ["ja", "de", "fr"] {
        store.merge_into(locale(code), Category::Dates, dates()).unwrap();
    }
    let codes: Vec<_> = store.sorted().iter().map(|r| r.locale().to_code()).collect();
    assert_eq!(codes, vec!["de", "fr", "ja"]);
}

#[test]
fn into_records_yields_every_record() {
    let mut store = LocaleRecordStore::new();
    store.merge_into(locale("fr"), Category::Dates, dates()).unwrap();
    store.merge_into(locale("de"), Category::Dates, dates()).unwrap();
    let mut codes: Vec<_> = store.into_records().map(|r| r.locale().to_code()).collect();
    codes.sort();
    assert_eq!(codes, vec!["de", "fr"]);
}
