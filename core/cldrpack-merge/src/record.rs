//! A single locale's merged data.

use std::collections::{BTreeMap, BTreeSet};

use cldrpack_schema::PayloadTree;
use cldrpack_types::{Category, LocaleId};
use serde_json::{Map, Value};

use crate::MergeConflict;

/// The union of every payload merged for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLocaleRecord {
    locale: LocaleId,
    data: Map<String, Value>,
    /// Which category contributed each top-level key of `data`.
    sources: BTreeMap<String, Category>,
}

impl MergedLocaleRecord {
    /// Creates a record holding a single category's payload.
    #[must_use]
    pub fn new(locale: LocaleId, category: Category, payload: PayloadTree) -> Self {
        let mut record = Self {
            locale,
            data: Map::new(),
            sources: BTreeMap::new(),
        };
        record.insert_unchecked(category, payload);
        record
    }

    #[must_use]
    pub fn locale(&self) -> &LocaleId {
        &self.locale
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// Categories that have contributed to this record.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<Category> {
        self.sources.values().copied().collect()
    }

    /// The category that contributed `key`, if any.
    #[must_use]
    pub fn source_of(&self, key: &str) -> Option<Category> {
        self.sources.get(key).copied()
    }

    /// Returns the conflict that merging `payload` for `category` would cause.
    #[must_use]
    pub fn conflict_with(&self, category: Category, payload: &PayloadTree) -> Option<MergeConflict> {
        if let Some(key) = payload.keys().find(|key| self.data.contains_key(*key)) {
            return Some(self.conflict(category, Some(key.to_string())));
        }
        self.sources
            .values()
            .any(|c| *c == category)
            .then(|| self.conflict(category, None))
    }

    /// Shallow-merges `payload` into this record.
    ///
    /// On conflict the record is left unchanged.
    pub fn merge(&mut self, category: Category, payload: PayloadTree) -> Result<(), MergeConflict> {
        if let Some(conflict) = self.conflict_with(category, &payload) {
            return Err(conflict);
        }
        self.insert_unchecked(category, payload);
        Ok(())
    }

    /// Returns the conflict that absorbing `other` would cause.
    pub(crate) fn conflict_with_record(&self, other: &MergedLocaleRecord) -> Option<MergeConflict> {
        let theirs = other.categories();
        if let Some((key, category)) = other
            .sources
            .iter()
            .find(|(key, _)| self.data.contains_key(key.as_str()))
        {
            return Some(self.conflict(*category, Some(key.clone())));
        }
        self.categories()
            .intersection(&theirs)
            .next()
            .map(|category| self.conflict(*category, None))
    }

    /// Merges a record for the same locale produced by another build run.
    /// Callers check [`Self::conflict_with_record`] first.
    pub(crate) fn absorb_unchecked(&mut self, other: MergedLocaleRecord) {
        self.data.extend(other.data);
        self.sources.extend(other.sources);
    }

    fn insert_unchecked(&mut self, category: Category, payload: PayloadTree) {
        for (key, value) in payload.into_map() {
            self.sources.insert(key.clone(), category);
            self.data.insert(key, value);
        }
    }

    fn conflict(&self, category: Category, key: Option<String>) -> MergeConflict {
        MergeConflict {
            locale: self.locale.clone(),
            category,
            key,
        }
    }
}
