//! The per-package mapping from locale to merged record.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use cldrpack_schema::PayloadTree;
use cldrpack_types::{Category, LocaleId};
use tracing::debug;

use crate::{MergeConflict, MergedLocaleRecord};

/// Locale → merged record. Created fresh per package build.
///
/// Iteration order is unspecified; use [`LocaleRecordStore::sorted`] when a
/// stable order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleRecordStore {
    records: HashMap<LocaleId, MergedLocaleRecord>,
}

impl LocaleRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one category's payload into the record for `locale`.
    ///
    /// Creates the record if needed. An empty payload contributes nothing and
    /// leaves the store unchanged. On conflict the store is left unchanged.
    pub fn merge_into(
        &mut self,
        locale: LocaleId,
        category: Category,
        payload: PayloadTree,
    ) -> Result<(), MergeConflict> {
        if payload.is_empty() {
            debug!(locale = %locale, category = %category, "Empty payload, nothing to merge");
            return Ok(());
        }

        match self.records.entry(locale) {
            Entry::Vacant(slot) => {
                debug!(locale = %slot.key(), category = %category, "New locale record");
                let record = MergedLocaleRecord::new(slot.key().clone(), category, payload);
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                debug!(locale = %slot.key(), category = %category, "Merging into existing record");
                slot.get_mut().merge(category, payload)?;
            }
        }
        Ok(())
    }

    /// Combines a store from another build run into this one.
    ///
    /// Every record is checked before any is moved, so a conflict leaves
    /// this store unchanged.
    pub fn absorb(&mut self, other: LocaleRecordStore) -> Result<(), MergeConflict> {
        if let Some(conflict) = other.records.values().find_map(|theirs| {
            self.records
                .get(theirs.locale())
                .and_then(|ours| ours.conflict_with_record(theirs))
        }) {
            return Err(conflict);
        }

        for (locale, theirs) in other.records {
            match self.records.entry(locale) {
                Entry::Vacant(slot) => {
                    slot.insert(theirs);
                }
                Entry::Occupied(mut slot) => slot.get_mut().absorb_unchecked(theirs),
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, locale: &LocaleId) -> Option<&MergedLocaleRecord> {
        self.records.get(locale)
    }

    #[must_use]
    pub fn contains(&self, locale: &LocaleId) -> bool {
        self.records.contains_key(locale)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleId> {
        self.records.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedLocaleRecord> {
        self.records.values()
    }

    /// Records ordered by locale code.
    #[must_use]
    pub fn sorted(&self) -> Vec<&MergedLocaleRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.locale().cmp(b.locale()));
        records
    }

    pub fn into_records(self) -> impl Iterator<Item = MergedLocaleRecord> {
        self.records.into_values()
    }
}
