//! Error types for the merge crate.

use cldrpack_types::{Category, FormatError, LocaleId};
use thiserror::Error;

/// Two payloads claim the same (locale, category) pair or the same top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("merge conflict: {category} data for locale {locale} was already merged")]
pub struct MergeConflict {
    pub locale: LocaleId,
    pub category: Category,
    /// The top-level key that collided, when the collision was on a key.
    pub key: Option<String>,
}

/// Errors that abort a package build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("document {index} ({category}) is malformed: {source}")]
    Format {
        index: usize,
        category: Category,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Conflict(#[from] MergeConflict),

    #[error("extraction worker panicked")]
    WorkerPanicked,
}
