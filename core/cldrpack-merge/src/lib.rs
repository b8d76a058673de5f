//! Merge engine for cldrpack.
//!
//! Documents for the same locale arrive from several category files. Each
//! contributes uniquely named top-level keys, so merging is a shallow union:
//!
//! - [`MergedLocaleRecord`] — one locale's union of payloads, with the
//!   category that contributed each key
//! - [`LocaleRecordStore`] — locale → record, the single synchronization point
//! - [`build_store`] — parallel extraction feeding a single-writer merge
//!
//! Merging is commutative and associative over payloads from different
//! categories. A second payload for an already merged (locale, category)
//! pair, or one that reuses an existing key, is a [`MergeConflict`]; it is
//! never resolved by last-write-wins.

mod error;
mod pipeline;
mod record;
mod store;

pub use error::{BuildError, MergeConflict};
pub use pipeline::{BuildOptions, BuildOutput, InvalidDocumentPolicy, SkippedDocument, build_store};
pub use record::MergedLocaleRecord;
pub use store::LocaleRecordStore;
