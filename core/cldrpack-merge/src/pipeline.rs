//! Parallel extraction with a single-writer merge.
//!
//! Validation and extraction share no state, so documents are split across
//! scoped worker threads. Results are then merged sequentially, in input
//! order, by the calling thread: the store is never mutated concurrently.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use cldrpack_schema::{ExtractedMetadata, Extraction, RawDocument};
use cldrpack_types::{Category, FormatError};
use tracing::{debug, info, warn};

use crate::{BuildError, LocaleRecordStore};

/// What to do with a document that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidDocumentPolicy {
    /// Abort the whole build with [`BuildError::Format`].
    #[default]
    Abort,
    /// Log a warning, record the document in [`BuildOutput::skipped`] and continue.
    Skip,
}

/// Tuning knobs for [`build_store`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub on_invalid: InvalidDocumentPolicy,
    /// Extraction threads; defaults to the available parallelism.
    pub workers: Option<usize>,
}

impl BuildOptions {
    fn worker_count(&self, documents: usize) -> usize {
        let requested = self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        requested.clamp(1, documents.max(1))
    }
}

/// A document dropped under [`InvalidDocumentPolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDocument {
    /// Position of the document in the build input.
    pub index: usize,
    pub category: Category,
    pub error: FormatError,
}

/// Everything a build produces for the serializer.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub store: LocaleRecordStore,
    /// Metadata of every successfully extracted document, in input order.
    pub provenance: Vec<ExtractedMetadata>,
    pub skipped: Vec<SkippedDocument>,
    /// Documents that were valid but carried no payload.
    pub empty: usize,
}

impl BuildOutput {
    /// Distinct source data versions seen across the build.
    #[must_use]
    pub fn source_versions(&self) -> BTreeSet<&str> {
        self.provenance
            .iter()
            .map(|meta| meta.source_version.as_str())
            .collect()
    }

    fn apply(
        &mut self,
        index: usize,
        category: Category,
        result: Result<Extraction, FormatError>,
        policy: InvalidDocumentPolicy,
    ) -> Result<(), BuildError> {
        let extraction = match (result, policy) {
            (Ok(extraction), _) => extraction,
            (Err(source), InvalidDocumentPolicy::Abort) => {
                return Err(BuildError::Format {
                    index,
                    category,
                    source,
                });
            }
            (Err(error), InvalidDocumentPolicy::Skip) => {
                warn!(index, category = %category, error = %error, "Skipping invalid document");
                self.skipped.push(SkippedDocument {
                    index,
                    category,
                    error,
                });
                return Ok(());
            }
        };

        let locale = extraction.metadata.locale.clone();
        self.provenance.push(extraction.metadata);

        match extraction.payload {
            Some(payload) => self.store.merge_into(locale, category, payload)?,
            None => {
                debug!(index, locale = %locale, category = %category, "Document has no payload");
                self.empty += 1;
            }
        }
        Ok(())
    }
}

/// Extracts every document and merges the payloads into a fresh store.
///
/// A [`MergeConflict`](crate::MergeConflict) always aborts the build; a
/// [`FormatError`] aborts or is skipped according to `options.on_invalid`.
pub fn build_store(
    documents: Vec<RawDocument>,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let total = documents.len();
    let workers = options.worker_count(total);
    let chunk_size = total.div_ceil(workers).max(1);

    let mut pending: Vec<(usize, RawDocument)> = documents.into_iter().enumerate().collect();
    let mut chunks = Vec::with_capacity(workers);
    while !pending.is_empty() {
        let rest = pending.split_off(chunk_size.min(pending.len()));
        chunks.push(std::mem::replace(&mut pending, rest));
    }

    debug!(documents = total, workers = chunks.len(), "Extracting documents");

    let extracted = std::thread::scope(|s| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .into_iter()
                        .map(|(index, doc)| {
                            let category = doc.category;
                            (index, category, doc.extract())
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| BuildError::WorkerPanicked)?;

    // Single writer: chunks are contiguous, so this is input order.
    let mut output = BuildOutput::default();
    for (index, category, result) in extracted.into_iter().flatten() {
        output.apply(index, category, result, options.on_invalid)?;
    }

    let versions = output.source_versions();
    if versions.len() > 1 {
        warn!(versions = ?versions, "Documents come from more than one source version");
    }

    info!(
        documents = total,
        locales = output.store.len(),
        empty = output.empty,
        skipped = output.skipped.len(),
        "Build complete"
    );
    Ok(output)
}
