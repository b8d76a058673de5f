//! Raw documents and the per-document extraction step.

use cldrpack_types::{Category, FormatError};
use serde_json::Value;

use crate::handler::{ExtractedMetadata, Handler, PayloadTree};
use crate::validate::check_supported_shape;

/// One parsed source file together with its declared category.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub category: Category,
    pub tree: Value,
}

/// What survives of a document after extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub category: Category,
    pub metadata: ExtractedMetadata,
    /// `None` when the category has no data for this locale.
    pub payload: Option<PayloadTree>,
}

impl RawDocument {
    #[must_use]
    pub fn new(category: Category, tree: Value) -> Self {
        Self { category, tree }
    }

    /// Parses `text` as JSON and tags it with `category`.
    pub fn from_json(category: Category, text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(category, serde_json::from_str(text)?))
    }

    /// Validates the document and splits it into metadata and payload.
    ///
    /// Consumes the document; the identity block is discarded.
    pub fn extract(self) -> Result<Extraction, FormatError> {
        check_supported_shape(&self.tree)?;

        let handler = Handler::for_category(self.category);
        let metadata = handler.extract_metadata(&self.tree)?;

        let mut tree = self.tree;
        handler.remove_metadata(&mut tree)?;
        let payload = handler.prepare_for_merge(&metadata.locale, tree)?;

        Ok(Extraction {
            category: self.category,
            metadata,
            payload,
        })
    }
}
