//! Core type definitions for cldrpack.
//!
//! This crate defines the small vocabulary shared by the
//! extraction, merge and packaging crates:
//! - [`LocaleId`] — a parsed CLDR locale code (language, script, territory, variant)
//! - [`Category`] — the closed set of CLDR data categories the engine understands
//! - [`FormatError`] — every way an input document or code can be malformed

mod category;
mod locale;

pub use category::Category;
pub use locale::LocaleId;

/// Result type alias using [`FormatError`].
pub type Result<T> = std::result::Result<T, FormatError>;

/// Input violates the structural or schema assumptions of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unsupported node kind: {kind} at {path}")]
    UnsupportedNodeKind { path: String, kind: &'static str },

    #[error("missing required property: {name}")]
    MissingProperty { name: String },

    #[error("wrong type for property: {name} (expected {expected}, found {found})")]
    WrongPropertyType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected {expected} properties, but found {found}")]
    PropertyCount { expected: usize, found: usize },

    #[error("invalid locale code {code:?}: {reason}")]
    InvalidLocaleCode { code: String, reason: String },

    #[error("document is keyed as {keyed} but its identity declares {declared}")]
    LocaleMismatch { keyed: String, declared: String },

    #[error("document does not have the shape of category {0}")]
    CategoryMismatch(Category),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
