//! Error types for the package crate.

use cldrpack_merge::BuildError;
use cldrpack_types::{Category, FormatError};
use thiserror::Error;

use crate::PackageKind;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("missing required entry: {0}")]
    MissingEntry(String),

    #[error("manifest validation error: {0}")]
    ManifestInvalid(String),

    #[error("not a package file: {0}")]
    UnsupportedExtension(String),

    #[error("file extension is for {extension} packages but the manifest declares {declared}")]
    KindMismatch {
        extension: PackageKind,
        declared: PackageKind,
    },

    #[error("{0} packages hold supplemental data and cannot be built from locale documents")]
    UnsupportedKind(String),

    #[error("package {package} does not declare category {category} (document {index})")]
    UndeclaredCategory {
        package: String,
        category: Category,
        index: usize,
    },

    #[error("unknown package: {0}")]
    UnknownPackage(String),
}
