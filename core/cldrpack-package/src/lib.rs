//! CLDR packages and their archive format.
//!
//! A built package is a zip archive named `<package><ext>` where the
//! extension follows the package kind (`.cldrstd`, `.cldrseg`), containing:
//! - `manifest.toml`      — package name, kind, source versions, locales
//! - `locales/<code>.json` — one merged record per locale
//!
//! The content hash covers every entry, sorted by name.

mod archive;
mod build;
mod catalog;
mod error;
mod manifest;

pub use archive::{PackageArchive, PackageEntry, PackageWriter};
pub use build::{BuiltPackage, build_package};
pub use catalog::{Package, PackageKind};
pub use error::PackageError;
pub use manifest::PackageManifest;
