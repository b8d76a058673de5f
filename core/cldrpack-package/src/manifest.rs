//! Package manifest (manifest.toml) within a built package.

use cldrpack_types::{Category, LocaleId};
use serde::{Deserialize, Serialize};

use crate::{Package, PackageError, PackageKind};

/// Top-level manifest embedded in every built package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Catalog name (e.g., "cldr-dates").
    pub name: String,
    pub kind: PackageKind,
    pub description: String,
    /// Distinct CLDR versions of the source documents.
    pub source_versions: Vec<String>,
    /// Categories that contributed data, sorted.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Locale codes with a record in the package, sorted.
    #[serde(default)]
    pub locales: Vec<String>,
    /// Tool that produced the package.
    pub generator: String,
}

impl PackageManifest {
    /// A manifest for `package` with no locales yet.
    #[must_use]
    pub fn for_package(package: &Package) -> Self {
        Self {
            name: package.name().to_string(),
            kind: package.kind(),
            description: package.description().to_string(),
            source_versions: Vec::new(),
            categories: Vec::new(),
            locales: Vec::new(),
            generator: concat!("cldrpack ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// The catalog entry this manifest names.
    pub fn package(&self) -> Result<&'static Package, PackageError> {
        Package::find(&self.name).ok_or_else(|| PackageError::UnknownPackage(self.name.clone()))
    }

    /// Parsed locale identities, in manifest order.
    pub fn locale_ids(&self) -> Result<Vec<LocaleId>, PackageError> {
        self.locales
            .iter()
            .map(|code| LocaleId::parse(code).map_err(PackageError::from))
            .collect()
    }

    /// Validates the manifest against the catalog.
    pub fn validate(&self) -> Result<(), PackageError> {
        if self.name.is_empty() {
            return Err(PackageError::ManifestInvalid("name is required".into()));
        }
        let package = self.package()?;
        if package.name() != self.name {
            return Err(PackageError::ManifestInvalid(format!(
                "name must be the full catalog name {:?}",
                package.name()
            )));
        }
        if package.kind() != self.kind {
            return Err(PackageError::ManifestInvalid(format!(
                "{} is a {} package, not {}",
                package.name(),
                package.kind(),
                self.kind
            )));
        }
        if let Some(category) = self.categories.iter().find(|c| !package.declares(**c)) {
            return Err(PackageError::ManifestInvalid(format!(
                "category {category} is not part of {}",
                package.name()
            )));
        }
        if !is_strictly_sorted(&self.categories) {
            return Err(PackageError::ManifestInvalid(
                "categories must be sorted and unique".into(),
            ));
        }

        let locales = self.locale_ids()?;
        if !is_strictly_sorted(&locales) {
            return Err(PackageError::ManifestInvalid(
                "locales must be sorted and unique".into(),
            ));
        }
        if !locales.is_empty() && self.source_versions.is_empty() {
            return Err(PackageError::ManifestInvalid(
                "source_versions is required when locales are present".into(),
            ));
        }
        Ok(())
    }
}

fn is_strictly_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}
