//! Building a catalog package from raw locale documents.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cldrpack_merge::{BuildOptions, BuildOutput, build_store};
use cldrpack_schema::RawDocument;
use cldrpack_types::Category;
use tracing::info;

use crate::{Package, PackageError, PackageManifest, PackageWriter};

/// A populated record store together with the manifest describing it.
#[derive(Debug)]
pub struct BuiltPackage {
    pub package: &'static Package,
    pub manifest: PackageManifest,
    pub output: BuildOutput,
}

impl BuiltPackage {
    /// Serializes the package archive.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        self.writer()?.build()
    }

    /// Writes the archive into `dir` under the package's file name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, PackageError> {
        let path = dir.join(self.package.file_name());
        self.writer()?.write_to(&path)?;
        Ok(path)
    }

    fn writer(&self) -> Result<PackageWriter, PackageError> {
        PackageWriter::new(self.manifest.clone()).records(&self.output.store)
    }
}

/// Validates, extracts and merges `documents` into `package`.
///
/// Every document must belong to a category the package declares.
/// Supplemental packages are not locale-keyed and are rejected.
pub fn build_package(
    package: &'static Package,
    documents: Vec<RawDocument>,
    options: &BuildOptions,
) -> Result<BuiltPackage, PackageError> {
    if !package.kind().is_locale_keyed() {
        return Err(PackageError::UnsupportedKind(package.name().to_string()));
    }
    if let Some((index, doc)) = documents
        .iter()
        .enumerate()
        .find(|(_, doc)| !package.declares(doc.category))
    {
        return Err(PackageError::UndeclaredCategory {
            package: package.name().to_string(),
            category: doc.category,
            index,
        });
    }

    let output = build_store(documents, options)?;

    let mut manifest = PackageManifest::for_package(package);
    manifest.source_versions = output
        .source_versions()
        .into_iter()
        .map(str::to_string)
        .collect();
    manifest.categories = output
        .store
        .iter()
        .flat_map(|record| record.categories())
        .collect::<BTreeSet<Category>>()
        .into_iter()
        .collect();
    manifest.locales = output
        .store
        .sorted()
        .into_iter()
        .map(|record| record.locale().to_code())
        .collect();

    info!(
        package = %package,
        locales = manifest.locales.len(),
        skipped = output.skipped.len(),
        "Package built"
    );

    Ok(BuiltPackage {
        package,
        manifest,
        output,
    })
}
