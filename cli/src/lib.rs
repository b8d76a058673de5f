//! Directory input and command implementations for the `cldrpack` binary.
//!
//! The input is a local, already extracted CLDR JSON package directory. Every
//! `*.json` file below it is parsed and classified by shape; files that are
//! not locale documents (npm `package.json`, bower metadata) are ignored.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use cldrpack_merge::{BuildError, BuildOptions, InvalidDocumentPolicy};
use cldrpack_package::{Package, PackageArchive, PackageError, build_package};
use cldrpack_schema::{RawDocument, detect_category};
use cldrpack_types::LocaleId;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Documents read from an input directory, with the file each came from.
#[derive(Debug, Default)]
pub struct CollectedDocuments {
    pub documents: Vec<RawDocument>,
    /// `paths[i]` is the file of `documents[i]`.
    pub paths: Vec<PathBuf>,
    /// JSON files that were not documents of the package.
    pub ignored: Vec<PathBuf>,
}

/// Reads every `*.json` file below `dir` that belongs to `package`.
///
/// Files are visited in path order. A main-layout document whose payload was
/// subset away cannot be classified by shape; it is attributed to the
/// package's category when the package declares exactly one.
pub fn collect_documents(dir: &Path, package: &Package) -> Result<CollectedDocuments> {
    if !dir.is_dir() {
        bail!("input {} is not a directory", dir.display());
    }

    let mut files = Vec::new();
    walk_json_files(dir, &mut files)?;
    files.sort();

    let mut collected = CollectedDocuments::default();
    for path in files {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let tree: Value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let category = match detect_category(&tree) {
            Some(category) => Some(category),
            None if is_main_document(&tree) => match package.categories() {
                [only] => Some(*only),
                _ => None,
            },
            None => None,
        };

        match category {
            Some(category) if package.declares(category) => {
                debug!(path = %path.display(), category = %category, "Collected document");
                collected.documents.push(RawDocument::new(category, tree));
                collected.paths.push(path);
            }
            _ => {
                debug!(path = %path.display(), "Ignoring file outside package");
                collected.ignored.push(path);
            }
        }
    }

    info!(
        package = %package,
        documents = collected.documents.len(),
        ignored = collected.ignored.len(),
        "Collected input"
    );
    Ok(collected)
}

fn is_main_document(tree: &Value) -> bool {
    tree.get("main").is_some_and(Value::is_object)
}

fn walk_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            walk_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

/// Looks a catalog package up by full or short name.
pub fn find_package(name: &str) -> Result<&'static Package> {
    Package::find(name).ok_or_else(|| {
        anyhow!(PackageError::UnknownPackage(name.to_string()))
            .context("run `cldrpack list` for the available packages")
    })
}

/// One line per catalog package: name, kind, description.
#[must_use]
pub fn list_packages() -> Vec<String> {
    Package::all()
        .iter()
        .map(|p| format!("{:<22} {:<13} {}", p.name(), p.kind(), p.description()))
        .collect()
}

/// Settings for [`build`].
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub package: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub skip_invalid: bool,
    pub workers: Option<usize>,
}

/// Builds a package from a local directory and writes it into the output
/// directory. Returns the path of the written file.
pub fn build(request: &BuildRequest) -> Result<PathBuf> {
    let package = find_package(&request.package)?;
    let collected = collect_documents(&request.input, package)?;
    let paths = collected.paths;

    let options = BuildOptions {
        on_invalid: if request.skip_invalid {
            InvalidDocumentPolicy::Skip
        } else {
            InvalidDocumentPolicy::Abort
        },
        workers: request.workers,
    };

    let built = build_package(package, collected.documents, &options).map_err(|err| {
        let path = failing_index(&err).and_then(|index| paths.get(index));
        let err = anyhow::Error::from(err);
        match path {
            Some(path) => err.context(format!("while processing {}", path.display())),
            None => err,
        }
    })?;

    for skipped in &built.output.skipped {
        if let Some(path) = paths.get(skipped.index) {
            warn!(path = %path.display(), error = %skipped.error, "Skipped invalid document");
        }
    }

    fs::create_dir_all(&request.output)
        .with_context(|| format!("failed to create {}", request.output.display()))?;
    let path = built
        .write_to_dir(&request.output)
        .with_context(|| format!("failed to write {}", package.file_name()))?;
    Ok(path)
}

fn failing_index(err: &PackageError) -> Option<usize> {
    match err {
        PackageError::Build(BuildError::Format { index, .. })
        | PackageError::UndeclaredCategory { index, .. } => Some(*index),
        _ => None,
    }
}

/// Summary of a built package file.
#[derive(Debug)]
pub struct InspectReport {
    pub path: PathBuf,
    pub archive: PackageArchive,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.archive.manifest;
        let categories: Vec<_> = m.categories.iter().map(ToString::to_string).collect();
        writeln!(f, "file:            {}", self.path.display())?;
        writeln!(f, "package:         {} ({})", m.name, m.kind)?;
        writeln!(f, "description:     {}", m.description)?;
        writeln!(f, "source versions: {}", m.source_versions.join(", "))?;
        writeln!(f, "categories:      {}", categories.join(", "))?;
        writeln!(f, "locales:         {}", m.locales.len())?;
        writeln!(f, "generator:       {}", m.generator)?;
        write!(f, "content hash:    {}", self.archive.content_hash())
    }
}

/// Opens a package file for inspection.
pub fn inspect(path: &Path) -> Result<InspectReport> {
    let archive = PackageArchive::load_from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(InspectReport {
        path: path.to_path_buf(),
        archive,
    })
}

/// Pretty-printed merged data for one locale of an inspected package.
pub fn locale_json(report: &InspectReport, code: &str) -> Result<String> {
    let locale = LocaleId::parse(code)?;
    let data = report
        .archive
        .locale(&locale)
        .with_context(|| format!("{} has no data for locale {locale}", report.archive.manifest.name))?;
    Ok(serde_json::to_string_pretty(data)?)
}
