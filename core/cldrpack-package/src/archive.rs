//! Package packing, unpacking, and content hashing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use cldrpack_merge::{LocaleRecordStore, MergedLocaleRecord};
use cldrpack_types::LocaleId;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::{PackageError, PackageKind, PackageManifest};

const MANIFEST_ENTRY: &str = "manifest.toml";
const LOCALES_PREFIX: &str = "locales/";
const JSON_SUFFIX: &str = ".json";

/// A single file entry inside a package archive.
#[derive(Debug, Clone)]
pub struct PackageEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// An opened package with parsed contents.
#[derive(Debug)]
pub struct PackageArchive {
    pub manifest: PackageManifest,
    /// Merged data per locale.
    pub locales: BTreeMap<LocaleId, Map<String, Value>>,
    /// Raw entries used for deterministic content hashing.
    entries: Vec<PackageEntry>,
}

impl PackageArchive {
    /// Opens and parses a package from a reader.
    ///
    /// The manifest must validate and list exactly the locales that have an
    /// entry in the archive.
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut manifest_bytes = None;
        let mut locales = BTreeMap::new();
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            if name == MANIFEST_ENTRY {
                manifest_bytes = Some(data.clone());
            } else if let Some(code) = name
                .strip_prefix(LOCALES_PREFIX)
                .and_then(|rest| rest.strip_suffix(JSON_SUFFIX))
            {
                let locale = LocaleId::parse(code)?;
                let record: Map<String, Value> = serde_json::from_slice(&data)?;
                locales.insert(locale, record);
            } else {
                debug!(entry = %name, "Ignoring unknown archive entry");
            }

            entries.push(PackageEntry { name, data });
        }

        let manifest_bytes =
            manifest_bytes.ok_or_else(|| PackageError::MissingEntry(MANIFEST_ENTRY.into()))?;
        let manifest: PackageManifest = toml::from_str(
            std::str::from_utf8(&manifest_bytes)
                .map_err(|e| PackageError::ManifestInvalid(e.to_string()))?,
        )?;
        manifest.validate()?;

        let listed = manifest.locale_ids()?;
        if let Some(missing) = listed.iter().find(|l| !locales.contains_key(*l)) {
            return Err(PackageError::MissingEntry(locale_entry_name(missing)));
        }
        if listed.len() != locales.len() {
            return Err(PackageError::ManifestInvalid(
                "archive contains locales the manifest does not list".into(),
            ));
        }

        Ok(Self {
            manifest,
            locales,
            entries,
        })
    }

    /// Opens a package file, checking that its extension matches the
    /// manifest's package kind.
    pub fn load_from_file(path: &Path) -> Result<Self, PackageError> {
        let extension = PackageKind::from_path(path)
            .ok_or_else(|| PackageError::UnsupportedExtension(path.display().to_string()))?;

        let archive = Self::open(BufReader::new(File::open(path)?))?;
        if archive.manifest.kind != extension {
            return Err(PackageError::KindMismatch {
                extension,
                declared: archive.manifest.kind,
            });
        }

        debug!(path = %path.display(), locales = archive.locales.len(), "Loaded package");
        Ok(archive)
    }

    /// Merged data for `locale`, if the package has a record for it.
    #[must_use]
    pub fn locale(&self, locale: &LocaleId) -> Option<&Map<String, Value>> {
        self.locales.get(locale)
    }

    /// Computes a deterministic SHA-256 content hash over all entries.
    /// Entries are sorted by name to ensure determinism.
    #[must_use]
    pub fn content_hash(&self) -> String {
        content_hash(&self.entries)
    }
}

/// Fluent builder for creating package archives.
pub struct PackageWriter {
    manifest: PackageManifest,
    records: BTreeMap<LocaleId, Vec<u8>>,
}

impl PackageWriter {
    #[must_use]
    pub fn new(manifest: PackageManifest) -> Self {
        Self {
            manifest,
            records: BTreeMap::new(),
        }
    }

    /// Adds one merged record.
    pub fn record(mut self, record: &MergedLocaleRecord) -> Result<Self, PackageError> {
        let data = serde_json::to_vec(record.data())?;
        self.records.insert(record.locale().clone(), data);
        Ok(self)
    }

    /// Adds every record of `store`.
    pub fn records(self, store: &LocaleRecordStore) -> Result<Self, PackageError> {
        store.iter().try_fold(self, |writer, record| writer.record(record))
    }

    /// Builds the zip archive and returns the raw bytes.
    ///
    /// The manifest's locale list is replaced by the locales actually added.
    pub fn build(mut self) -> Result<Vec<u8>, PackageError> {
        self.manifest.locales = self.records.keys().map(LocaleId::to_code).collect();
        self.manifest.validate()?;

        let buf = std::io::Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(buf);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        // Manifest
        let manifest_toml = toml::to_string_pretty(&self.manifest)?;
        zip.start_file(MANIFEST_ENTRY, options)?;
        zip.write_all(manifest_toml.as_bytes())?;

        // Locales
        for (locale, data) in &self.records {
            zip.start_file(locale_entry_name(locale), options)?;
            zip.write_all(data)?;
        }

        let finished = zip.finish()?;
        Ok(finished.into_inner())
    }

    /// Builds the archive and writes it to `path`.
    pub fn write_to(self, path: &Path) -> Result<(), PackageError> {
        let name = self.manifest.name.clone();
        let bytes = self.build()?;
        std::fs::write(path, &bytes)?;
        info!(package = %name, path = %path.display(), bytes = bytes.len(), "Package written");
        Ok(())
    }
}

fn locale_entry_name(locale: &LocaleId) -> String {
    format!("{LOCALES_PREFIX}{locale}{JSON_SUFFIX}")
}

fn content_hash(entries: &[PackageEntry]) -> String {
    let mut hasher = Sha256::new();
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in sorted {
        hasher.update(entry.name.as_bytes());
        hasher.update((entry.data.len() as u64).to_le_bytes());
        hasher.update(&entry.data);
    }

    hex::encode(hasher.finalize())
}
