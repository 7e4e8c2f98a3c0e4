use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{MetadataError, Section};
use crate::exif::{self, RawTagMap};
use crate::fallback::apply_fallbacks;
use crate::filesystem::{FilesystemInfo, filesystem_info};
use crate::friendly::{FriendlyMetadata, select_friendly};
use crate::image_info::{ImageInfo, read_image_info};

/// Everything gathered for one input file.
///
/// Each sub-record is resolved independently: an image decode failure still
/// leaves filesystem info and raw tags in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FileMetadataRecord {
    pub filesystem: Section<FilesystemInfo>,
    pub image: Section<ImageInfo>,
    /// `None` when the tag decoder could not read the file.
    pub exif_tags: Option<RawTagMap>,
    pub exif_friendly: FriendlyMetadata,
}

/// One batch slot: a full record, or the marker for a path that does not exist.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Record(Box<FileMetadataRecord>),
    Missing { error: String },
}

impl BatchEntry {
    pub fn record(&self) -> Option<&FileMetadataRecord> {
        match self {
            BatchEntry::Record(record) => Some(record),
            BatchEntry::Missing { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BatchEntry::Record(_) => None,
            BatchEntry::Missing { error } => Some(error),
        }
    }
}

/// Results keyed by input path, in input order.
///
/// Serializes as a single JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    entries: Vec<(String, BatchEntry)>,
}

impl Batch {
    /// Insert an entry. A repeated key keeps its first position and takes the
    /// new entry.
    pub fn insert(&mut self, key: String, entry: BatchEntry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&BatchEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BatchEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.iter().filter(|(_, e)| e.error().is_some()).count()
    }
}

impl Serialize for Batch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Gather all metadata for a single existing file.
///
/// Stages run in a fixed order: filesystem, image, raw tags, friendly
/// fields, then the capture-time and device fallbacks. No stage failure
/// stops the ones after it.
pub fn summarize_one(path: &Path, config: &Config) -> FileMetadataRecord {
    let filesystem: Section<FilesystemInfo> = filesystem_info(path).into();
    if let Some(err) = filesystem.error() {
        log::debug!("Filesystem info unavailable for {}: {err}", path.display());
    }

    let image: Section<ImageInfo> = read_image_info(path).into();
    if let Some(err) = image.error() {
        log::debug!("{}: {err}", path.display());
    }

    let exif_tags = match exif::read_tags(path) {
        Ok(tags) => Some(tags),
        Err(e) => {
            log::debug!("No EXIF data in {}: {e}", path.display());
            None
        }
    };

    let mut exif_friendly = exif_tags
        .as_ref()
        .map(|tags| select_friendly(tags, config))
        .unwrap_or_default();

    apply_fallbacks(&mut exif_friendly, &filesystem, &image, config);

    FileMetadataRecord {
        filesystem,
        image,
        exif_tags,
        exif_friendly,
    }
}

/// Summarize every path in order.
///
/// A path that does not exist gets an error entry and the batch moves on.
pub fn process_batch(paths: &[PathBuf], config: &Config) -> Batch {
    let mut batch = Batch::default();
    let total = paths.len();

    for (i, path) in paths.iter().enumerate() {
        let key = path.display().to_string();

        if !path.exists() {
            let err = MetadataError::InputNotFound { path: path.clone() };
            log::warn!("File not found: {key}");
            batch.insert(
                key,
                BatchEntry::Missing {
                    error: err.to_string(),
                },
            );
            continue;
        }

        log::info!("[{}/{}] Processing: {key}", i + 1, total);
        let record = summarize_one(path, config);
        batch.insert(key, BatchEntry::Record(Box::new(record)));
    }

    batch
}
