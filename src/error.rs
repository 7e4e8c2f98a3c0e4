use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while building a metadata record.
///
/// Only [`MetadataError::OutputWrite`] is fatal for a batch. The other
/// variants are captured per file (see [`Section`]) or folded into an absent
/// field.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("file not found")]
    InputNotFound { path: PathBuf },

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Tag decoding unavailable: {0}")]
    TagDecodeUnavailable(String),

    #[error("Could not coerce field '{field}': {reason}")]
    FieldCoercion { field: &'static str, reason: String },

    #[error("Failed to write output to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),
}

/// A sub-record that either resolved or carries a field-scoped error marker.
///
/// Serializes untagged: the record itself, or `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> Section<T> {
    pub fn ok(&self) -> Option<&T> {
        match self {
            Section::Ok(value) => Some(value),
            Section::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Ok(_) => None,
            Section::Failed { error } => Some(error),
        }
    }
}

impl<T> From<Result<T, MetadataError>> for Section<T> {
    fn from(result: Result<T, MetadataError>) -> Self {
        match result {
            Ok(value) => Section::Ok(value),
            Err(e) => Section::Failed {
                error: e.to_string(),
            },
        }
    }
}
