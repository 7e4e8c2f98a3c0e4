use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;
use std::time::SystemTime;

use crate::error::MetadataError;

/// Size and timestamps of an input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesystemInfo {
    pub path: String,
    pub size_bytes: u64,
    pub size_human: String,
    pub mtime: String,
    pub atime: Option<String>,
    pub ctime: Option<String>,
}

/// Stat a file. Timestamps are local time with second precision.
pub fn filesystem_info(path: &Path) -> Result<FilesystemInfo, MetadataError> {
    let meta = std::fs::metadata(path)?;
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    Ok(FilesystemInfo {
        path: absolute.display().to_string(),
        size_bytes: meta.len(),
        size_human: human_size(meta.len()),
        mtime: format_timestamp(meta.modified()?),
        atime: meta.accessed().ok().map(format_timestamp),
        ctime: meta.created().ok().map(format_timestamp),
    })
}

pub fn format_timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    for unit in UNITS {
        value /= 1024.0;
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
    }
    format!("{:.2} PB", value / 1024.0)
}
