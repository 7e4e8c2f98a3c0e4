//! Text and JSON renderings of metadata records.

use std::path::Path;

use crate::error::MetadataError;
use crate::friendly::FriendlyMetadata;
use crate::pipeline::{Batch, FileMetadataRecord};

const RULE_WIDTH: usize = 72;
const NOT_AVAILABLE: &str = "N/A";

/// Render one record as labeled sections separated by rule lines.
///
/// `path` is the path as given on the command line; it is shown when the
/// filesystem section could not be read.
pub fn render_text(record: &FileMetadataRecord, path: &str) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    line(&mut out, &heavy);
    render_file_section(&mut out, record, path);
    line(&mut out, &light);
    render_image_section(&mut out, record);
    line(&mut out, &light);
    render_capture_section(&mut out, &record.exif_friendly);
    line(&mut out, &light);
    render_gps_section(&mut out, &record.exif_friendly);
    line(&mut out, &light);
    render_exposure_section(&mut out, &record.exif_friendly);
    line(&mut out, &heavy);

    out
}

fn render_file_section(out: &mut String, record: &FileMetadataRecord, path: &str) {
    match record.filesystem.ok() {
        Some(fs) => {
            line(out, &format!("File: {}", fs.path));
            line(out, &format!("File size : {} bytes ({})", fs.size_bytes, fs.size_human));
            line(out, &format!("Modified  : {}", fs.mtime));
        }
        None => {
            line(out, &format!("File: {path}"));
            line(out, &format!("File size : {NOT_AVAILABLE}"));
            line(out, &format!("Modified  : {NOT_AVAILABLE}"));
        }
    }
}

fn render_image_section(out: &mut String, record: &FileMetadataRecord) {
    let Some(img) = record.image.ok() else {
        let reason = record.image.error().unwrap_or(NOT_AVAILABLE);
        line(out, &format!("Image info: {reason}"));
        return;
    };

    line(out, "Image info:");
    row(out, "Format", 6, img.format.as_deref().unwrap_or(NOT_AVAILABLE));
    row(out, "Mode", 6, &img.mode);
    row(out, "Pixels", 6, &format!("{} x {}", img.width, img.height));
    row(out, "Frames", 6, &img.frames.to_string());
    if let Some(dpi) = img.dpi {
        row(out, "DPI", 6, &format!("{} x {}", dpi.x, dpi.y));
    }
}

fn render_capture_section(out: &mut String, friendly: &FriendlyMetadata) {
    line(out, "Capture & device:");
    row(
        out,
        "Capture Date/Time",
        17,
        friendly.capture_datetime.as_deref().unwrap_or(NOT_AVAILABLE),
    );
    row(
        out,
        "Device (Make/Model)",
        17,
        friendly.device.as_deref().unwrap_or(NOT_AVAILABLE),
    );
}

fn render_gps_section(out: &mut String, friendly: &FriendlyMetadata) {
    match &friendly.gps {
        Some(gps) => {
            line(out, "Location (GPS):");
            row(out, "Latitude", 9, &gps.lat.to_string());
            row(out, "Longitude", 9, &gps.lon.to_string());
            row(out, "Google Maps", 9, &gps.maps_link);
        }
        None => line(out, "Location (GPS): Not found"),
    }
}

fn render_exposure_section(out: &mut String, friendly: &FriendlyMetadata) {
    if !friendly.has_exposure() {
        line(out, "Exposure / lens: Not available");
        return;
    }

    line(out, "Exposure / lens:");
    let fields = [
        ("ISO", &friendly.iso),
        ("Exposure", &friendly.exposure_time),
        ("Aperture", &friendly.aperture),
        ("FocalLength", &friendly.focal_length),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            row(out, label, 11, value);
        }
    }
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Labels shorter than `width` are padded so the colons line up.
fn row(out: &mut String, label: &str, width: usize, value: &str) {
    line(out, &format!("  {label:<width$} : {value}"));
}

/// Pretty-printed JSON object keyed by input path.
pub fn render_json(batch: &Batch) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(batch)
}

/// Write the JSON rendering of `batch` to `path`.
pub fn write_json(batch: &Batch, path: &Path) -> Result<(), MetadataError> {
    let json = render_json(batch).map_err(|e| MetadataError::OutputWrite {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(path, json + "\n").map_err(|source| MetadataError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
