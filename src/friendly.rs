use serde::Serialize;

use crate::config::Config;
use crate::exif::RawTagMap;
use crate::gps::{GpsFix, extract_gps};

/// Normalized, human-labeled metadata for one file.
///
/// Every field resolves independently. Exposure values are passed through
/// as the tag decoder rendered them; units differ per vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FriendlyMetadata {
    pub capture_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(rename = "ISO", skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
    #[serde(rename = "ExposureTime", skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<String>,
    #[serde(rename = "Aperture", skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(rename = "FocalLength", skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
}

impl FriendlyMetadata {
    pub fn has_exposure(&self) -> bool {
        self.iso.is_some()
            || self.exposure_time.is_some()
            || self.aperture.is_some()
            || self.focal_length.is_some()
    }
}

/// Return the value of the first alias present in `tags`.
///
/// Blank values count as missing. The returned value is trimmed.
pub fn select<'a>(tags: &'a RawTagMap, aliases: &[String]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| tags.get(alias))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Manufacturer and model joined by a space, skipping whichever is missing.
pub fn select_device(tags: &RawTagMap, config: &Config) -> Option<String> {
    let parts: Vec<&str> = [
        select(tags, &config.aliases.make),
        select(tags, &config.aliases.model),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Resolve every friendly field from the raw tag map.
pub fn select_friendly(tags: &RawTagMap, config: &Config) -> FriendlyMetadata {
    let aliases = &config.aliases;
    let pick = |list: &[String]| select(tags, list).map(str::to_string);

    FriendlyMetadata {
        capture_datetime: pick(&aliases.capture_datetime),
        device: select_device(tags, config),
        iso: pick(&aliases.iso),
        exposure_time: pick(&aliases.exposure_time),
        aperture: pick(&aliases.aperture),
        focal_length: pick(&aliases.focal_length),
        gps: extract_gps(tags, config),
    }
}
