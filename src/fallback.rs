//! Secondary sources for friendly fields the tag block did not provide.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::Section;
use crate::filesystem::FilesystemInfo;
use crate::friendly::FriendlyMetadata;
use crate::image_info::ImageInfo;

/// The file's modification time, when the filesystem was readable.
pub fn fallback_capture_time(filesystem: &Section<FilesystemInfo>) -> Option<String> {
    filesystem.ok().map(|fs| fs.mtime.clone())
}

/// First textual metadata value found under one of `keys`, in key order.
pub fn fallback_device(text: &BTreeMap<String, String>, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| text.get(key))
        .find(|value| !value.trim().is_empty())
        .cloned()
}

/// Fill capture time and device when the tag block left them empty.
pub fn apply_fallbacks(
    friendly: &mut FriendlyMetadata,
    filesystem: &Section<FilesystemInfo>,
    image: &Section<ImageInfo>,
    config: &Config,
) {
    if friendly.capture_datetime.is_none() {
        friendly.capture_datetime = fallback_capture_time(filesystem);
        if friendly.capture_datetime.is_some() {
            log::debug!("Capture time taken from file modification time");
        }
    }

    if friendly.device.is_none() {
        if let Some(text) = image.ok().and_then(|info| info.png_info.as_ref()) {
            friendly.device = fallback_device(text, &config.device_text_keys);
        }
    }
}
