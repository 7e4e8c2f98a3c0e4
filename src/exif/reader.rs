use nom_exif::{EntryValue, ExifIter, ExifTag, MediaParser, MediaSource};
use std::collections::BTreeMap;
use std::path::Path;

use super::value::TagValue;
use crate::error::MetadataError;

/// Raw tags keyed as `"<Group> <Name>"` (e.g. `"EXIF DateTimeOriginal"`),
/// each value already stringified.
pub type RawTagMap = BTreeMap<String, String>;

const TAG_MAKER_NOTE: u16 = 0x927C;

/// Tag namespace, following the IFD a tag was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroup {
    Image,
    Thumbnail,
    Exif,
    Gps,
}

impl TagGroup {
    pub fn label(&self) -> &'static str {
        match self {
            TagGroup::Image => "Image",
            TagGroup::Thumbnail => "Thumbnail",
            TagGroup::Exif => "EXIF",
            TagGroup::Gps => "GPS",
        }
    }

    /// Sub-IFD entries are reported under their parent IFD index, so the Exif
    /// and GPS groups are recovered from the tag code.
    pub fn classify(ifd_index: usize, code: u16) -> Self {
        if ifd_index == 1 {
            return TagGroup::Thumbnail;
        }
        match code {
            0x0000..=0x001F => TagGroup::Gps,
            0x829A | 0x829D | 0x8822 | 0x8824 | 0x8827..=0x8832 | 0x9000..=0x9FFF
            | 0xA000..=0xA4FF => TagGroup::Exif,
            _ => TagGroup::Image,
        }
    }
}

/// Read every EXIF tag of a file into a [`RawTagMap`].
///
/// Files without an EXIF block, or in a container nom-exif does not handle,
/// yield [`MetadataError::TagDecodeUnavailable`].
pub fn read_tags(path: &Path) -> Result<RawTagMap, MetadataError> {
    let mut parser = MediaParser::new();
    let ms = MediaSource::file_path(path)
        .map_err(|e| MetadataError::TagDecodeUnavailable(e.to_string()))?;

    if !ms.has_exif() {
        return Err(MetadataError::TagDecodeUnavailable(
            "no EXIF container".to_string(),
        ));
    }

    let iter: ExifIter = parser
        .parse(ms)
        .map_err(|e| MetadataError::TagDecodeUnavailable(e.to_string()))?;

    let mut tags = RawTagMap::new();
    for entry in iter {
        let code = entry.tag_code();
        if code == TAG_MAKER_NOTE {
            continue;
        }
        let Some(value) = entry.get_value() else {
            continue;
        };
        let key = tag_key(entry.ifd_index(), code, entry.tag());
        tags.insert(key, to_tag_value(value).to_string());
    }

    log::debug!("Read {} EXIF tag(s) from {}", tags.len(), path.display());
    Ok(tags)
}

/// Build the raw map key for a tag.
pub fn tag_key(ifd_index: usize, code: u16, tag: Option<ExifTag>) -> String {
    let group = TagGroup::classify(ifd_index, code);
    let name = match tag_name(code) {
        Some(name) => name.to_string(),
        None => match tag {
            Some(tag) => format!("{tag:?}"),
            None => format!("Tag 0x{code:04X}"),
        },
    };
    format!("{} {name}", group.label())
}

const EXIF_DATE_LAYOUT: &str = "%Y:%m:%d %H:%M:%S";

fn to_tag_value(value: &EntryValue) -> TagValue {
    match value {
        EntryValue::Text(s) => TagValue::Text(s.trim_end_matches('\0').trim().to_string()),
        EntryValue::URational(r) => TagValue::Fraction(r.0 as i64, r.1 as i64),
        EntryValue::IRational(r) => TagValue::Fraction(r.0 as i64, r.1 as i64),
        EntryValue::U8(v) => TagValue::Integer(*v as i64),
        EntryValue::U16(v) => TagValue::Integer(*v as i64),
        EntryValue::U32(v) => TagValue::Integer(*v as i64),
        EntryValue::U64(v) => match i64::try_from(*v) {
            Ok(v) => TagValue::Integer(v),
            Err(_) => TagValue::Text(v.to_string()),
        },
        EntryValue::I8(v) => TagValue::Integer(*v as i64),
        EntryValue::I16(v) => TagValue::Integer(*v as i64),
        EntryValue::I32(v) => TagValue::Integer(*v as i64),
        EntryValue::I64(v) => TagValue::Integer(*v),
        EntryValue::F32(v) => TagValue::Decimal(*v as f64),
        EntryValue::F64(v) => TagValue::Decimal(*v),
        // nom-exif already parsed the date; keep the on-disk EXIF layout.
        EntryValue::Time(t) => TagValue::Text(t.format(EXIF_DATE_LAYOUT).to_string()),
        EntryValue::NaiveDateTime(t) => TagValue::Text(t.format(EXIF_DATE_LAYOUT).to_string()),
        EntryValue::Undefined(bytes) => undefined_value(bytes),
        EntryValue::URationalArray(items) => TagValue::Sequence(
            items
                .iter()
                .map(|r| TagValue::Fraction(r.0 as i64, r.1 as i64))
                .collect(),
        ),
        EntryValue::IRationalArray(items) => TagValue::Sequence(
            items
                .iter()
                .map(|r| TagValue::Fraction(r.0 as i64, r.1 as i64))
                .collect(),
        ),
        EntryValue::U8Array(items) => integers(items),
        EntryValue::U16Array(items) => integers(items),
        EntryValue::U32Array(items) => integers(items),
        other => TagValue::Text(other.to_string()),
    }
}

fn integers<T: Copy + Into<i64>>(items: &[T]) -> TagValue {
    TagValue::Sequence(items.iter().map(|v| TagValue::Integer((*v).into())).collect())
}

/// Printable ASCII payloads (e.g. ExifVersion `"0232"`) become text, anything
/// else a byte sequence.
fn undefined_value(bytes: &[u8]) -> TagValue {
    let trimmed = match bytes.iter().rposition(|&b| b != 0) {
        Some(last) => &bytes[..=last],
        None => &[],
    };
    if !trimmed.is_empty() && trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        TagValue::Text(String::from_utf8_lossy(trimmed).trim().to_string())
    } else {
        integers(bytes)
    }
}

fn tag_name(code: u16) -> Option<&'static str> {
    let name = match code {
        // GPS
        0x0000 => "GPSVersionID",
        0x0001 => "GPSLatitudeRef",
        0x0002 => "GPSLatitude",
        0x0003 => "GPSLongitudeRef",
        0x0004 => "GPSLongitude",
        0x0005 => "GPSAltitudeRef",
        0x0006 => "GPSAltitude",
        0x0007 => "GPSTimeStamp",
        0x000C => "GPSSpeedRef",
        0x000D => "GPSSpeed",
        0x0010 => "GPSImgDirectionRef",
        0x0011 => "GPSImgDirection",
        0x0012 => "GPSMapDatum",
        0x001D => "GPSDate",
        // IFD0 / IFD1
        0x0100 => "ImageWidth",
        0x0101 => "ImageLength",
        0x0103 => "Compression",
        0x010E => "ImageDescription",
        0x010F => "Make",
        0x0110 => "Model",
        0x0112 => "Orientation",
        0x011A => "XResolution",
        0x011B => "YResolution",
        0x0128 => "ResolutionUnit",
        0x0131 => "Software",
        0x0132 => "DateTime",
        0x013B => "Artist",
        0x0201 => "JPEGInterchangeFormat",
        0x0202 => "JPEGInterchangeFormatLength",
        0x0213 => "YCbCrPositioning",
        0x8298 => "Copyright",
        0x8769 => "ExifOffset",
        0x8825 => "GPSInfo",
        // Exif sub-IFD
        0x829A => "ExposureTime",
        0x829D => "FNumber",
        0x8822 => "ExposureProgram",
        0x8827 => "ISOSpeedRatings",
        0x8830 => "SensitivityType",
        0x8832 => "RecommendedExposureIndex",
        0x9000 => "ExifVersion",
        0x9003 => "DateTimeOriginal",
        0x9004 => "DateTimeDigitized",
        0x9010 => "OffsetTime",
        0x9011 => "OffsetTimeOriginal",
        0x9012 => "OffsetTimeDigitized",
        0x9101 => "ComponentsConfiguration",
        0x9201 => "ShutterSpeedValue",
        0x9202 => "ApertureValue",
        0x9203 => "BrightnessValue",
        0x9204 => "ExposureBiasValue",
        0x9205 => "MaxApertureValue",
        0x9207 => "MeteringMode",
        0x9208 => "LightSource",
        0x9209 => "Flash",
        0x920A => "FocalLength",
        0x9286 => "UserComment",
        0x9290 => "SubSecTime",
        0x9291 => "SubSecTimeOriginal",
        0x9292 => "SubSecTimeDigitized",
        0xA000 => "FlashPixVersion",
        0xA001 => "ColorSpace",
        0xA002 => "ExifImageWidth",
        0xA003 => "ExifImageLength",
        0xA005 => "InteroperabilityOffset",
        0xA217 => "SensingMethod",
        0xA402 => "ExposureMode",
        0xA403 => "WhiteBalance",
        0xA404 => "DigitalZoomRatio",
        0xA405 => "FocalLengthIn35mmFilm",
        0xA406 => "SceneCaptureType",
        0xA420 => "ImageUniqueID",
        0xA432 => "LensSpecification",
        0xA433 => "LensMake",
        0xA434 => "LensModel",
        _ => return None,
    };
    Some(name)
}
