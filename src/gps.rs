//! GPS recovery from the stringified raw tag map.
//!
//! The tag decoder only hands over strings like `"[34, 5, 1234/100]"`, so the
//! degree/minute/second triple is re-scanned from text here. This is the only
//! module that tolerates that lossy re-parsing.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::Config;
use crate::error::MetadataError;
use crate::exif::{RawTagMap, TagValue, coerce};
use crate::friendly::select;

/// Fraction first, then decimal, then integer; leftmost match wins.
static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+/\d+|-?\d+\.\d+|-?\d+").expect("valid component regex"));

/// Decimal places kept on coordinates.
const PRECISION: f64 = 1e7;

/// Hemisphere indicator. Only South and West flip the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HemisphereRef {
    North,
    South,
    East,
    West,
}

impl HemisphereRef {
    /// Parse a single-letter reference, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// A resolved position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsFix {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "google_maps")]
    pub maps_link: String,
}

/// Convert a `[deg, min, sec]` triple to signed decimal degrees, rounded to
/// seven decimals.
///
/// Exactly three present, non-negative components are required.
pub fn to_decimal(components: &[Option<f64>], reference: Option<HemisphereRef>) -> Option<f64> {
    let &[Some(deg), Some(min), Some(sec)] = components else {
        return None;
    };
    if deg < 0.0 || min < 0.0 || sec < 0.0 {
        return None;
    }

    let mut decimal = deg + min / 60.0 + sec / 3600.0;
    if reference.is_some_and(|r| r.is_negative()) {
        decimal = -decimal;
    }
    let rounded = round_coordinate(decimal);
    // Keep 0 unsigned regardless of hemisphere.
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

pub fn round_coordinate(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Return the first three numeric tokens of a stringified DMS value.
pub fn scan_components(raw: &str) -> Vec<&str> {
    COMPONENT_RE
        .find_iter(raw)
        .take(3)
        .map(|m| m.as_str())
        .collect()
}

fn resolve_axis(
    raw: &str,
    reference: Option<&str>,
    field: &'static str,
) -> Result<f64, MetadataError> {
    let tokens = scan_components(raw);
    if tokens.len() < 3 {
        return Err(MetadataError::FieldCoercion {
            field,
            reason: format!("expected 3 numeric components, found {}", tokens.len()),
        });
    }

    let triple = TagValue::Sequence(tokens.iter().map(|t| TagValue::from_token(t)).collect());
    let numeric = coerce(&triple).ok_or_else(|| MetadataError::FieldCoercion {
        field,
        reason: format!("could not coerce '{raw}'"),
    })?;

    to_decimal(&numeric.components(), reference.and_then(HemisphereRef::parse)).ok_or_else(|| {
        MetadataError::FieldCoercion {
            field,
            reason: format!("'{raw}' is not a valid DMS triple"),
        }
    })
}

/// Resolve latitude and longitude, reporting why extraction failed.
pub fn try_extract_gps(tags: &RawTagMap, config: &Config) -> Result<GpsFix, MetadataError> {
    let aliases = &config.aliases;
    let (Some(raw_lat), Some(raw_lon)) = (
        select(tags, &aliases.gps_latitude),
        select(tags, &aliases.gps_longitude),
    ) else {
        return Err(MetadataError::FieldCoercion {
            field: "gps",
            reason: "latitude or longitude tag missing".to_string(),
        });
    };

    let lat = resolve_axis(raw_lat, select(tags, &aliases.gps_latitude_ref), "gps.lat")?;
    let lon = resolve_axis(raw_lon, select(tags, &aliases.gps_longitude_ref), "gps.lon")?;

    Ok(GpsFix {
        lat,
        lon,
        maps_link: config.maps_link(lat, lon),
    })
}

/// Resolve GPS or degrade to `None`; never fails the record.
pub fn extract_gps(tags: &RawTagMap, config: &Config) -> Option<GpsFix> {
    match try_extract_gps(tags, config) {
        Ok(fix) => Some(fix),
        Err(e) => {
            log::debug!("No GPS data: {e}");
            None
        }
    }
}
