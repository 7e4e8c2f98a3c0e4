use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, ColorType, Frames, ImageDecoder, ImageFormat, ImageReader, ImageResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::MetadataError;
use crate::exif::{self, RawTagMap, TagValue, coerce};

const METERS_PER_INCH: f64 = 0.0254;

/// Horizontal and vertical resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

/// Basic properties reported by the image decoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub format: Option<String>,
    pub mode: String,
    pub width: u32,
    pub height: u32,
    pub frames: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<Dpi>,
    /// PNG textual chunks (tEXt, zTXt, iTXt), keyword → text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png_info: Option<BTreeMap<String, String>>,
}

/// Decode the header of an image file.
///
/// Only the header is decoded, except for animated formats where frames are
/// walked to count them.
pub fn read_image_info(path: &Path) -> Result<ImageInfo, MetadataError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(decode_error)?;
    let format = reader.format();
    let decoder = reader.into_decoder().map_err(decode_error)?;
    let (width, height) = decoder.dimensions();
    let mode = mode_name(decoder.color_type());
    drop(decoder);

    let mut info = ImageInfo {
        format: format.map(|f| format!("{f:?}").to_uppercase()),
        mode,
        width,
        height,
        frames: 1,
        dpi: None,
        png_info: None,
    };

    match format {
        Some(ImageFormat::Png) => match read_png_chunks(path) {
            Ok(chunks) => {
                info.frames = chunks.frames;
                info.dpi = chunks.dpi;
                if !chunks.text.is_empty() {
                    info.png_info = Some(chunks.text);
                }
            }
            Err(e) => log::debug!("Could not read PNG chunks of {}: {e}", path.display()),
        },
        Some(ImageFormat::Jpeg) => info.dpi = read_jfif_dpi(path).or_else(|| read_exif_dpi(path)),
        Some(f @ (ImageFormat::Gif | ImageFormat::WebP)) => match count_frames(path, f) {
            Ok(frames) => info.frames = frames.max(1),
            Err(e) => log::debug!("Could not count frames of {}: {e}", path.display()),
        },
        _ => {}
    }

    Ok(info)
}

fn decode_error(e: impl std::fmt::Display) -> MetadataError {
    MetadataError::ImageDecode(e.to_string())
}

/// Pillow-style mode names; anything unusual keeps the decoder's name.
pub fn mode_name(color: ColorType) -> String {
    let name = match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "F;RGB",
        ColorType::Rgba32F => "F;RGBA",
        other => return format!("{other:?}"),
    };
    name.to_string()
}

fn count_frames(path: &Path, format: ImageFormat) -> ImageResult<usize> {
    let reader = BufReader::new(File::open(path)?);
    match format {
        ImageFormat::Gif => Ok(decodable(GifDecoder::new(reader)?.into_frames())),
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(reader)?;
            if decoder.has_animation() {
                Ok(decodable(decoder.into_frames()))
            } else {
                Ok(1)
            }
        }
        _ => Ok(1),
    }
}

fn decodable(frames: Frames<'_>) -> usize {
    frames.take_while(Result::is_ok).count()
}

struct PngChunks {
    frames: usize,
    dpi: Option<Dpi>,
    text: BTreeMap<String, String>,
}

fn read_png_chunks(path: &Path) -> Result<PngChunks, png::DecodingError> {
    let decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    let reader = decoder.read_info()?;
    let info = reader.info();

    let frames = info
        .animation_control
        .as_ref()
        .map(|ac| ac.num_frames as usize)
        .unwrap_or(1);

    let dpi = info
        .pixel_dims
        .as_ref()
        .filter(|dims| dims.unit == png::Unit::Meter)
        .map(|dims| Dpi {
            x: round2(dims.xppu as f64 * METERS_PER_INCH),
            y: round2(dims.yppu as f64 * METERS_PER_INCH),
        });

    let mut text = BTreeMap::new();
    for chunk in &info.uncompressed_latin1_text {
        text.insert(chunk.keyword.clone(), chunk.text.clone());
    }
    for chunk in &info.compressed_latin1_text {
        if let Ok(value) = chunk.get_text() {
            text.insert(chunk.keyword.clone(), value);
        }
    }
    for chunk in &info.utf8_text {
        if let Ok(value) = chunk.get_text() {
            text.insert(chunk.keyword.clone(), value);
        }
    }

    Ok(PngChunks { frames, dpi, text })
}

/// Density from a JFIF APP0 segment, when its unit is inches or centimetres.
fn read_jfif_dpi(path: &Path) -> Option<Dpi> {
    let mut header = [0u8; 18];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    parse_jfif_density(&header)
}

fn parse_jfif_density(header: &[u8]) -> Option<Dpi> {
    if header.len() < 18 || header[..4] != [0xFF, 0xD8, 0xFF, 0xE0] || &header[6..11] != b"JFIF\0" {
        return None;
    }
    let x = u16::from_be_bytes([header[14], header[15]]) as f64;
    let y = u16::from_be_bytes([header[16], header[17]]) as f64;
    match header[13] {
        1 => Some(Dpi { x, y }),
        2 => Some(Dpi {
            x: round2(x * 2.54),
            y: round2(y * 2.54),
        }),
        _ => None,
    }
}

/// Density from the EXIF resolution tags, for JPEGs without a JFIF segment.
fn read_exif_dpi(path: &Path) -> Option<Dpi> {
    let tags = exif::read_tags(path).ok()?;
    exif_resolution_dpi(&tags)
}

/// ResolutionUnit 3 is centimetres; anything else is taken as inches.
fn exif_resolution_dpi(tags: &RawTagMap) -> Option<Dpi> {
    let axis = |key: &str| {
        tags.get(key)
            .and_then(|raw| coerce(&TagValue::from_token(raw)))
            .and_then(|n| n.as_scalar())
            .filter(|v| *v > 0.0)
    };
    let x = axis("Image XResolution")?;
    let y = axis("Image YResolution").unwrap_or(x);
    let scale = match tags.get("Image ResolutionUnit").map(|u| u.trim()) {
        Some("3") => 2.54,
        _ => 1.0,
    };
    Some(Dpi {
        x: round2(x * scale),
        y: round2(y * scale),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
