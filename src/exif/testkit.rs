//! Test fixtures: JPEG files carrying a hand-built EXIF block.
//!
//! Shared by the unit tests and `tests/batch.rs`, so only external crates are
//! referenced here.

use std::io::Cursor;
use std::path::Path;

const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_GPS_IFD: u16 = 0x8825;

/// A TIFF entry value, little-endian on disk.
#[derive(Debug, Clone)]
pub enum Field {
    Bytes(Vec<u8>),
    Ascii(&'static str),
    Short(u16),
    Long(u32),
    Rationals(Vec<(u32, u32)>),
    Undefined(Vec<u8>),
}

impl Field {
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            Field::Bytes(b) => (1, b.len() as u32, b.clone()),
            Field::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            Field::Short(v) => (3, 1, v.to_le_bytes().to_vec()),
            Field::Long(v) => (4, 1, v.to_le_bytes().to_vec()),
            Field::Rationals(items) => {
                let mut bytes = Vec::with_capacity(items.len() * 8);
                for (num, den) in items {
                    bytes.extend_from_slice(&num.to_le_bytes());
                    bytes.extend_from_slice(&den.to_le_bytes());
                }
                (5, items.len() as u32, bytes)
            }
            Field::Undefined(b) => (7, b.len() as u32, b.clone()),
        }
    }
}

/// Entries of IFD0 and its Exif and GPS sub-IFDs.
#[derive(Debug, Clone, Default)]
pub struct ExifBlock {
    pub ifd0: Vec<(u16, Field)>,
    pub exif: Vec<(u16, Field)>,
    pub gps: Vec<(u16, Field)>,
}

impl ExifBlock {
    /// A camera-style block: make/model, dates without offsets, exposure,
    /// 300 dpi resolution and a south-west GPS fix.
    pub fn camera() -> Self {
        Self {
            ifd0: vec![
                (0x010F, Field::Ascii("Acme")),
                (0x0110, Field::Ascii("X100")),
                (0x011A, Field::Rationals(vec![(300, 1)])),
                (0x011B, Field::Rationals(vec![(300, 1)])),
                (0x0128, Field::Short(2)),
                (0x0132, Field::Ascii("2020:01:01 00:00:00")),
            ],
            exif: vec![
                (0x829A, Field::Rationals(vec![(1, 250)])),
                (0x829D, Field::Rationals(vec![(28, 10)])),
                (0x8827, Field::Short(200)),
                (0x9000, Field::Undefined(b"0232".to_vec())),
                (0x9003, Field::Ascii("2019:06:15 10:30:00")),
                (0x920A, Field::Rationals(vec![(35, 1)])),
            ],
            gps: vec![
                (0x0000, Field::Bytes(vec![2, 3, 0, 0])),
                (0x0001, Field::Ascii("S")),
                (0x0002, Field::Rationals(vec![(34, 1), (5, 1), (1200, 100)])),
                (0x0003, Field::Ascii("W")),
                (0x0004, Field::Rationals(vec![(118, 1), (30, 1), (0, 1)])),
            ],
        }
    }

    /// Little-endian TIFF stream: header, IFD0, Exif IFD, GPS IFD.
    pub fn to_tiff(&self) -> Vec<u8> {
        const HEADER_LEN: u32 = 8;

        // IFD sizes do not depend on where they start, so lay out with
        // placeholder pointers first.
        let ifd0_len = encode_ifd(0, &self.ifd0_with_pointers(0, 0)).len() as u32;
        let exif_start = HEADER_LEN + ifd0_len;
        let exif = encode_ifd(exif_start, &self.exif);
        let gps_start = exif_start + exif.len() as u32;
        let gps = encode_ifd(gps_start, &self.gps);
        let ifd0 = encode_ifd(HEADER_LEN, &self.ifd0_with_pointers(exif_start, gps_start));

        let mut tiff = b"II\x2A\x00".to_vec();
        tiff.extend_from_slice(&HEADER_LEN.to_le_bytes());
        tiff.extend(ifd0);
        tiff.extend(exif);
        tiff.extend(gps);
        tiff
    }

    fn ifd0_with_pointers(&self, exif_start: u32, gps_start: u32) -> Vec<(u16, Field)> {
        let mut entries = self.ifd0.clone();
        entries.push((TAG_EXIF_IFD, Field::Long(exif_start)));
        entries.push((TAG_GPS_IFD, Field::Long(gps_start)));
        entries.sort_by_key(|(tag, _)| *tag);
        entries
    }
}

fn encode_ifd(start: u32, entries: &[(u16, Field)]) -> Vec<u8> {
    let table_len = 2 + 12 * entries.len() as u32 + 4;
    let mut table = Vec::new();
    let mut data = Vec::new();

    table.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, field) in entries {
        let (kind, count, mut bytes) = field.encode();
        table.extend_from_slice(&tag.to_le_bytes());
        table.extend_from_slice(&kind.to_le_bytes());
        table.extend_from_slice(&count.to_le_bytes());
        if bytes.len() <= 4 {
            bytes.resize(4, 0);
            table.extend(bytes);
        } else {
            let offset = start + table_len + data.len() as u32;
            table.extend_from_slice(&offset.to_le_bytes());
            data.extend(bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    table.extend_from_slice(&0u32.to_le_bytes());

    table.extend(data);
    table
}

/// Write a small grayscale JPEG with `block` spliced in as an APP1 segment.
pub fn write_jpeg_with_exif(path: &Path, block: &ExifBlock) {
    let mut jpeg = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(image::GrayImage::new(8, 8))
        .write_to(&mut jpeg, image::ImageFormat::Jpeg)
        .unwrap();
    let jpeg = jpeg.into_inner();

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(block.to_tiff());

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend(payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}
