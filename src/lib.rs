//! # exif-brief
//!
//! Focused image metadata extractor. Reads an image file and produces a stable
//! record of capture time, device, exposure settings, and GPS location, no
//! matter whether the value came from the EXIF block, a PNG text chunk, or the
//! filesystem.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_brief::config::Config;
//! use exif_brief::pipeline::process_batch;
//! use exif_brief::render::{render_json, render_text};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let batch = process_batch(&[PathBuf::from("photo.jpg")], &config);
//!
//!     for (path, entry) in batch.iter() {
//!         match entry.record() {
//!             Some(record) => print!("{}", render_text(record, path)),
//!             None => eprintln!("{path}: file not found"),
//!         }
//!     }
//!
//!     println!("{}", render_json(&batch)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! ```rust,no_run
//! use exif_brief::config::Config;
//! use exif_brief::exif::read_tags;
//! use exif_brief::friendly::select_friendly;
//! use std::path::Path;
//!
//! let tags = read_tags(Path::new("photo.jpg")).unwrap();
//! let friendly = select_friendly(&tags, &Config::default());
//! println!("Taken: {:?}", friendly.capture_datetime);
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Tag aliases, device keys, and loading/saving
//! - [`error`]: Error taxonomy and per-section error markers
//! - [`exif`]: Raw tag map and tagged tag values
//! - [`filesystem`]: File size and timestamps
//! - [`image_info`]: Format, mode, dimensions, frames, DPI, PNG text
//! - [`friendly`]: Alias selection into friendly fields
//! - [`gps`]: DMS parsing and decimal coordinates
//! - [`fallback`]: Capture time and device from secondary sources
//! - [`pipeline`]: Per-file records and batches
//! - [`render`]: Text and JSON output

pub mod config;
pub mod error;
pub mod exif;
pub mod fallback;
pub mod filesystem;
pub mod friendly;
pub mod gps;
pub mod image_info;
pub mod pipeline;
pub mod render;
