use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use exif_brief::config::Config;
use exif_brief::pipeline::process_batch;
use exif_brief::render::{render_json, render_text, write_json};
use tempfile::TempDir;

#[allow(dead_code)]
#[path = "../src/exif/testkit.rs"]
mod testkit;

use testkit::{ExifBlock, write_jpeg_with_exif};

fn write_png_with_software(path: &Path, software: &str) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 2);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .add_text_chunk("Software".to_string(), software.to_string())
        .unwrap();
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[0u8; 12]).unwrap();
}

#[test]
fn three_paths_with_missing_middle() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.png");
    let missing = dir.path().join("missing.jpg");
    let last = dir.path().join("last.png");
    image::RgbImage::new(4, 4).save(&first).unwrap();
    write_png_with_software(&last, "PaintTool 3");

    let paths = vec![first.clone(), missing.clone(), last.clone()];
    let batch = process_batch(&paths, &Config::default());

    let json: serde_json::Value = serde_json::from_str(&render_json(&batch).unwrap()).unwrap();
    let object = json.as_object().unwrap();
    let keys: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    assert_eq!(object.len(), 3);

    let first_entry = &json[&keys[0]];
    assert_eq!(first_entry["image"]["format"], "PNG");
    assert_eq!(first_entry["image"]["width"], 4);
    assert!(first_entry["exif_tags"].is_null());
    assert_eq!(
        first_entry["exif_friendly"]["capture_datetime"],
        first_entry["filesystem"]["mtime"]
    );

    assert_eq!(json[&keys[1]], serde_json::json!({ "error": "file not found" }));

    let last_entry = &json[&keys[2]];
    assert_eq!(last_entry["image"]["png_info"]["Software"], "PaintTool 3");
    assert_eq!(last_entry["exif_friendly"]["device"], "PaintTool 3");
    assert!(last_entry["exif_friendly"].get("gps").is_none());

    // input order survives serialization
    let listed: Vec<&str> = batch.iter().map(|(k, _)| k).collect();
    assert_eq!(listed, keys.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn text_rendering_of_png_without_exif() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.png");
    write_png_with_software(&path, "Scanner Suite");

    let key = path.display().to_string();
    let batch = process_batch(&[path], &Config::default());
    let record = batch.get(&key).and_then(|e| e.record()).unwrap();
    let text = render_text(record, &key);

    assert!(text.contains("  Format : PNG"));
    assert!(text.contains("  Device (Make/Model) : Scanner Suite"));
    assert!(text.contains("Location (GPS): Not found"));
    assert!(text.contains("Exposure / lens: Not available"));
}

#[test]
fn json_file_output() {
    let dir = TempDir::new().unwrap();
    let image_path = dir.path().join("a.png");
    image::RgbImage::new(1, 1).save(&image_path).unwrap();
    let out = dir.path().join("report.json");

    let batch = process_batch(&[image_path.clone()], &Config::default());
    write_json(&batch, &out).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let entry = &written[image_path.display().to_string()];
    assert!(entry["filesystem"]["size_human"].as_str().unwrap().ends_with(" B"));
    assert_eq!(entry["image"]["frames"], 1);
}

#[test]
fn camera_jpeg_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("camera.jpg");
    write_jpeg_with_exif(&path, &ExifBlock::camera());

    let key = path.display().to_string();
    let batch = process_batch(&[path], &Config::default());
    let json: serde_json::Value = serde_json::from_str(&render_json(&batch).unwrap()).unwrap();
    let entry = &json[&key];

    assert_eq!(entry["image"]["dpi"]["x"], 300.0);
    assert_eq!(entry["exif_tags"]["Image DateTime"], "2020:01:01 00:00:00");
    assert_eq!(entry["exif_tags"]["GPS GPSLatitude"], "[34, 5, 1200/100]");
    assert_eq!(entry["exif_tags"]["EXIF ExifVersion"], "0232");

    let friendly = &entry["exif_friendly"];
    assert_eq!(friendly["capture_datetime"], "2019:06:15 10:30:00");
    assert_eq!(friendly["device"], "Acme X100");
    assert_eq!(friendly["ISO"], "200");
    assert_eq!(friendly["Aperture"], "28/10");
    assert_eq!(friendly["gps"]["lat"], -34.0866667);
    assert_eq!(friendly["gps"]["lon"], -118.5);

    let record = batch.get(&key).and_then(|e| e.record()).unwrap();
    let text = render_text(record, &key);
    assert!(text.contains("  Latitude  : -34.0866667"));
    assert!(text.contains("  DPI    : 300 x 300"));
}
