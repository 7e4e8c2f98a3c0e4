use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for exif-brief.
///
/// Controls which raw tag names feed each friendly field, which textual
/// metadata keys can stand in for the device, and the default output format.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_brief::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.aliases.capture_datetime.insert(0, "EXIF OffsetTimeOriginal".into());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered raw tag aliases per friendly field.
    pub aliases: TagAliases,
    /// Textual metadata keys tried, in order, when no make/model is present.
    pub device_text_keys: Vec<String>,
    /// Map link template. `{lat}` and `{lon}` are replaced by the coordinates.
    pub maps_url_template: String,
    /// Output behavior.
    pub output: OutputConfig,
}

/// Raw tag names accepted for each friendly field, most specific first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagAliases {
    pub capture_datetime: Vec<String>,
    pub make: Vec<String>,
    pub model: Vec<String>,
    pub iso: Vec<String>,
    pub exposure_time: Vec<String>,
    pub aperture: Vec<String>,
    pub focal_length: Vec<String>,
    pub gps_latitude: Vec<String>,
    pub gps_latitude_ref: Vec<String>,
    pub gps_longitude: Vec<String>,
    pub gps_longitude_ref: Vec<String>,
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for TagAliases {
    fn default() -> Self {
        Self {
            capture_datetime: names(&[
                "EXIF DateTimeOriginal",
                "EXIF DateTimeDigitized",
                "Image DateTime",
            ]),
            make: names(&["Image Make", "Make"]),
            model: names(&["Image Model", "Model"]),
            iso: names(&["EXIF ISOSpeedRatings", "PhotographicSensitivity"]),
            exposure_time: names(&["EXIF ExposureTime", "ExposureTime"]),
            aperture: names(&["EXIF FNumber", "FNumber"]),
            focal_length: names(&["EXIF FocalLength", "FocalLength"]),
            gps_latitude: names(&["GPS GPSLatitude"]),
            gps_latitude_ref: names(&["GPS GPSLatitudeRef"]),
            gps_longitude: names(&["GPS GPSLongitude"]),
            gps_longitude_ref: names(&["GPS GPSLongitudeRef"]),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aliases: TagAliases::default(),
            device_text_keys: names(&[
                "Software",
                "Author",
                "Description",
                "Source",
                "Creator",
                "Creation Time",
            ]),
            maps_url_template: "https://www.google.com/maps/search/?api=1&query={lat},{lon}"
                .to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Default config location: `config.json` next to the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file means built-in
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Config file not found at {}", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let default_path = Self::config_path()?;
                if !default_path.exists() {
                    log::debug!(
                        "No config file at {}. Using defaults.",
                        default_path.display()
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        log::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Render the map link for a coordinate pair.
    pub fn maps_link(&self, lat: f64, lon: f64) -> String {
        self.maps_url_template
            .replace("{lat}", &lat.to_string())
            .replace("{lon}", &lon.to_string())
    }
}
