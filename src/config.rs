//! Configuration file handling for pose-collector.
//!
//! Loads configuration from `~/.config/pose-collector/config.toml` or a custom path.
//! Command-line flags override whatever the file sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::CharSet;
use crate::camera::{CameraSettings, Resolution};
use crate::pose::MoveNetConfig;
use crate::session::Timing;
use crate::terminal::AsciiStyle;

/// Configuration file structure for pose-collector.
/// Loaded from ~/.config/pose-collector/config.toml (or custom path via --config).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub ascii: AsciiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CameraConfig {
    #[serde(default)]
    pub device: u32,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: false,
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CaptureConfig {
    #[serde(default = "default_first_countdown")]
    pub first_countdown_secs: u64,
    #[serde(default = "default_countdown")]
    pub countdown_secs: u64,
    #[serde(default = "default_shutter")]
    pub shutter_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            first_countdown_secs: default_first_countdown(),
            countdown_secs: default_countdown(),
            shutter_ms: default_shutter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PathsConfig {
    /// Root of the per-pose example directories
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding `<slug>.jpg` reference images
    #[serde(default = "default_poses_dir")]
    pub poses_dir: PathBuf,
    /// MoveNet ONNX model
    #[serde(default = "default_model")]
    pub model: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            poses_dir: default_poses_dir(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default = "default_min_confidence")]
    pub min_detection_confidence: f32,
    #[serde(default = "default_input_size")]
    pub input_size: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let movenet = MoveNetConfig::default();
        Self {
            min_detection_confidence: movenet.min_detection_confidence,
            input_size: movenet.input_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AsciiConfig {
    /// standard, blocks or minimal
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub invert: bool,
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            charset: None,
            invert: false,
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    Resolution::MEDIUM.width
}

fn default_height() -> u32 {
    Resolution::MEDIUM.height
}

fn default_fps() -> u32 {
    30
}

fn default_first_countdown() -> u64 {
    5
}

fn default_countdown() -> u64 {
    3
}

fn default_shutter() -> u64 {
    300
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_poses_dir() -> PathBuf {
    PathBuf::from("./pose_definitions")
}

fn default_model() -> PathBuf {
    MoveNetConfig::default().model_path
}

fn default_min_confidence() -> f32 {
    MoveNetConfig::default().min_detection_confidence
}

fn default_input_size() -> u32 {
    MoveNetConfig::default().input_size
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write this config as TOML, creating parent directories.
    /// Refuses to overwrite an existing file.
    pub fn write_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let io_err = |e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: Resolution {
                width: self.camera.width,
                height: self.camera.height,
            },
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            first_countdown: Duration::from_secs(self.capture.first_countdown_secs),
            countdown: Duration::from_secs(self.capture.countdown_secs),
            shutter: Duration::from_millis(self.capture.shutter_ms),
        }
    }

    /// Frame rendering style. An unknown charset falls back to the default.
    pub fn ascii_style(&self) -> AsciiStyle {
        let charset = match self.ascii.charset.as_deref().map(str::parse::<CharSet>) {
            Some(Ok(charset)) => charset,
            Some(Err(e)) => {
                log::warn!("{}", e);
                CharSet::default()
            }
            None => CharSet::default(),
        };
        AsciiStyle {
            charset,
            invert: self.ascii.invert,
            color: self.ascii.color,
        }
    }

    pub fn movenet(&self) -> MoveNetConfig {
        MoveNetConfig {
            model_path: self.paths.model.clone(),
            input_size: self.analysis.input_size,
            min_detection_confidence: self.analysis.min_detection_confidence,
        }
    }
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    SerializeError(toml::ser::Error),
    AlreadyExists(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::SerializeError(source) => {
                write!(f, "Failed to serialize config: {}", source)
            }
            ConfigError::AlreadyExists(path) => {
                write!(f, "Config file '{}' already exists", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::SerializeError(source) => Some(source),
            ConfigError::AlreadyExists(_) => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pose-collector").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/pose-collector/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.data_dir, PathBuf::from("./data"));
        assert_eq!(config.paths.poses_dir, PathBuf::from("./pose_definitions"));
        assert_eq!(config.timing(), Timing::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[camera]\ndevice = 2\nmirror = true\n\n[capture]\ncountdown_secs = 4"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.camera.device, 2);
        assert!(config.camera.mirror);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.capture.countdown_secs, 4);
        assert_eq!(config.capture.first_countdown_secs, 5);

        let timing = config.timing();
        assert_eq!(timing.countdown, Duration::from_secs(4));
        assert_eq!(timing.shutter, Duration::from_millis(300));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[camera\ndevice = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_write_new_round_trips_and_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.analysis.min_detection_confidence = 0.42;
        config.write_new(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);

        assert!(matches!(
            config.write_new(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_camera_settings_from_config() {
        let mut config = Config::default();
        config.camera.device = 1;
        config.camera.width = 1280;
        config.camera.height = 720;
        let settings = config.camera_settings();
        assert_eq!(settings.device_index, 1);
        assert_eq!(settings.resolution, Resolution::HIGH);
        assert!(!settings.mirror);
    }

    #[test]
    fn test_ascii_style() {
        let mut config = Config::default();
        assert_eq!(config.ascii_style(), AsciiStyle::default());

        config.ascii.charset = Some("blocks".to_string());
        config.ascii.color = false;
        let style = config.ascii_style();
        assert_eq!(style.charset, CharSet::Blocks);
        assert!(!style.color);

        config.ascii.charset = Some("braille".to_string());
        assert_eq!(config.ascii_style().charset, CharSet::Standard);
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        assert!(default_path().ends_with("pose-collector/config.toml"));
    }
}
