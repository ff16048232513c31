//! Editor configuration loading and schema.

use crate::{EditorError, Result};
use image::imageops::FilterType;
use imgscale_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Resampling settings
    #[serde(default)]
    pub resize: ResizeConfig,

    /// Logging settings, installed by [`EditorConfig::init_telemetry`]
    #[serde(default)]
    pub logging: TelemetryConfig,
}

/// Resize configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResizeConfig {
    /// Resampling filter used for every resize
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// Resampling filters, mirroring [`FilterType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor
    Nearest,
    /// Linear (bilinear)
    Triangle,
    /// Cubic (bicubic)
    #[default]
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a file path, a standard location, or defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path.map(String::from).or_else(find_config_file) {
            Some(p) => load_config_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Install the global log subscriber described by the `[logging]` section.
    ///
    /// Fails if a subscriber is already installed in this process.
    pub fn init_telemetry(&self) -> Result<()> {
        imgscale_telemetry::init_with_config(self.logging.clone())
            .map_err(|e| EditorError::Config(e.to_string()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| EditorError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".imgscale.toml",
        "imgscale.toml",
        ".config/imgscale.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<EditorConfig> {
    tracing::debug!(path, "Loading editor config");

    let content = std::fs::read_to_string(path)
        .map_err(|e| EditorError::Config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| EditorError::Config(format!("Failed to parse config file {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = EditorConfig::default();
        assert_eq!(config.resize.filter, ResizeFilter::CatmullRom);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_config_from_toml() {
        let config = EditorConfig::from_toml(
            r#"
            [resize]
            filter = "lanczos3"

            [logging]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.resize.filter, ResizeFilter::Lanczos3);
        assert_eq!(config.logging.log_level, "debug");
        assert!(!config.logging.show_file);
    }

    #[test]
    fn test_config_empty_toml_uses_defaults() {
        let config = EditorConfig::from_toml("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_config_unknown_filter() {
        let err = EditorConfig::from_toml("[resize]\nfilter = \"box\"\n").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn test_config_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("imgscale.toml");
        std::fs::write(&path, "[resize]\nfilter = \"nearest\"\n").unwrap();

        let config = EditorConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.resize.filter, ResizeFilter::Nearest);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = EditorConfig::load(Some("/nonexistent/imgscale.toml")).unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn test_init_telemetry_installs_once() {
        let config = EditorConfig::from_toml("[logging]\nlog_level = \"debug\"\n").unwrap();
        config.init_telemetry().unwrap();

        let err = config.init_telemetry().unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn test_filter_conversion() {
        assert_eq!(FilterType::from(ResizeFilter::Lanczos3), FilterType::Lanczos3);
        assert_eq!(FilterType::from(ResizeFilter::default()), FilterType::CatmullRom);
    }
}
