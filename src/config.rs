//! Application Configuration
//! Optional JSON settings for the data source, canvas geometry and behaviour.

use crate::data::ParsePolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "STATE_SCATTER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "state_scatter.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Margins ({horizontal}x{vertical}) leave no room on a {width}x{height} canvas")]
    NoPlotArea {
        width: u32,
        height: u32,
        horizontal: u32,
        vertical: u32,
    },
}

/// Space reserved around the plot area, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20,
            right: 40,
            bottom: 100,
            left: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_path: PathBuf,
    /// Canvas width including margins.
    pub width: u32,
    /// Canvas height including margins.
    pub height: u32,
    pub margin: Margin,
    pub point_radius: f32,
    pub transition_ms: u64,
    pub parse_policy: ParsePolicy,
    pub open_after_export: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("static/data/data.csv"),
            width: 960,
            height: 500,
            margin: Margin::default(),
            point_radius: 11.0,
            transition_ms: 1800,
            parse_policy: ParsePolicy::Skip,
            open_after_export: false,
        }
    }
}

impl ChartConfig {
    /// Load and validate a config file. Missing keys take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ChartConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config file to use, if any: the env var wins, then the working
    /// directory default.
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Load the located config, falling back to defaults when there is none
    /// or it is invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::locate() else {
            log::info!("no config file found, using defaults");
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // A saturated sum always exceeds the canvas.
        let horizontal = self.margin.left.saturating_add(self.margin.right);
        let vertical = self.margin.top.saturating_add(self.margin.bottom);
        if horizontal >= self.width || vertical >= self.height {
            return Err(ConfigError::NoPlotArea {
                width: self.width,
                height: self.height,
                horizontal,
                vertical,
            });
        }
        Ok(())
    }

    /// Plot area width (canvas minus left/right margins).
    pub fn plot_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left.saturating_add(self.margin.right))
    }

    /// Plot area height (canvas minus top/bottom margins).
    pub fn plot_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top.saturating_add(self.margin.bottom))
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_reference_canvas() {
        let config = ChartConfig::default();
        assert_eq!(config.plot_width(), 820);
        assert_eq!(config.plot_height(), 380);
        assert_eq!(config.transition_duration(), Duration::from_millis(1800));
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "transition_ms": 250, "parse_policy": "fail", "margin": {{ "left": 60 }} }}"#
        )
        .unwrap();

        let config = ChartConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.transition_ms, 250);
        assert_eq!(config.parse_policy, ParsePolicy::Fail);
        assert_eq!(config.margin.left, 60);
        assert_eq!(config.margin.bottom, 100);
        assert_eq!(config.width, 960);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let config = ChartConfig {
            width: 100,
            ..ChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoPlotArea { .. })
        ));
    }

    #[test]
    fn overflowing_margins_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "margin": {{ "left": 4294967295, "right": 1 }} }}"#).unwrap();

        match ChartConfig::load_from_file(file.path()) {
            Err(ConfigError::NoPlotArea { horizontal, .. }) => assert_eq!(horizontal, u32::MAX),
            other => panic!("expected NoPlotArea, got {other:?}"),
        }

        let config = ChartConfig {
            margin: Margin {
                top: u32::MAX,
                bottom: u32::MAX,
                ..Margin::default()
            },
            ..ChartConfig::default()
        };
        assert_eq!(config.plot_height(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ChartConfig::load_from_file(file.path()),
            Err(ConfigError::Json(_))
        ));
    }
}
