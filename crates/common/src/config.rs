//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{KinetraceError, KinetraceResult};

/// Largest smoothing window accepted by validation.
pub const MAX_SMOOTHING_WINDOW: usize = 1024;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Per-frame analysis settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the smoothing + kinematics pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of most recent observations averaged per joint.
    pub smoothing_window: usize,

    /// Detections below this visibility reuse the last smoothed position.
    pub visibility_threshold: f64,

    /// Frame rate used to derive the first frame's elapsed time.
    pub default_fps: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "kinetrace=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            visibility_threshold: 0.5,
            default_fps: 30.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl PipelineConfig {
    /// Reject settings that would make the pipeline misbehave mid-stream.
    pub fn validate(&self) -> KinetraceResult<()> {
        if self.smoothing_window == 0 {
            return Err(KinetraceError::config(
                "smoothing window must be at least 1",
            ));
        }
        if self.smoothing_window > MAX_SMOOTHING_WINDOW {
            return Err(KinetraceError::config(format!(
                "smoothing window {} exceeds the maximum of {MAX_SMOOTHING_WINDOW}",
                self.smoothing_window
            )));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(KinetraceError::config(format!(
                "visibility threshold {} is outside [0, 1]",
                self.visibility_threshold
            )));
        }
        if !self.default_fps.is_finite() || self.default_fps <= 0.0 {
            return Err(KinetraceError::config(format!(
                "default fps must be positive, got {}",
                self.default_fps
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &std::path::Path) -> KinetraceResult<Self> {
        if !path.exists() {
            return Err(KinetraceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("kinetrace").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing_window, 5);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = PipelineConfig {
            smoothing_window: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let config = PipelineConfig {
            smoothing_window: MAX_SMOOTHING_WINDOW + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_threshold_and_fps_rejected() {
        let nan_threshold = PipelineConfig {
            visibility_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(nan_threshold.validate().is_err());

        let high_threshold = PipelineConfig {
            visibility_threshold: 1.5,
            ..Default::default()
        };
        assert!(high_threshold.validate().is_err());

        let zero_fps = PipelineConfig {
            default_fps: 0.0,
            ..Default::default()
        };
        assert!(zero_fps.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let raw = r#"{"pipeline":{"smoothing_window":9}}"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.pipeline.smoothing_window, 9);
        assert_eq!(config.pipeline.visibility_threshold, 0.5);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = AppConfig::load_from(std::path::Path::new("/nonexistent/kinetrace.json"))
            .unwrap_err();
        assert!(matches!(err, KinetraceError::FileNotFound { .. }));
    }
}
