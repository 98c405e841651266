//! Configuration management for FrameGate
//!
//! Provides configuration loading, saving, and validation for the scheduler
//! intervals, quality analysis, detector tuning, and gate thresholds.

use crate::errors::PipelineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameGateConfig {
    pub scheduler: SchedulerConfig,
    pub quality: QualityConfig,
    pub detector: DetectorConfig,
    pub gate: GateConfig,
}

/// Scheduler loop intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minimum interval between render ticks in milliseconds (~30 fps)
    pub render_interval_ms: f64,
    /// Minimum interval between detection ticks in milliseconds (10 fps)
    pub detect_interval_ms: f64,
}

/// Quality analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Pixel sampling stride for sharpness and framing (every Nth pixel)
    pub stride: u32,
    /// Fraction of each axis covered by the centered framing target region
    pub target_region_fraction: f32,
}

/// Detector invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Model working resolution
    pub input_size: u32,
    /// Minimum confidence to report a detection (0.0-1.0)
    pub score_threshold: f32,
}

/// Capture gate thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Consecutive good samples required to enter Stabilizing
    pub align_streak: u32,
    /// Consecutive good samples after entering Stabilizing required to capture
    pub hold_streak: u32,
    /// Minimum sharpness for a sample to count as good
    pub min_sharpness: f64,
    /// Milliseconds without any frame before the gate goes Blocked
    pub blocked_after_ms: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            render_interval_ms: 1000.0 / 30.0,
            detect_interval_ms: 100.0,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            stride: 4,
            target_region_fraction: 0.5,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_size: 320,
            score_threshold: 0.32,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            align_streak: 3,
            hold_streak: 6,
            min_sharpness: 120.0,
            blocked_after_ms: 10_000.0,
        }
    }
}

impl Default for FrameGateConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            quality: QualityConfig::default(),
            detector: DetectorConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

impl FrameGateConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: FrameGateConfig = toml::from_str(&contents).map_err(|e| {
            PipelineError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PipelineError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            PipelineError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            PipelineError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("framegate.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        // Validate scheduler config
        if !(self.scheduler.render_interval_ms > 0.0) {
            return Err("Render interval must be positive".to_string());
        }
        if !(self.scheduler.detect_interval_ms > 0.0) {
            return Err("Detect interval must be positive".to_string());
        }

        // Validate quality config
        if self.quality.stride == 0 {
            return Err("Sampling stride must be at least 1".to_string());
        }
        if !(self.quality.target_region_fraction > 0.0)
            || self.quality.target_region_fraction > 1.0
        {
            return Err("Target region fraction must be in (0.0, 1.0]".to_string());
        }

        // Validate detector config
        if self.detector.input_size == 0 {
            return Err("Detector input size must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.detector.score_threshold) {
            return Err("Score threshold must be between 0.0 and 1.0".to_string());
        }

        // Validate gate config
        if self.gate.align_streak == 0 {
            return Err("Align streak must be at least 1".to_string());
        }
        if self.gate.hold_streak < self.gate.align_streak {
            return Err("Hold streak must be >= align streak".to_string());
        }
        if !self.gate.min_sharpness.is_finite() || self.gate.min_sharpness < 0.0 {
            return Err("Minimum sharpness must be finite and non-negative".to_string());
        }
        if !(self.gate.blocked_after_ms > 0.0) {
            return Err("Blocked timeout must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FrameGateConfig::default();
        assert_eq!(config.quality.stride, 4);
        assert_eq!(config.detector.input_size, 320);
        assert_eq!(config.scheduler.detect_interval_ms, 100.0);
        assert!(config.gate.hold_streak >= config.gate.align_streak);
    }

    #[test]
    fn test_config_validation() {
        let config = FrameGateConfig::default();
        assert!(config.validate().is_ok());

        let mut bad_stride = config.clone();
        bad_stride.quality.stride = 0;
        assert!(bad_stride.validate().is_err());

        let mut bad_threshold = config.clone();
        bad_threshold.detector.score_threshold = 1.5;
        assert!(bad_threshold.validate().is_err());

        let mut bad_streaks = config.clone();
        bad_streaks.gate.align_streak = 5;
        bad_streaks.gate.hold_streak = 4;
        assert!(bad_streaks.validate().is_err());

        let mut bad_interval = config;
        bad_interval.scheduler.render_interval_ms = 0.0;
        assert!(bad_interval.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("test_framegate.toml");

        let config = FrameGateConfig::default();
        assert!(config.save_to_file(&config_path).is_ok());

        let loaded = FrameGateConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.quality.stride, config.quality.stride);
        assert_eq!(loaded.gate.hold_streak, config.gate.hold_streak);
        assert_eq!(
            loaded.detector.score_threshold,
            config.detector.score_threshold
        );
    }

    #[test]
    fn test_config_toml_format() {
        let config = FrameGateConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[scheduler]"));
        assert!(toml_string.contains("[quality]"));
        assert!(toml_string.contains("[detector]"));
        assert!(toml_string.contains("[gate]"));
        assert!(toml_string.contains("detect_interval_ms"));
        assert!(toml_string.contains("align_streak"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = FrameGateConfig::load_from_file("nonexistent_framegate.toml");
        assert!(result.is_ok()); // Should return default
        assert_eq!(result.unwrap().quality.stride, 4);
    }
}
