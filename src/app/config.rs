//! Configuration Management

use crate::classify::classifier::GestureThresholds;
use crate::classify::confidence::PredictionMode;
use crate::quality::audio::AudioQualityTier;
use crate::session::predictor::PredictorOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gesture prediction settings
    pub gesture: GestureConfig,
    /// Latency monitoring settings
    pub latency: LatencyConfig,
    /// Quality control settings
    #[serde(default)]
    pub quality: QualityConfig,
}

/// Gesture prediction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Operating mode (conservative | balanced | aggressive)
    pub mode: PredictionMode,
    /// Kill-switch for the whole prediction pipeline
    pub enabled: bool,
    /// Retained samples per trajectory
    pub history_size: usize,
    /// End-point extrapolation horizon, ms
    pub prediction_horizon_ms: f64,
    /// Explicit action threshold overriding the mode's, when set
    #[serde(default)]
    pub min_confidence_to_act: Option<f64>,
    /// Preload cache capacity
    pub max_preloaded_animations: usize,
    /// Maximum duration for a tap, ms
    pub tap_max_duration_ms: f64,
    /// Maximum travel for a tap, px
    pub tap_max_distance_px: f64,
    /// Double-tap recency window, ms
    pub double_tap_max_interval_ms: f64,
    /// Minimum hold for a long-press, ms
    pub long_press_min_duration_ms: f64,
    /// Minimum speed for a swipe, px/ms
    pub swipe_min_velocity: f64,
    /// Minimum travel for a swipe, px
    pub swipe_min_distance_px: f64,
    /// Minimum |scale − 1| for a pinch
    pub pinch_min_scale: f64,
    /// Minimum bearing change for a rotation, degrees
    pub rotate_min_angle_deg: f64,
}

/// Latency monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Target frame time, ms
    pub target_latency_ms: f64,
}

/// Quality control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Forced audio quality ("auto" | "high" | "medium" | "low" | "ultra-low")
    pub forced_audio_quality: String,
}

impl Default for GestureConfig {
    fn default() -> Self {
        let thresholds = GestureThresholds::default();
        Self {
            mode: PredictionMode::Balanced,
            enabled: true,
            history_size: 20,
            prediction_horizon_ms: 100.0,
            min_confidence_to_act: None,
            max_preloaded_animations: 5,
            tap_max_duration_ms: thresholds.tap_max_duration_ms,
            tap_max_distance_px: thresholds.tap_max_distance_px,
            double_tap_max_interval_ms: thresholds.double_tap_max_interval_ms,
            long_press_min_duration_ms: thresholds.long_press_min_duration_ms,
            swipe_min_velocity: thresholds.swipe_min_velocity,
            swipe_min_distance_px: thresholds.swipe_min_distance_px,
            pinch_min_scale: thresholds.pinch_min_scale,
            rotate_min_angle_deg: thresholds.rotate_min_angle_deg,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            target_latency_ms: 1_000.0 / 60.0,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            forced_audio_quality: "auto".to_string(),
        }
    }
}

impl GestureConfig {
    /// Classifier thresholds derived from this config
    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            tap_max_duration_ms: self.tap_max_duration_ms,
            tap_max_distance_px: self.tap_max_distance_px,
            double_tap_max_interval_ms: self.double_tap_max_interval_ms,
            long_press_min_duration_ms: self.long_press_min_duration_ms,
            swipe_min_velocity: self.swipe_min_velocity,
            swipe_min_distance_px: self.swipe_min_distance_px,
            pinch_min_scale: self.pinch_min_scale,
            rotate_min_angle_deg: self.rotate_min_angle_deg,
        }
    }

    /// Session options derived from this config
    pub fn predictor_options(&self) -> PredictorOptions {
        PredictorOptions {
            mode: self.mode,
            thresholds: self.thresholds(),
            prediction_horizon_ms: self.prediction_horizon_ms,
            min_confidence_to_act: self.min_confidence_to_act,
            history_size: self.history_size,
            enabled: self.enabled,
            max_preloaded_animations: self.max_preloaded_animations,
        }
    }
}

impl QualityConfig {
    /// Parse the forced audio tier; None means automatic
    pub fn forced_tier(&self) -> Result<Option<AudioQualityTier>, crate::Error> {
        if self.forced_audio_quality == "auto" {
            return Ok(None);
        }
        self.forced_audio_quality
            .parse()
            .map(Some)
            .map_err(crate::Error::Config)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let g = &self.gesture;
        if g.history_size < 2 || g.history_size > 256 {
            return Err(crate::Error::Config(format!(
                "history_size must be in [2, 256], got {}",
                g.history_size
            )));
        }
        for (name, value) in [
            ("tap_max_duration_ms", g.tap_max_duration_ms),
            ("tap_max_distance_px", g.tap_max_distance_px),
            ("double_tap_max_interval_ms", g.double_tap_max_interval_ms),
            ("long_press_min_duration_ms", g.long_press_min_duration_ms),
            ("swipe_min_velocity", g.swipe_min_velocity),
            ("swipe_min_distance_px", g.swipe_min_distance_px),
            ("pinch_min_scale", g.pinch_min_scale),
            ("rotate_min_angle_deg", g.rotate_min_angle_deg),
            ("prediction_horizon_ms", g.prediction_horizon_ms),
        ] {
            if value <= 0.0 {
                return Err(crate::Error::Config(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }
        if g.max_preloaded_animations == 0 {
            return Err(crate::Error::Config(
                "max_preloaded_animations must be > 0".to_string(),
            ));
        }
        if let Some(threshold) = g.min_confidence_to_act {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(crate::Error::Config(format!(
                    "min_confidence_to_act must be in [0, 1], got {threshold}"
                )));
            }
        }
        if self.latency.target_latency_ms <= 0.0 || self.latency.target_latency_ms > 1_000.0 {
            return Err(crate::Error::Config(format!(
                "target_latency_ms must be in (0, 1000], got {}",
                self.latency.target_latency_ms
            )));
        }
        self.quality.forced_tier()?;
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_predictor").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
