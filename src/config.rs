//! Runner tuning and course selection
//!
//! Defaults reproduce the classic level. Any field may be overridden from
//! JSON; on the web the config is persisted in LocalStorage.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::course::CourseSpec;

/// Longest reset delay a browser timer can hold (`setTimeout` takes an i32)
pub const MAX_RESET_MS: u64 = i32::MAX as u64;

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Forward advance per tick
    pub forward_speed: f32,
    /// Lateral advance per tick while steering
    pub lateral_speed: f32,
    /// Lane bound (character x stays within ±this)
    pub lane_half_width: f32,
    /// Distance that completes the level
    pub finish_distance: f32,

    // === Reset delays ===
    pub game_over_reset_ms: u64,
    pub finish_reset_ms: u64,
    pub quit_reset_ms: u64,

    /// Obstacle course
    pub course: CourseSpec,

    /// Autopilot look-ahead distance
    pub look_ahead: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            forward_speed: FORWARD_SPEED,
            lateral_speed: LATERAL_SPEED,
            lane_half_width: LANE_HALF_WIDTH,
            finish_distance: FINISH_DISTANCE,

            game_over_reset_ms: GAME_OVER_RESET_MS,
            finish_reset_ms: FINISH_RESET_MS,
            quit_reset_ms: QUIT_RESET_MS,

            course: CourseSpec::Full,

            look_ahead: 6.0,
        }
    }
}

impl RunnerConfig {
    /// Default tuning on a specific course
    pub fn with_course(course: CourseSpec) -> Self {
        Self {
            course,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tunings the game loop can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.forward_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "forward_speed must be positive, got {}",
                self.forward_speed
            )));
        }
        if !(self.lateral_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lateral_speed must be positive, got {}",
                self.lateral_speed
            )));
        }
        if !(self.lane_half_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lane_half_width must be positive, got {}",
                self.lane_half_width
            )));
        }
        if !(self.finish_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "finish_distance must be positive, got {}",
                self.finish_distance
            )));
        }
        for (name, ms) in [
            ("game_over_reset_ms", self.game_over_reset_ms),
            ("finish_reset_ms", self.finish_reset_ms),
            ("quit_reset_ms", self.quit_reset_ms),
        ] {
            if ms > MAX_RESET_MS {
                return Err(ConfigError::Invalid(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_RESET_MS, ms
                )));
            }
        }
        if let CourseSpec::Generated { count: 0, .. } = self.course {
            return Err(ConfigError::Invalid(
                "generated course needs at least one obstacle".into(),
            ));
        }
        Ok(())
    }

    pub fn game_over_reset(&self) -> Duration {
        Duration::from_millis(self.game_over_reset_ms)
    }

    pub fn finish_reset(&self) -> Duration {
        Duration::from_millis(self.finish_reset_ms)
    }

    pub fn quit_reset(&self) -> Duration {
        Duration::from_millis(self.quit_reset_ms)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_runner_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Read a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_level() {
        let config = RunnerConfig::default();
        assert_eq!(config.forward_speed, 0.1);
        assert_eq!(config.lateral_speed, 0.1);
        assert_eq!(config.lane_half_width, 2.0);
        assert_eq!(config.finish_distance, 110.0);
        assert_eq!(config.game_over_reset(), Duration::from_millis(2000));
        assert_eq!(config.finish_reset(), Duration::from_millis(3000));
        assert_eq!(config.quit_reset(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            RunnerConfig::from_json(r#"{"finish_distance": 50.0, "course": {"kind": "training"}}"#)
                .unwrap();
        assert_eq!(config.finish_distance, 50.0);
        assert_eq!(config.course, CourseSpec::Training);
        assert_eq!(config.forward_speed, FORWARD_SPEED);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RunnerConfig::with_course(CourseSpec::Generated { seed: 3, count: 8 });
        let json = config.to_json().unwrap();
        assert_eq!(RunnerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RunnerConfig::from_json(r#"{"forward_speed": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = RunnerConfig::from_json(r#"{"lane_half_width": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            RunnerConfig::from_json(r#"{"course": {"kind": "generated", "seed": 1, "count": 0}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_reset_delay_limited_to_timer_range() {
        let json = format!(r#"{{"finish_reset_ms": {}}}"#, MAX_RESET_MS);
        assert!(RunnerConfig::from_json(&json).is_ok());

        let json = format!(r#"{{"game_over_reset_ms": {}}}"#, MAX_RESET_MS + 1);
        let err = RunnerConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("game_over_reset_ms")));
    }

    #[test]
    fn test_malformed_json() {
        let err = RunnerConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
