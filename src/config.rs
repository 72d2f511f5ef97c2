//! Game configuration
//!
//! Every tunable the simulation reads lives in [`GameConfig`] and is passed
//! explicitly, so alternate window sizes can be exercised without rebuilding.
//! Persisted as JSON: a file on native, LocalStorage on web.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Accepted step rates (steps per second)
const FRAME_RATE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=10_000.0;
/// Longest accepted post-round pause
const MAX_ROUND_RESET_DELAY_MS: u64 = 60_000;

/// How `init_ball` picks the launch direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchMode {
    /// `angle = π · round(u)`: strictly left or strictly right, no vertical component
    #[default]
    Horizontal,
    /// Continuous angle within `±max_angle` radians of the chosen horizontal direction
    Spread { max_angle: f32 },
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Entities ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Side length of the square ball
    pub ball_size: f32,

    // === Speeds (pixels/s) ===
    pub ball_speed: f32,
    pub control_speed: f32,

    // === Timing ===
    /// Steps per second; each step advances exactly `1 / frame_rate` seconds
    pub frame_rate: f32,
    /// Pause after a round ends, before the next step runs
    pub round_reset_delay_ms: u64,

    // === Serve ===
    pub launch_mode: LaunchMode,
    /// Fixed RNG seed (None = seed from the clock at startup)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            control_speed: CONTROL_SPEED,
            frame_rate: FRAME_RATE,
            round_reset_delay_ms: ROUND_RESET_DELAY_MS,
            launch_mode: LaunchMode::Horizontal,
            seed: None,
        }
    }
}

impl GameConfig {
    /// 600 × 800 window
    pub fn portrait() -> Self {
        Self::default()
    }

    /// 800 × 600 window
    pub fn landscape() -> Self {
        Self {
            window_width: LANDSCAPE_WIDTH,
            window_height: LANDSCAPE_HEIGHT,
            ..Self::default()
        }
    }

    /// Elapsed time of a single step
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Lowest allowed paddle top edge
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.window_height - self.paddle_height
    }

    #[inline]
    pub fn ball_max_x(&self) -> f32 {
        self.window_width - self.ball_size
    }

    #[inline]
    pub fn ball_max_y(&self) -> f32 {
        self.window_height - self.ball_size
    }

    pub fn round_reset_delay(&self) -> Duration {
        Duration::from_millis(self.round_reset_delay_ms)
    }

    /// Window shape as a CSS `aspect-ratio` value
    pub fn css_aspect_ratio(&self) -> String {
        format!("{} / {}", self.window_width, self.window_height)
    }

    /// Frame period used by the pacer
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f32(self.dt())
    }

    /// Check that every formula in the simulation is well defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("control_speed", self.control_speed),
            ("frame_rate", self.frame_rate),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be a positive finite number",
                });
            }
        }

        if !FRAME_RATE_RANGE.contains(&self.frame_rate) {
            return Err(ConfigError::InvalidValue {
                field: "frame_rate",
                reason: "must be between 1 and 10000 steps per second",
            });
        }
        if self.round_reset_delay_ms > MAX_ROUND_RESET_DELAY_MS {
            return Err(ConfigError::InvalidValue {
                field: "round_reset_delay_ms",
                reason: "must not exceed 60000",
            });
        }

        if self.paddle_height > self.window_height {
            return Err(ConfigError::InvalidValue {
                field: "paddle_height",
                reason: "must not exceed window_height",
            });
        }
        if self.ball_size > self.window_width || self.ball_size > self.window_height {
            return Err(ConfigError::InvalidValue {
                field: "ball_size",
                reason: "must fit inside the window",
            });
        }
        if self.paddle_width * 2.0 >= self.window_width {
            return Err(ConfigError::InvalidValue {
                field: "paddle_width",
                reason: "paddles must not meet in the middle",
            });
        }
        if let LaunchMode::Spread { max_angle } = self.launch_mode {
            if !max_angle.is_finite() || !(0.0..std::f32::consts::FRAC_PI_2).contains(&max_angle) {
                return Err(ConfigError::InvalidValue {
                    field: "launch_mode.max_angle",
                    reason: "must be in [0, π/2)",
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "duel_pong_config";

    /// Load config from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load_stored() -> Self {
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

    /// Save config to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save_stored(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }
}

/// Errors from loading or validating a [`GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid config value `{}`: {}", field, reason)
            }
            ConfigError::Parse(err) => write!(f, "malformed config: {}", err),
            ConfigError::Io(err) => write!(f, "could not access config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidValue { .. } => None,
            ConfigError::Parse(source) => Some(source),
            ConfigError::Io(source) => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}
