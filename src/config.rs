//! Field geometry and game balance
//!
//! Defaults reproduce the original board. A JSON file can override any
//! subset of fields; missing fields keep their default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::consts::*;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    /// Display width in pixels
    pub field_width: f32,
    /// Display height in pixels
    pub field_height: f32,
    /// Distance from screen edge to the playing field
    pub field_offset: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Human paddle speed per tick
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_width: f32,
    pub ball_height: f32,
    pub ball_start_x: f32,
    pub ball_start_y: f32,
    pub ball_start_vx: f32,
    pub ball_start_vy: f32,
    pub ball_vx_min: f32,
    pub ball_vx_max: f32,
    pub ball_vy_min: f32,
    pub ball_vy_max: f32,
    /// Maximum paddle deflection in degrees
    pub max_reflect_angle: f32,

    // === AI ===
    pub ai_look_dist: f32,
    pub ai_predict_depth: u32,
    pub ai_speed_factor: f32,

    // === Rules ===
    pub win_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            field_offset: FIELD_OFFSET,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            ball_start_x: BALL_START_X,
            ball_start_y: BALL_START_Y,
            ball_start_vx: BALL_START_VX,
            ball_start_vy: BALL_START_VY,
            ball_vx_min: BALL_VX_MIN,
            ball_vx_max: BALL_VX_MAX,
            ball_vy_min: BALL_VY_MIN,
            ball_vy_max: BALL_VY_MAX,
            max_reflect_angle: MAX_REFLECT_ANGLE,

            ai_look_dist: AI_LOOK_DIST,
            ai_predict_depth: AI_PREDICT_DEPTH,
            ai_speed_factor: AI_SPEED_FACTOR,

            win_score: WIN_SCORE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject geometry the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_width", self.ball_width),
            ("ball_height", self.ball_height),
        ];
        for (name, value) in sizes {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.ball_vx_min < 0.0 || self.ball_vx_min > self.ball_vx_max {
            return Err(ConfigError::invalid(format!(
                "ball x speed bounds [{}, {}] are not an ordered non-negative range",
                self.ball_vx_min, self.ball_vx_max
            )));
        }
        if self.ball_vy_min < 0.0 || self.ball_vy_min > self.ball_vy_max {
            return Err(ConfigError::invalid(format!(
                "ball y speed bounds [{}, {}] are not an ordered non-negative range",
                self.ball_vy_min, self.ball_vy_max
            )));
        }
        if self.paddle_height >= self.bottom_edge() {
            return Err(ConfigError::invalid(format!(
                "paddle height {} does not fit a {} px field",
                self.paddle_height, self.field_height
            )));
        }
        if self.right_goal() <= self.left_goal() {
            return Err(ConfigError::invalid(format!(
                "field offset {} leaves no playing field",
                self.field_offset
            )));
        }
        if self.win_score == 0 {
            return Err(ConfigError::invalid("win_score must be at least 1"));
        }
        Ok(())
    }

    /// Last pixel column
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.field_width - 1.0
    }

    /// Last pixel row (floor)
    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.field_height - 1.0
    }

    /// Ball x below this scores for player 1
    #[inline]
    pub fn left_goal(&self) -> f32 {
        self.field_offset - 1.0
    }

    /// Ball x above this scores for player 2
    #[inline]
    pub fn right_goal(&self) -> f32 {
        self.right_edge() - self.field_offset
    }

    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(self.ball_start_x, self.ball_start_y)
    }

    /// Paddles start vertically centered on the serve line
    pub fn paddle_start_y(&self) -> f32 {
        self.ball_start_y - self.paddle_height / 2.0
    }
}
