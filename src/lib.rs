//! Micro Pong - tick-driven Pong core for a 128x32 bitmap display
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, session control)
//! - `config`: Data-driven field geometry and game balance
//! - `error`: Errors for the fallible edges (config loading)
//!
//! Rendering, button polling and the menu loop live outside this crate; they
//! feed [`sim::TickInput`] in and read the [`sim::Session`] back out.

pub mod config;
pub mod error;
pub mod sim;

pub use config::Config;
pub use error::ConfigError;

/// Reference geometry and tuning of the original board
pub mod consts {
    /// Display size in pixels
    pub const FIELD_WIDTH: f32 = 128.0;
    pub const FIELD_HEIGHT: f32 = 32.0;
    /// Pixels from the screen edge to the playing field
    pub const FIELD_OFFSET: f32 = 16.0;

    /// Paddle box in pixels
    pub const PADDLE_WIDTH: f32 = 4.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Human paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 1.0;

    /// Ball box in pixels
    pub const BALL_WIDTH: f32 = 2.0;
    pub const BALL_HEIGHT: f32 = 2.0;
    /// Serve point (field center)
    pub const BALL_START_X: f32 = 63.0;
    pub const BALL_START_Y: f32 = 15.0;
    pub const BALL_START_VX: f32 = 2.0;
    pub const BALL_START_VY: f32 = 0.0;
    /// Per-axis speed bounds
    pub const BALL_VX_MIN: f32 = 1.0;
    pub const BALL_VX_MAX: f32 = 2.5;
    pub const BALL_VY_MIN: f32 = 0.0;
    pub const BALL_VY_MAX: f32 = 1.5;

    /// Maximum deflection off a paddle (degrees from horizontal)
    pub const MAX_REFLECT_ANGLE: f32 = 45.0;

    /// AI look-ahead distance (pixels, measured from the AI paddle)
    pub const AI_LOOK_DIST: f32 = 25.0 + FIELD_OFFSET;
    /// AI trajectory simulation depth (steps)
    pub const AI_PREDICT_DEPTH: u32 = 10;
    /// AI chase multiplier applied to the ball's vertical speed
    pub const AI_SPEED_FACTOR: f32 = 1.2;

    /// Points needed to win
    pub const WIN_SCORE: u8 = 3;
}

/// Sign of a number, with zero counted as positive
#[inline]
pub fn sign(num: f32) -> f32 {
    if num >= 0.0 { 1.0 } else { -1.0 }
}

/// Linearly map `v` from `[in_start, in_end]` onto `[out_start, out_end]`
///
/// Not clamped: values outside the input range extrapolate.
#[inline]
pub fn map_range(v: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    out_start + ((out_end - out_start) / (in_end - in_start)) * (v - in_start)
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_zero_is_positive() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(-0.0), 1.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        // Reversed output range
        assert_eq!(map_range(0.0, 0.0, 10.0, 225.0, 135.0), 225.0);
        assert_eq!(map_range(10.0, 0.0, 10.0, 225.0, 135.0), 135.0);
        // Extrapolates past the input range
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((deg_to_rad(45.0) - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
