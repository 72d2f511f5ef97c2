//! Duel Pong - two-player keyboard Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, update and collision steps)
//! - `config`: Tunable game configuration (window size, speeds, frame rate)
//! - `renderer`: WebGPU rendering of paddles and ball
//! - `platform`: Frame pacing and keyboard mapping for native and browser

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, LaunchMode};

use glam::Vec2;

/// Default tuning constants
pub mod consts {
    /// Portrait window (the default build variant)
    pub const WINDOW_WIDTH: f32 = 600.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;

    /// Landscape window variant
    pub const LANDSCAPE_WIDTH: f32 = 800.0;
    pub const LANDSCAPE_HEIGHT: f32 = 600.0;

    /// Paddle size in pixels
    pub const PADDLE_WIDTH: f32 = 7.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;

    /// Ball is a square of this side length
    pub const BALL_SIZE: f32 = 15.0;
    /// Ball speed (pixels/s), constant for the whole round
    pub const BALL_SPEED: f32 = 700.0;

    /// Target frame rate; every step advances exactly 1/FRAME_RATE seconds
    pub const FRAME_RATE: f32 = 300.0;
    /// Paddle speed while a movement key is held (pixels/s)
    pub const CONTROL_SPEED: f32 = 600.0;

    /// Pause after the ball leaves through a side wall
    pub const ROUND_RESET_DELAY_MS: u64 = 1000;
}

/// Map a travel angle to a velocity of the given speed.
///
/// Screen coordinates: +x right, +y down. An angle of 0 travels right,
/// π travels left.
#[inline]
pub fn angle_to_velocity(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_to_velocity_axes() {
        let right = angle_to_velocity(10.0, 0.0);
        assert!((right.x - 10.0).abs() < 1e-5);
        assert!(right.y.abs() < 1e-5);

        let left = angle_to_velocity(10.0, PI);
        assert!((left.x + 10.0).abs() < 1e-5);
        assert!(left.y.abs() < 1e-4);
    }

    #[test]
    fn test_angle_to_velocity_preserves_speed() {
        for i in 0..16 {
            let angle = i as f32 * PI / 8.0;
            let v = angle_to_velocity(700.0, angle);
            assert!((v.length() - 700.0).abs() < 1e-2);
        }
    }
}
