//! Game state and core simulation types
//!
//! One `GameState` is created at startup and mutated in place by every step.
//! The ball is rebuilt from scratch on each round reset. A round that has
//! just ended keeps its final positions until the next step performs the reset.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::angle_to_velocity;
use crate::config::{GameConfig, LaunchMode};

/// Which wall a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1 (W/S)
    Left,
    /// Player 2 (Up/Down)
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A player's paddle. Only `rect.y` changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
}

impl Paddle {
    /// Flush against its wall, vertically centered
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => config.window_width - config.paddle_width,
        };
        let y = (config.window_height - config.paddle_height) / 2.0;
        Self {
            side,
            rect: Rect::new(x, y, config.paddle_width, config.paddle_height),
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.rect.y + self.rect.h / 2.0
    }

    /// Move up by `amount`, stopping at the top wall
    pub fn move_up(&mut self, amount: f32) {
        self.rect.y = (self.rect.y - amount).max(0.0);
    }

    /// Move down by `amount`, stopping at the bottom wall
    pub fn move_down(&mut self, amount: f32, config: &GameConfig) {
        self.rect.y = (self.rect.y + amount).min(config.paddle_max_y());
    }
}

/// The ball: a square plus a velocity in pixels/s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Ball {
    /// Fresh ball at the window center, launched according to `config.launch_mode`
    pub fn launch(config: &GameConfig, rng: &mut Pcg32) -> Self {
        // Exactly 0 or π: the serve is always horizontal
        let u: f32 = rng.random();
        let mut angle = PI * u.round();

        if let LaunchMode::Spread { max_angle } = config.launch_mode {
            let max_angle = max_angle.abs();
            if max_angle.is_finite() && max_angle > 0.0 {
                angle += rng.random_range(-max_angle..=max_angle);
            }
        }

        Self {
            rect: Rect::new(
                config.window_width / 2.0,
                config.window_height / 2.0,
                config.ball_size,
                config.ball_size,
            ),
            vel: angle_to_velocity(config.ball_speed, angle),
        }
    }

    /// Replace the velocity with one pointing along `angle` at `speed`
    pub fn redirect(&mut self, angle: f32, speed: f32) {
        self.vel = angle_to_velocity(speed, angle);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Points won by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.left + self.right
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.left, self.right)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Player 1
    pub left: Paddle,
    /// Player 2
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Steps simulated so far
    pub time_ticks: u64,
    /// A round ended on the last step; the next step resets instead of moving
    round_pending: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with centered paddles and a freshly launched ball
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config.validate());
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::launch(config, &mut rng);
        Self {
            seed,
            left: Paddle::new(Side::Left, config),
            right: Paddle::new(Side::Right, config),
            ball,
            score: Score::default(),
            time_ticks: 0,
            round_pending: false,
            rng,
        }
    }

    /// Return both paddles to their starting positions
    pub fn init_paddles(&mut self, config: &GameConfig) {
        self.left = Paddle::new(Side::Left, config);
        self.right = Paddle::new(Side::Right, config);
    }

    /// Replace the ball with a newly launched one
    pub fn init_ball(&mut self, config: &GameConfig) {
        self.ball = Ball::launch(config, &mut self.rng);
    }

    /// Start a new round: new ball, centered paddles
    pub fn reset_round(&mut self, config: &GameConfig) {
        self.init_ball(config);
        self.init_paddles(config);
        self.round_pending = false;
    }

    /// Mark the round as over; positions stay put until the next step
    pub fn end_round(&mut self) {
        self.round_pending = true;
    }

    /// Whether the next step starts a new round
    pub fn is_round_pending(&self) -> bool {
        self.round_pending
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddles_start_centered_against_walls() {
        let config = GameConfig::landscape();
        let state = GameState::new(&config, 1);

        assert_eq!(state.left.rect, Rect::new(0.0, 250.0, 7.0, 100.0));
        assert_eq!(state.right.rect, Rect::new(793.0, 250.0, 7.0, 100.0));
        assert_eq!(state.left.center_y(), 300.0);
    }

    #[test]
    fn test_paddle_moves_clamp_to_walls() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(Side::Left, &config);

        paddle.move_up(10_000.0);
        assert_eq!(paddle.rect.y, 0.0);

        paddle.move_down(10_000.0, &config);
        assert_eq!(paddle.rect.y, config.paddle_max_y());
    }

    #[test]
    fn test_ball_launches_from_center_at_constant_speed() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 99);

        assert_eq!(state.ball.rect.x, config.window_width / 2.0);
        assert_eq!(state.ball.rect.y, config.window_height / 2.0);
        assert_eq!(state.ball.rect.w, config.ball_size);
        assert!((state.ball.speed() - config.ball_speed).abs() < 1e-2);
    }

    #[test]
    fn test_horizontal_launch_has_exactly_two_outcomes() {
        let config = GameConfig::default();
        let mut went_left = false;
        let mut went_right = false;

        for seed in 0..64 {
            let state = GameState::new(&config, seed);
            let vel = state.ball.vel;
            assert!(vel.y.abs() < 1e-3, "serve must be horizontal, got {:?}", vel);
            assert!((vel.x.abs() - config.ball_speed).abs() < 1e-3);
            if vel.x > 0.0 {
                went_right = true;
            } else {
                went_left = true;
            }
        }

        assert!(went_left && went_right, "both serve directions should occur");
    }

    #[test]
    fn test_same_seed_same_serves() {
        let config = GameConfig::default();
        let mut a = GameState::new(&config, 2024);
        let mut b = GameState::new(&config, 2024);

        for _ in 0..10 {
            assert_eq!(a.ball.vel, b.ball.vel);
            a.init_ball(&config);
            b.init_ball(&config);
        }
    }

    #[test]
    fn test_spread_launch_stays_within_cone() {
        let max_angle = 0.4;
        let config = GameConfig {
            launch_mode: LaunchMode::Spread { max_angle },
            ..Default::default()
        };

        for seed in 0..64 {
            let state = GameState::new(&config, seed);
            let vel = state.ball.vel;
            let off_axis = (vel.y.abs() / vel.x.abs()).atan();
            assert!(off_axis <= max_angle + 1e-4);
            assert!((vel.length() - config.ball_speed).abs() < 1e-2);
        }
    }

    #[test]
    fn test_spread_launch_tolerates_negative_or_zero_angle() {
        for max_angle in [-0.3_f32, 0.0] {
            let config = GameConfig {
                launch_mode: LaunchMode::Spread { max_angle },
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(11);
            for _ in 0..32 {
                let ball = Ball::launch(&config, &mut rng);
                let off_axis = (ball.vel.y.abs() / ball.vel.x.abs()).atan();
                assert!(off_axis <= max_angle.abs() + 1e-4);
            }
        }
    }

    #[test]
    fn test_end_round_waits_for_reset() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 5);
        state.ball.rect.x = 0.0;

        state.end_round();
        assert!(state.is_round_pending());
        assert_eq!(state.ball.rect.x, 0.0);

        state.reset_round(&config);
        assert!(!state.is_round_pending());
        assert_eq!(state.ball.rect.x, config.window_width / 2.0);
    }

    #[test]
    fn test_reset_round_recenters_everything() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 5);
        state.left.move_up(120.0);
        state.right.move_down(120.0, &config);
        state.ball.rect.x = 3.0;
        state.ball.rect.y = 17.0;

        state.reset_round(&config);

        assert_eq!(state.left, Paddle::new(Side::Left, &config));
        assert_eq!(state.right, Paddle::new(Side::Right, &config));
        assert_eq!(state.ball.rect.x, config.window_width / 2.0);
        assert_eq!(state.ball.rect.y, config.window_height / 2.0);
    }

    #[test]
    fn test_score_award_and_display() {
        let mut score = Score::default();
        score.award(Side::Left);
        score.award(Side::Right);
        score.award(Side::Right);
        assert_eq!(score.get(Side::Left), 1);
        assert_eq!(score.get(Side::Right), 2);
        assert_eq!(score.rounds_played(), 3);
        assert_eq!(score.to_string(), "1 : 2");
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
    }
}
