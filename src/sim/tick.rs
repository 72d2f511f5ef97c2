//! Fixed timestep simulation tick
//!
//! One step = position update followed by collision resolution. The elapsed
//! time of every step is the constant `config.dt()`, never a measured delta.

use super::collision::{
    ball_paddle_collision, exited_through, hits_horizontal_wall, paddle_deflection,
    reflect_vertical,
};
use super::input::KeyState;
use super::state::{GameState, Side};
use crate::config::GameConfig;

/// What happened during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Ball bounced off the top or bottom wall
    pub wall_bounce: bool,
    /// Paddle that redirected the ball (last one wins if both fired)
    pub paddle_hit: Option<Side>,
    /// Round ended; holds the side that scored. Ball and paddles stay where
    /// they finished, and the caller owes the round-reset pause before the
    /// next step, which re-centers everything.
    pub round_over: Option<Side>,
}

/// Move paddles from held keys and integrate the ball.
///
/// Up and down are applied independently, up first, so holding both keys
/// leaves the paddle where the down move puts it.
pub fn update_positions(state: &mut GameState, keys: &KeyState, config: &GameConfig) {
    let dt = config.dt();
    let step = config.control_speed * dt;

    for side in [Side::Left, Side::Right] {
        let (up, down) = keys.for_side(side);
        let paddle = state.paddle_mut(side);
        if up {
            paddle.move_up(step);
        }
        if down {
            paddle.move_down(step, config);
        }
    }

    let ball = &mut state.ball;
    ball.rect.x += ball.vel.x * dt;
    ball.rect.y += ball.vel.y * dt;

    // Clamp only along the direction of travel
    if ball.vel.x < 0.0 {
        ball.rect.x = ball.rect.x.max(0.0);
    }
    if ball.vel.x > 0.0 {
        ball.rect.x = ball.rect.x.min(config.ball_max_x());
    }
    if ball.vel.y < 0.0 {
        ball.rect.y = ball.rect.y.max(0.0);
    }
    if ball.vel.y > 0.0 {
        ball.rect.y = ball.rect.y.min(config.ball_max_y());
    }
}

/// Resolve wall bounces, round ends and paddle hits, in that order
pub fn check_collisions(state: &mut GameState, config: &GameConfig) -> TickEvents {
    let mut events = TickEvents::default();

    if hits_horizontal_wall(&state.ball.rect, config) {
        state.ball.vel = reflect_vertical(state.ball.vel);
        events.wall_bounce = true;
        log::trace!("Wall bounce at y={:.1}", state.ball.rect.y);
    }

    if let Some(wall) = exited_through(&state.ball.rect, config) {
        let scorer = wall.opponent();
        state.score.award(scorer);
        state.end_round();
        events.round_over = Some(scorer);
        log::info!(
            "Ball left through the {} wall, {} scores ({})",
            wall.as_str(),
            scorer.as_str(),
            state.score
        );
        return events;
    }

    // Both paddles are tested every step
    for side in [Side::Left, Side::Right] {
        let paddle = *state.paddle(side);
        if ball_paddle_collision(&state.ball, &paddle) {
            let angle = paddle_deflection(&paddle, &state.ball);
            state.ball.redirect(angle, config.ball_speed);
            events.paddle_hit = Some(side);
            log::debug!("{} paddle hit, new angle {:.3} rad", side.as_str(), angle);
        }
    }

    events
}

/// Advance the game state by one fixed step.
///
/// The step after a round end only performs the reset: new ball, centered
/// paddles, nothing moves.
pub fn tick(state: &mut GameState, keys: &KeyState, config: &GameConfig) -> TickEvents {
    state.time_ticks += 1;
    if state.is_round_pending() {
        state.reset_round(config);
        log::debug!("New round, score {}", state.score);
        return TickEvents::default();
    }
    update_positions(state, keys, config);
    check_collisions(state, config)
}
