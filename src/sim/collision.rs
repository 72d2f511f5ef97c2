//! Collision detection and response
//!
//! Walls are tested against the clamped ball position; paddles by rectangle
//! overlap. No push-out is applied on contact, so the ball may overlap a
//! paddle for a few steps while it is being redirected.

use std::f32::consts::PI;

use glam::Vec2;

use super::rect::Rect;
use super::state::{Ball, Paddle, Side};
use crate::config::GameConfig;

/// Ball touches the top or bottom bound
#[inline]
pub fn hits_horizontal_wall(ball: &Rect, config: &GameConfig) -> bool {
    ball.y <= 0.0 || ball.y >= config.ball_max_y()
}

/// Wall the ball reached on its way out, if any.
///
/// `Some(Side::Left)` means the left player failed to return the ball.
pub fn exited_through(ball: &Rect, config: &GameConfig) -> Option<Side> {
    if ball.x <= 0.0 {
        Some(Side::Left)
    } else if ball.x >= config.ball_max_x() {
        Some(Side::Right)
    } else {
        None
    }
}

/// Perfectly elastic bounce off a horizontal wall
#[inline]
pub fn reflect_vertical(vel: Vec2) -> Vec2 {
    Vec2::new(vel.x, -vel.y)
}

/// Ball overlaps the paddle (edge contact counts)
#[inline]
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle) -> bool {
    paddle.rect.intersects(&ball.rect)
}

/// New travel angle after the ball strikes a paddle.
///
/// `diff = paddle_center_y - ball_y` (ball top edge). The offset maps
/// linearly onto a half circle facing away from the paddle: zero offset sends
/// the ball straight across, an offset of a full paddle height reaches ±π/2.
pub fn deflection_angle(side: Side, paddle_center_y: f32, ball_y: f32, paddle_height: f32) -> f32 {
    let diff = paddle_center_y - ball_y;
    let t = diff / (2.0 * paddle_height);
    match side {
        Side::Left => -PI * t,
        Side::Right => PI * (t + 1.0),
    }
}

/// Angle for a ball currently touching `paddle`
pub fn paddle_deflection(paddle: &Paddle, ball: &Ball) -> f32 {
    deflection_angle(paddle.side, paddle.center_y(), ball.rect.y, paddle.rect.h)
}
