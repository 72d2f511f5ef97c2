//! Per-frame geometry for the playfield

use glam::Vec2;

use super::shapes;
use super::vertex::{FOREGROUND, Vertex};
use crate::sim::GameState;

/// Both paddles and the ball as filled quads, in game pixels
pub fn scene_vertices(state: &GameState) -> Vec<Vertex> {
    [&state.left.rect, &state.right.rect, &state.ball.rect]
        .into_iter()
        .flat_map(|r| shapes::rect(r, FOREGROUND))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_scene_has_three_quads() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 3);
        let vertices = scene_vertices(&state);
        assert_eq!(vertices.len(), 18);

        // Last quad is the ball
        let ball_min = vertices[12..].iter().map(Vertex::point).reduce(Vec2::min).unwrap();
        assert_eq!(ball_min, Vec2::new(state.ball.rect.x, state.ball.rect.y));
    }
}
