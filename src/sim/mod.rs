//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (`GameConfig::dt`)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{deflection_angle, exited_through, hits_horizontal_wall};
pub use input::{KeyRole, KeyState};
pub use rect::Rect;
pub use state::{Ball, GameState, Paddle, Score, Side};
pub use tick::{TickEvents, check_collisions, tick, update_positions};
