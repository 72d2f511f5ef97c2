//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing (wakeup deadlines on native, whole fixed steps per frame on both)
//! - Keyboard mapping to logical paddle keys

pub mod keys;
pub mod pacing;

pub use keys::key_role_for_code;
pub use pacing::StepClock;

#[cfg(not(target_arch = "wasm32"))]
pub use keys::key_role_for_winit;
#[cfg(not(target_arch = "wasm32"))]
pub use pacing::FramePacer;
