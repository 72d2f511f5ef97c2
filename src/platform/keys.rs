//! Physical key → paddle role mapping
//!
//! Player 1 uses W/S, player 2 the arrow keys.

use crate::sim::KeyRole;

/// Map a DOM `KeyboardEvent.code` value to a paddle role
pub fn key_role_for_code(code: &str) -> Option<KeyRole> {
    match code {
        "KeyW" => Some(KeyRole::LeftUp),
        "KeyS" => Some(KeyRole::LeftDown),
        "ArrowUp" => Some(KeyRole::RightUp),
        "ArrowDown" => Some(KeyRole::RightDown),
        _ => None,
    }
}

/// Map a winit physical key to a paddle role
#[cfg(not(target_arch = "wasm32"))]
pub fn key_role_for_winit(key: winit::keyboard::PhysicalKey) -> Option<KeyRole> {
    use winit::keyboard::{KeyCode, PhysicalKey};

    match key {
        PhysicalKey::Code(KeyCode::KeyW) => Some(KeyRole::LeftUp),
        PhysicalKey::Code(KeyCode::KeyS) => Some(KeyRole::LeftDown),
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(KeyRole::RightUp),
        PhysicalKey::Code(KeyCode::ArrowDown) => Some(KeyRole::RightDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_codes() {
        assert_eq!(key_role_for_code("KeyW"), Some(KeyRole::LeftUp));
        assert_eq!(key_role_for_code("KeyS"), Some(KeyRole::LeftDown));
        assert_eq!(key_role_for_code("ArrowUp"), Some(KeyRole::RightUp));
        assert_eq!(key_role_for_code("ArrowDown"), Some(KeyRole::RightDown));
        assert_eq!(key_role_for_code("Space"), None);
        // Layout-independent codes only, not key values
        assert_eq!(key_role_for_code("w"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_winit_keys() {
        use winit::keyboard::{KeyCode, PhysicalKey};

        assert_eq!(
            key_role_for_winit(PhysicalKey::Code(KeyCode::KeyW)),
            Some(KeyRole::LeftUp)
        );
        assert_eq!(
            key_role_for_winit(PhysicalKey::Code(KeyCode::ArrowDown)),
            Some(KeyRole::RightDown)
        );
        assert_eq!(key_role_for_winit(PhysicalKey::Code(KeyCode::KeyA)), None);
    }
}
