//! Keyboard snapshot consumed by the position update

use super::state::Side;

/// Logical role of a movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl KeyRole {
    pub const ALL: [KeyRole; 4] = [
        KeyRole::LeftUp,
        KeyRole::LeftDown,
        KeyRole::RightUp,
        KeyRole::RightDown,
    ];

    pub fn side(self) -> Side {
        match self {
            KeyRole::LeftUp | KeyRole::LeftDown => Side::Left,
            KeyRole::RightUp | KeyRole::RightDown => Side::Right,
        }
    }
}

/// Which movement keys are held right now. Polled once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl KeyState {
    pub fn is_held(&self, role: KeyRole) -> bool {
        match role {
            KeyRole::LeftUp => self.left_up,
            KeyRole::LeftDown => self.left_down,
            KeyRole::RightUp => self.right_up,
            KeyRole::RightDown => self.right_down,
        }
    }

    /// Record a press (`true`) or release (`false`)
    pub fn set(&mut self, role: KeyRole, held: bool) {
        match role {
            KeyRole::LeftUp => self.left_up = held,
            KeyRole::LeftDown => self.left_down = held,
            KeyRole::RightUp => self.right_up = held,
            KeyRole::RightDown => self.right_down = held,
        }
    }

    /// (up, down) for one paddle
    pub fn for_side(&self, side: Side) -> (bool, bool) {
        match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        }
    }

    /// Drop every held key (focus loss)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_query() {
        let mut keys = KeyState::default();
        for role in KeyRole::ALL {
            assert!(!keys.is_held(role));
        }

        keys.set(KeyRole::RightDown, true);
        assert!(keys.is_held(KeyRole::RightDown));
        assert_eq!(keys.for_side(Side::Right), (false, true));
        assert_eq!(keys.for_side(Side::Left), (false, false));

        keys.set(KeyRole::RightDown, false);
        assert!(!keys.is_held(KeyRole::RightDown));
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState {
            left_up: true,
            left_down: true,
            right_up: true,
            right_down: false,
        };
        keys.release_all();
        assert_eq!(keys, KeyState::default());
    }

    #[test]
    fn test_role_sides() {
        assert_eq!(KeyRole::LeftUp.side(), Side::Left);
        assert_eq!(KeyRole::RightDown.side(), Side::Right);
    }
}
