use gallery_common::MoveDirection;
use serde::{Deserialize, Serialize};

/// The keys the walkthrough polls each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    A,
    D,
    Escape,
}

impl Key {
    /// Movement keys in the order their moves are applied within a frame.
    pub const MOVEMENT: [Key; 4] = [Key::W, Key::S, Key::A, Key::D];

    pub fn direction(self) -> Option<MoveDirection> {
        match self {
            Key::W => Some(MoveDirection::Forward),
            Key::S => Some(MoveDirection::Backward),
            Key::A => Some(MoveDirection::Left),
            Key::D => Some(MoveDirection::Right),
            Key::Escape => None,
        }
    }

    /// Parse a movement letter such as `w` or `D`.
    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            's' => Some(Key::S),
            'a' => Some(Key::A),
            'd' => Some(Key::D),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_movement_key_maps_to_one_direction() {
        let dirs: Vec<_> = Key::MOVEMENT.iter().filter_map(|k| k.direction()).collect();
        assert_eq!(
            dirs,
            vec![
                MoveDirection::Forward,
                MoveDirection::Backward,
                MoveDirection::Left,
                MoveDirection::Right,
            ]
        );
    }

    #[test]
    fn escape_is_not_movement() {
        assert_eq!(Key::Escape.direction(), None);
    }

    #[test]
    fn parse_letters() {
        assert_eq!(Key::from_char('W'), Some(Key::W));
        assert_eq!(Key::from_char('d'), Some(Key::D));
        assert_eq!(Key::from_char('x'), None);
    }
}
