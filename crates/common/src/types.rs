use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A camera translation direction relative to the current view basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
    ];
}

/// Axis-aligned position limits that stand in for the room's walls.
///
/// Clamping saturates each axis independently. There is no collision
/// response: a camera pushed into a wall simply stays on the bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    min: Vec3,
    max: Vec3,
}

impl RoomBounds {
    /// Walkable interior of the gallery room.
    pub const INTERIOR: RoomBounds = RoomBounds {
        min: Vec3::new(-4.5, 0.5, -4.5),
        max: Vec3::new(4.5, 4.5, 4.5),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Saturate `position` into the bounds. Never panics, even for bounds
    /// deserialized with swapped corners; those collapse onto `max`.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        position.max(self.min).min(self.max)
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.cmpge(self.min).all() && position.cmple(self.max).all()
    }
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self::INTERIOR
    }
}
