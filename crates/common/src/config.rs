//! Fixed configuration of the gallery. None of this is runtime-configurable.

use glam::Vec3;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
pub const WINDOW_TITLE: &str = "Art Gallery";

/// Camera spawn point, standing just inside the front wall.
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 1.5, 5.0);
pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 4.5, 0.0);

/// Half the room's width and depth; the room spans [-5, 5] in X and Z.
pub const ROOM_HALF_EXTENT: f32 = 5.0;
/// The room spans [0, 5] in Y.
pub const ROOM_HEIGHT: f32 = 5.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
pub const CLEAR_COLOR: [f64; 3] = [0.1, 0.1, 0.1];

/// Degrees. -90 faces down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_ZOOM: f32 = 45.0;
/// World units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees per pixel of cursor travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 45.0;
pub const PITCH_LIMIT: f32 = 89.0;

/// Number of framed pictures hung in the gallery.
pub const PICTURE_COUNT: u8 = 20;

pub fn aspect_ratio() -> f32 {
    WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32
}
