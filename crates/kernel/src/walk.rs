use crate::camera::Camera;
use gallery_common::RoomBounds;
use gallery_input::InputSample;

/// The camera together with the room it is confined to.
///
/// Owned by the frame loop and passed by reference to input handling and
/// rendering; there is no ambient camera.
#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    camera: Camera,
    bounds: RoomBounds,
}

impl Walkthrough {
    pub fn new(camera: Camera, bounds: RoomBounds) -> Self {
        Self { camera, bounds }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    /// Apply one frame of input: look, zoom, move, then clamp to the room.
    pub fn step(&mut self, sample: &InputSample) {
        self.camera.update_orientation(sample.look.x, sample.look.y);
        self.camera.update_zoom(sample.scroll);
        for direction in &sample.moves {
            self.camera.move_in(*direction, sample.delta_time);
        }

        let moved = self.camera.position();
        let clamped = self.bounds.clamp(moved);
        if clamped != moved {
            tracing::trace!(?moved, ?clamped, "camera held at room bounds");
        }
        self.camera.set_position(clamped);

        tracing::trace!(
            position = ?clamped,
            yaw = self.camera.yaw(),
            pitch = self.camera.pitch(),
            zoom = self.camera.zoom(),
            "frame step"
        );
    }
}
