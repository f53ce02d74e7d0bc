use gallery_common::config::{FAR_PLANE, LIGHT_POSITION, NEAR_PLANE};
use gallery_kernel::Camera;
use glam::{Mat4, Vec3};

/// Everything a renderer reads from the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_position: Vec3,
    /// Camera position, used for specular lighting.
    pub view_position: Vec3,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl FrameView {
    pub fn from_camera(camera: &Camera, aspect: f32) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect, NEAR_PLANE, FAR_PLANE),
            light_position: LIGHT_POSITION,
            view_position: camera.position(),
            zoom: camera.zoom(),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a [`FrameView`] and produces output. It never touches
/// the camera itself.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &FrameView) -> Self::Output;
}

/// Text renderer for headless runs.
///
/// Describes the frame instead of drawing it.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView) -> String {
        let eye = frame.view_position;
        // Third row of the view matrix is the camera's backward axis.
        let row = frame.view.row(2);
        let forward = -Vec3::new(row.x, row.y, row.z);
        let light = frame.light_position;

        let mut out = String::new();
        out.push_str("=== Gallery Frame ===\n");
        out.push_str(&format!("Eye: ({:.2}, {:.2}, {:.2})\n", eye.x, eye.y, eye.z));
        out.push_str(&format!(
            "Looking: ({:.2}, {:.2}, {:.2})\n",
            forward.x, forward.y, forward.z
        ));
        out.push_str(&format!("FOV: {:.1} deg\n", frame.zoom));
        out.push_str(&format!(
            "Light: ({:.1}, {:.1}, {:.1}) distance={:.2}\n",
            light.x,
            light.y,
            light.z,
            eye.distance(light)
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_common::MoveDirection;

    #[test]
    fn frame_view_tracks_camera() {
        let mut camera = Camera::default();
        camera.move_in(MoveDirection::Forward, 1.0);
        let frame = FrameView::from_camera(&camera, 16.0 / 9.0);
        assert_eq!(frame.view_position, camera.position());
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.light_position, Vec3::new(0.0, 4.5, 0.0));
        assert_eq!(frame.zoom, 45.0);
    }

    #[test]
    fn view_projection_keeps_centre_on_axis() {
        let camera = Camera::default();
        let frame = FrameView::from_camera(&camera, 16.0 / 9.0);
        let ahead = camera.position() + camera.front() * 10.0;
        let clip = frame.view_projection() * ahead.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn debug_renderer_describes_default_frame() {
        let frame = FrameView::from_camera(&Camera::default(), 16.0 / 9.0);
        let output = DebugTextRenderer::new().render(&frame);
        assert!(output.contains("Eye: (0.00, 1.50, 5.00)"));
        assert!(output.contains("0.00, -1.00)"));
        assert!(output.contains("FOV: 45.0 deg"));
    }

    #[test]
    fn debug_renderer_writes_one_line_per_field() {
        let frame = FrameView::from_camera(&Camera::default(), 16.0 / 9.0);
        let output = DebugTextRenderer::new().render(&frame);
        assert!(output.starts_with("=== Gallery Frame ===\n"));
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 5);
        assert!(output.lines().last().is_some_and(|l| l.starts_with("Light: (0.0, 4.5, 0.0)")));
    }
}
