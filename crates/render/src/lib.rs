//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the camera, never mutate it.
//! - Room geometry is static and built once.
//!
//! The GPU backend lives in `gallery-render-wgpu`; [`DebugTextRenderer`]
//! implements the same trait for headless tools and tests.

pub mod renderer;
pub mod room;

pub use renderer::{DebugTextRenderer, FrameView, Renderer};
pub use room::{RoomMesh, RoomVertex, Surface};

pub fn crate_info() -> &'static str {
    "gallery-render v0.1.0"
}
