//! wgpu render backend for the gallery walkthrough.
//!
//! Draws the room's six surfaces with one pipeline, one uniform buffer and
//! one texture bind group per surface, lit by a single point light.
//!
//! # Invariants
//! - Geometry and textures are uploaded once at startup.
//! - The renderer only reads the frame view; it never touches the camera.

mod gpu;
mod shaders;
mod texture;

pub use gpu::{GalleryRenderer, RenderError, surface_texture};
pub use texture::GpuTexture;
