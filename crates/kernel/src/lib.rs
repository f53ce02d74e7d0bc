//! Walkthrough kernel: the camera model and the per-frame update step.
//!
//! # Invariants
//! - `front`, `right` and `up` form an orthonormal right-handed basis derived
//!   only from yaw and pitch.
//! - Pitch stays within +/-89 degrees, zoom within [1, 45].
//! - Each frame applies input in a fixed order: look, zoom, move, clamp.

pub mod camera;
pub mod walk;

pub use camera::Camera;
pub use walk::Walkthrough;
