//! Input sampling: raw device state polled once per frame.
//!
//! The window layer only records state into [`RawInput`]. Once per frame the
//! [`InputSampler`] pulls that state and produces an [`InputSample`] for the
//! camera.
//!
//! # Invariants
//! - The first cursor sample reports a zero delta.
//! - Vertical look deltas are reported with "up" positive.
//! - `delta_time` is never negative.

pub mod key;
pub mod sampler;

pub use key::Key;
pub use sampler::{InputSample, InputSampler, RawInput};

pub fn crate_info() -> &'static str {
    "gallery-input v0.1.0"
}
