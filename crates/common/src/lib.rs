//! Shared types and fixed configuration for the gallery walkthrough.

pub mod config;
mod types;

pub use types::{MoveDirection, RoomBounds};

pub fn crate_info() -> &'static str {
    "gallery-common v0.1.0"
}
