//! Coordinate and geometry types shared by the drawer, the sinks and the scene.
//!
//! Canonical CPU space is the canvas pixel grid:
//! - origin top-left
//! - +X right, +Y down
//!
//! The vertex stage converts to clip space using the resolution uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
