//! Colour model shared by the drawer, the GPU program and the software raster.
//!
//! Scope:
//! - straight-alpha RGBA colour (`Color`)
//! - the left-to-right brightness falloff applied by the vertex stage

pub mod color;
mod shade;

pub use color::Color;
pub use shade::{brightness, BRIGHTNESS_FALLOFF};
