//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single landscape window, and wires it
//! to the GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::dpi::LogicalSize;
