//! Landscape engine crate.
//!
//! Platform, GPU and drawing pieces the scene is built on: the window runtime,
//! the wgpu device, the shader program builder and the primitive drawer with
//! its sinks.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
