//! Rendering subsystem.
//!
//! `program` builds the solid-colour shader program; `primitive` turns shapes
//! into draws and hands them to a sink (GPU batch, software raster or
//! recorder).
//!
//! Convention:
//! - CPU geometry is in canvas pixels (top-left origin, +Y down).
//! - The vertex stage converts to clip space using the resolution uniform.

mod ctx;
pub mod primitive;
pub mod program;

pub use ctx::{RenderCtx, RenderTarget};
