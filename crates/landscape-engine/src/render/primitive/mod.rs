//! Primitive drawer and the sinks it draws into.
//!
//! [`PrimitiveDrawer`] turns triangles, rectangles, circles, line segments and
//! stars into vertex runs. A [`DrawSink`] receives them:
//! - [`FrameBatch`] records a frame for [`PrimitiveRenderer`] (wgpu)
//! - [`Raster`] rasterises on the CPU (snapshots, tests)
//! - [`DrawRecorder`] keeps the calls for inspection

mod batch;
mod drawer;
mod raster;
mod record;
mod renderer;
mod sink;

pub use batch::{DrawOp, FrameBatch};
pub use drawer::{PrimitiveDrawer, DEFAULT_CIRCLE_SEGMENTS};
pub use raster::Raster;
pub use record::{DrawEvent, DrawRecorder, RecordedDraw};
pub use renderer::PrimitiveRenderer;
pub use sink::{DrawSink, Topology};
