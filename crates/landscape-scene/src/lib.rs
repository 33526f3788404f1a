//! Procedural night landscape.
//!
//! Mountains with snow caps, a shimmering river, ground with bushes, a house,
//! five trees, a moon, stars and falling snow, drawn every frame through a
//! [`PrimitiveDrawer`](landscape_engine::render::primitive::PrimitiveDrawer).
//!
//! [`AnimationLoop::frame`] is the per-refresh entry point. It works with any
//! draw sink: the GPU batch in a window, the software raster for snapshots.

pub mod animation;
pub mod composer;
pub mod config;
pub mod context;
pub mod fractal;
pub mod objects;
pub mod rng;
pub mod snow;

pub use animation::{AnimationLoop, LoopState};
pub use composer::{compose, Layer, PAINT_ORDER};
pub use config::SceneConfig;
pub use context::SceneContext;
pub use rng::SceneRng;
pub use snow::{SnowField, Snowflake};
