//! Contract between the window runtime and the application.
//!
//! The runtime owns the event loop and the GPU; the app only sees an
//! [`App`] callback per frame with a [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
