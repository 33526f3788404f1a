//! Frame timing.
//!
//! The scene itself advances per frame, not per second; timing here feeds
//! diagnostics only. One `FrameClock` lives with the window and is ticked once
//! per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
