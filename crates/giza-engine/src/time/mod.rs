//! Frame timing utilities, decoupled from the runtime.
//!
//! One `FrameClock` per window/loop; call `tick()` once per presented frame
//! to obtain a `FrameTime` snapshot.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
