//! Application-facing contracts: the `App` trait and per-frame contexts.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
