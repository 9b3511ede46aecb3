//! GPU rendering subsystem.
//!
//! The pyramid renderer owns its GPU resources (pipeline, buffers, uniform)
//! and issues one indexed draw per frame against the contexts defined here.

mod ctx;
mod pyramid;

pub use ctx::{RenderCtx, RenderTarget};
pub use pyramid::{compose_mvp, PyramidRenderer};
