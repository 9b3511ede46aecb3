//! Shared coordinate types.

mod viewport;

pub use viewport::Viewport;
