//! Animation state.
//!
//! One mutable state object per scene, advanced once per frame by the render
//! loop and adjusted by UI callbacks in between frames. All callers run on
//! the event-loop thread, so the type is plain data with no locking; a port
//! to a threaded host would need to make the UI-written fields atomic.

mod state;

pub use state::AnimationState;
