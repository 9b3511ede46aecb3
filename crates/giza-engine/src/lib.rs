//! Giza engine crate.
//!
//! This crate owns the platform + GPU runtime pieces plus the math, geometry
//! and animation state behind the rotating pyramid demo.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod geometry;
pub mod anim;
pub mod render;
