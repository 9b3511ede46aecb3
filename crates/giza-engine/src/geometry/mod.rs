//! CPU-side geometry for the pyramid mesh.
//!
//! Vertices are authored once at startup and never mutated; the render layer
//! uploads them into write-once GPU buffers.

mod mesh;
mod vertex;

pub use mesh::Mesh;
pub use vertex::Vertex;
