//! Transform math shared by the renderer and tests.
//!
//! Convention (documented once, here):
//! - Matrices are 4x4 `f32`, flattened **column-major**: element `(row, col)`
//!   lives at `m[col * 4 + row]`.
//! - Vectors are column vectors on the right: `M * v`.
//! - Products chain right-to-left: in `A * B * v`, `B` is applied first.

mod mat4;

pub use mat4::Mat4;
