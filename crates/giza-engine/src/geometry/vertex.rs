use bytemuck::{Pod, Zeroable};

/// Interleaved mesh vertex: position then flat face color.
///
/// GPU layout contract (must match `pyramid.wgsl`):
/// - stride 24 bytes
/// - `position` (`Float32x3`) at offset 0, shader location 0
/// - `color` (`Float32x3`) at offset 12, shader location 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_and_offsets_match_shader_contract() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::layout().array_stride, 24);
        assert_eq!(Vertex::ATTRS[0].offset, 0);
        assert_eq!(Vertex::ATTRS[1].offset, 12);
    }
}
