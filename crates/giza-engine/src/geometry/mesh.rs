use super::Vertex;

// Face colors, in the fixed authoring order below.
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

const APEX: [f32; 3] = [0.0, 0.8, 0.0];

/// Indexed triangle-list mesh with 16-bit indices.
///
/// Invariant: every index is less than `vertices.len()`. Checked at
/// construction; the mesh is immutable afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Mesh {
    fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "mesh index out of range"
        );
        Self { vertices, indices }
    }

    /// The demo pyramid: unit-ish square base at y=0, apex at y=0.8.
    ///
    /// The base shares its 4 corner vertices (two triangles, green); each of
    /// the 4 side triangles carries its own 3 vertices so it can hold a flat
    /// per-face color. 16 vertices, 18 indices.
    pub fn pyramid() -> Self {
        let base = [
            [-0.5, 0.0, -0.5],
            [0.5, 0.0, -0.5],
            [0.5, 0.0, 0.5],
            [-0.5, 0.0, 0.5],
        ];

        let vertices = vec![
            // base quad (shared corners)
            Vertex::new(base[0], GREEN),
            Vertex::new(base[1], GREEN),
            Vertex::new(base[2], GREEN),
            Vertex::new(base[3], GREEN),
            // front face (+Z)
            Vertex::new(APEX, RED),
            Vertex::new(base[3], RED),
            Vertex::new(base[2], RED),
            // right face (+X)
            Vertex::new(APEX, BLUE),
            Vertex::new(base[2], BLUE),
            Vertex::new(base[1], BLUE),
            // back face (-Z)
            Vertex::new(APEX, YELLOW),
            Vertex::new(base[1], YELLOW),
            Vertex::new(base[0], YELLOW),
            // left face (-X)
            Vertex::new(APEX, MAGENTA),
            Vertex::new(base[0], MAGENTA),
            Vertex::new(base[3], MAGENTA),
        ];

        let indices = vec![
            0, 1, 2, 0, 2, 3, // base
            4, 5, 6, // front
            7, 8, 9, // right
            10, 11, 12, // back
            13, 14, 15, // left
        ];

        Self::new(vertices, indices)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of indices for the draw call.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pyramid invariants ────────────────────────────────────────────────

    #[test]
    fn pyramid_counts() {
        let m = Mesh::pyramid();
        assert_eq!(m.vertices().len(), 16);
        assert_eq!(m.indices().len(), 18);
        assert_eq!(m.index_count(), 18);
    }

    #[test]
    fn every_index_in_range() {
        let m = Mesh::pyramid();
        let n = m.vertices().len() as u16;
        assert!(m.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn base_is_flat_and_green() {
        let m = Mesh::pyramid();
        for v in &m.vertices()[0..4] {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.color, GREEN);
        }
    }

    #[test]
    fn each_side_face_has_apex_and_flat_color() {
        let m = Mesh::pyramid();
        let expected = [RED, BLUE, YELLOW, MAGENTA];
        for (face, color) in expected.iter().enumerate() {
            let verts = &m.vertices()[4 + face * 3..4 + face * 3 + 3];
            assert_eq!(verts[0].position, APEX);
            assert!(verts.iter().all(|v| v.color == *color));
        }
    }

    #[test]
    fn base_spans_unit_square() {
        let m = Mesh::pyramid();
        for v in &m.vertices()[0..4] {
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[2].abs(), 0.5);
        }
    }
}
