use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

/// 4x4 transform matrix, flattened column-major (`m[col * 4 + row]`).
///
/// The layout matches what WGSL expects for a `mat4x4<f32>` uniform, so a
/// `Mat4` can be uploaded with `bytemuck::bytes_of` without reshuffling.
///
/// Values are produced fresh by the named constructors below and never
/// mutated in place.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Element accessor by `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    /// Raw column-major contents.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Symmetric perspective projection (right-handed view space, looking
    /// down -Z), with `f = 1 / tan(fov_y / 2)`:
    ///
    /// ```text
    /// col 0: [ f/aspect  0  0                    0 ]
    /// col 1: [ 0         f  0                    0 ]
    /// col 2: [ 0         0  (far+near)/(near-far)  -1 ]
    /// col 3: [ 0         0  (2*far*near)/(near-far) 0 ]
    /// ```
    ///
    /// Preconditions: `aspect > 0`, `0 < near < far`. Violations are a
    /// programmer error: debug builds assert, release builds return the
    /// identity instead of a degenerate (non-invertible) matrix.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(aspect > 0.0, "perspective: aspect must be positive");
        debug_assert!(
            near > 0.0 && near < far,
            "perspective: requires 0 < near < far"
        );
        if !(aspect > 0.0) || !(near > 0.0 && near < far) {
            return Self::IDENTITY;
        }

        let f = 1.0 / (fov_y * 0.5).tan();
        let range_inv = 1.0 / (near - far);

        let mut m = [0.0f32; 16];
        m[0] = f / aspect;
        m[5] = f;
        m[10] = (far + near) * range_inv;
        m[11] = -1.0;
        m[14] = 2.0 * far * near * range_inv;
        Mat4 { m }
    }

    /// Right-hand rotation about +Y, in homogeneous form.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0] = c;
        m[2] = -s;
        m[8] = s;
        m[10] = c;
        Mat4 { m }
    }

    /// Translation along Y only.
    pub fn translate_y(y: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[13] = y;
        Mat4 { m }
    }

    /// Translation along Z only.
    pub fn translate_z(z: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[14] = z;
        Mat4 { m }
    }

    /// Uniform scale.
    pub fn scale(s: f32) -> Self {
        let mut m = [0.0f32; 16];
        m[0] = s;
        m[5] = s;
        m[10] = s;
        m[15] = 1.0;
        Mat4 { m }
    }

    /// Applies the matrix to a column vector.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for row in 0..4 {
            out[row] = self.m[row] * v[0]
                + self.m[4 + row] * v[1]
                + self.m[8 + row] * v[2]
                + self.m[12 + row] * v[3];
        }
        out
    }
}

/// Matrix product `a * b` under the column-major convention: column `col` of
/// the result is `a` applied to column `col` of `b`. Not commutative — the
/// rightmost factor is applied first to object-space points.
impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                m[col * 4 + row] = acc;
            }
        }
        Mat4 { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_4, PI, TAU};

    fn assert_mat_near(a: Mat4, b: Mat4, eps: f32) {
        for i in 0..16 {
            assert_abs_diff_eq!(a.as_array()[i], b.as_array()[i], epsilon = eps);
        }
    }

    // ── identity / rotation ───────────────────────────────────────────────

    #[test]
    fn rotation_zero_is_identity() {
        assert_eq!(Mat4::rotation_y(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_is_periodic() {
        let a = 1.3;
        assert_mat_near(Mat4::rotation_y(a + TAU), Mat4::rotation_y(a), 1e-5);
    }

    #[test]
    fn rotation_quarter_turn_maps_z_to_x() {
        // Right-hand rotation by +90° about Y sends +Z to +X.
        let r = Mat4::rotation_y(PI / 2.0);
        let v = r.transform([0.0, 0.0, 1.0, 1.0]);
        assert_abs_diff_eq!(v[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn identity_is_two_sided_unit() {
        let m = Mat4::perspective(FRAC_PI_4, 1.5, 0.1, 10.0) * Mat4::rotation_y(0.7);
        assert_mat_near(Mat4::IDENTITY * m, m, 0.0);
        assert_mat_near(m * Mat4::IDENTITY, m, 0.0);
    }

    // ── perspective ───────────────────────────────────────────────────────

    #[test]
    fn perspective_depth_entries_match_closed_form() {
        let (near, far) = (0.1, 10.0);
        let p = Mat4::perspective(FRAC_PI_4, 1.0, near, far);
        assert_abs_diff_eq!(p.get(2, 2), (far + near) / (near - far), epsilon = 1e-6);
        assert_abs_diff_eq!(
            p.get(3, 2),
            -1.0,
            epsilon = 0.0
        );
        assert_abs_diff_eq!(
            p.get(2, 3),
            (2.0 * far * near) / (near - far),
            epsilon = 1e-6
        );
    }

    #[test]
    fn perspective_focal_scale() {
        let p = Mat4::perspective(FRAC_PI_4, 2.0, 0.1, 10.0);
        let f = 1.0 / (FRAC_PI_4 * 0.5).tan();
        assert_abs_diff_eq!(p.get(0, 0), f / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.get(1, 1), f, epsilon = 1e-6);
    }

    #[test]
    fn perspective_invalid_input_yields_identity_in_release() {
        // Covered only when debug assertions are off; with them on, the
        // asserts fire instead.
        if !cfg!(debug_assertions) {
            assert_eq!(Mat4::perspective(FRAC_PI_4, 0.0, 0.1, 10.0), Mat4::IDENTITY);
            assert_eq!(Mat4::perspective(FRAC_PI_4, 1.0, 10.0, 0.1), Mat4::IDENTITY);
        }
    }

    // ── translation / scale ───────────────────────────────────────────────

    #[test]
    fn translations_live_in_last_column() {
        let ty = Mat4::translate_y(-0.2);
        let tz = Mat4::translate_z(-3.0);
        assert_eq!(ty.get(1, 3), -0.2);
        assert_eq!(tz.get(2, 3), -3.0);
        assert_eq!(ty.transform([0.0, 0.0, 0.0, 1.0]), [0.0, -0.2, 0.0, 1.0]);
        assert_eq!(tz.transform([0.0, 0.0, 0.0, 1.0]), [0.0, 0.0, -3.0, 1.0]);
    }

    #[test]
    fn scale_is_uniform() {
        let v = Mat4::scale(1.6).transform([1.0, -2.0, 0.5, 1.0]);
        assert_eq!(v, [1.6, -3.2, 0.8, 1.0]);
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn multiply_applies_rightmost_first() {
        // T * S scales first, then translates; S * T translates first, then
        // scales the translation too.
        let t = Mat4::translate_z(1.0);
        let s = Mat4::scale(2.0);
        let p = [1.0, 0.0, 0.0, 1.0];

        assert_eq!((t * s).transform(p), [2.0, 0.0, 1.0, 1.0]);
        assert_eq!((s * t).transform(p), [2.0, 0.0, 2.0, 1.0]);
    }
}
