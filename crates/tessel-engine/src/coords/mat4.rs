use bytemuck::{Pod, Zeroable};
use core::ops::Mul;

use super::Vec2;

/// Column-major 4×4 matrix.
///
/// Column-major storage matches WGSL's `mat4x4<f32>` memory layout, so a
/// `Mat4` can be written into a uniform buffer as-is. Only the affine 2D
/// constructors the camera needs are provided.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Translation in the XY plane.
    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Mat4 {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, 0.0, 1.0],
            ],
        }
    }

    /// Non-uniform scale in the XY plane.
    #[inline]
    pub const fn scale(x: f32, y: f32) -> Self {
        Mat4 {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Applies the matrix to a 2D point (z = 0, w = 1), dropping z and w.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let c = &self.cols;
        Vec2::new(
            c[0][0] * p.x + c[1][0] * p.y + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[3][1],
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, cell) in col.iter_mut().enumerate() {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.cols[k][i] * rhs.cols[j][k];
                }
                *cell = acc;
            }
        }
        Mat4 { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let p = Vec2::new(3.5, -2.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
        assert_eq!(Mat4::IDENTITY * Mat4::IDENTITY, Mat4::IDENTITY);
    }

    #[test]
    fn translation_moves_points() {
        let m = Mat4::translation(2.0, -1.0);
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn scale_then_translate_composition() {
        // Right-to-left: translate first, then scale.
        let m = Mat4::scale(2.0, 2.0) * Mat4::translation(1.0, 0.0);
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn translate_then_scale_composition() {
        let m = Mat4::translation(1.0, 0.0) * Mat4::scale(2.0, 2.0);
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(3.0, 2.0));
    }
}
