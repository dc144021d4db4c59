//! Bézier control nets over the lattice.

use jelly_math::{bernstein_basis, Vec3};
use jelly_types::constants::LATTICE_POINT_COUNT;

/// A bicubic Bézier patch: 16 control points indexed `P[i·4 + j]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicubicPatch {
    pub control: [Vec3; 16],
}

impl BicubicPatch {
    pub fn new(control: [Vec3; 16]) -> Self {
        Self { control }
    }

    /// `Σ P[i,j] · B_i(u) · B_j(v)`.
    pub fn evaluate(&self, u: f32, v: f32) -> Vec3 {
        self.evaluate_basis(&bernstein_basis(u), &bernstein_basis(v))
    }

    /// Evaluates with basis values already computed for `u` and `v`.
    #[inline]
    pub fn evaluate_basis(&self, bu: &[f32; 4], bv: &[f32; 4]) -> Vec3 {
        let mut point = Vec3::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                point += self.control[i * 4 + j] * bu[i] * bv[j];
            }
        }
        point
    }

    /// Control point at row `i`, column `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> Vec3 {
        self.control[i * 4 + j]
    }
}

/// A tricubic Bézier volume over all 64 lattice points.
///
/// Control points are stored in flat lattice order, `16·i + 4·j + k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TricubicVolume {
    pub control: [Vec3; LATTICE_POINT_COUNT],
}

impl TricubicVolume {
    pub fn from_lattice(positions: &[Vec3; LATTICE_POINT_COUNT]) -> Self {
        Self { control: *positions }
    }

    /// `Σ P[i,j,k] · B_i(p.x) · B_j(p.y) · B_k(p.z)`.
    ///
    /// `p` is normally inside `[0, 1]³`; outside it the polynomial extrapolates.
    pub fn evaluate(&self, p: Vec3) -> Vec3 {
        let bx = bernstein_basis(p.x);
        let by = bernstein_basis(p.y);
        let bz = bernstein_basis(p.z);

        let mut point = Vec3::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    point += self.control[16 * i + 4 * j + k] * bx[i] * by[j] * bz[k];
                }
            }
        }
        point
    }
}
