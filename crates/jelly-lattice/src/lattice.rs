//! The point arena.
//!
//! All 72 point records live in one contiguous array:
//!
//! ```text
//! slot  0..64   lattice points, flat (i, j, k) order: 16·i + 4·j + k
//! slot 64..72   anchors 0..8
//! ```
//!
//! Springs refer to points by [`PointId`], so many springs can touch the same
//! point without shared mutable references.

use jelly_math::Vec3;
use jelly_types::constants::{ANCHOR_COUNT, LATTICE_DIM, LATTICE_POINT_COUNT, TOTAL_POINT_COUNT};
use jelly_types::{AnchorId, JellyError, JellyResult, LatticeIndex, PointId};

use crate::point::LatticePoint;

/// Dense storage for lattice points and anchors.
#[derive(Debug, Clone)]
pub struct Lattice {
    points: Vec<LatticePoint>,
}

impl Lattice {
    /// Subdivides the box spanned by `min` and `max` into a 4×4×4 grid.
    ///
    /// Point `(i, j, k)` is placed at `min + (i/3, j/3, k/3) ⊙ (max - min)`.
    /// Anchors start at the given positions.
    pub fn from_corners(min: Vec3, max: Vec3, anchors: [Vec3; ANCHOR_COUNT]) -> Self {
        let diff = max - min;
        let last = (LATTICE_DIM - 1) as f32;
        let mut points = Vec::with_capacity(TOTAL_POINT_COUNT);

        for idx in LatticeIndex::all() {
            let position = Vec3::new(
                min.x + idx.i as f32 / last * diff.x,
                min.y + idx.j as f32 / last * diff.y,
                min.z + idx.k as f32 / last * diff.z,
            );
            points.push(LatticePoint::free(position));
        }
        points.extend(anchors.into_iter().map(LatticePoint::anchor));

        Self { points }
    }

    /// Every point record, lattice points first.
    #[inline]
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [LatticePoint] {
        &mut self.points
    }

    #[inline]
    pub fn point(&self, id: PointId) -> &LatticePoint {
        &self.points[id.index()]
    }

    #[inline]
    pub fn point_mut(&mut self, id: PointId) -> &mut LatticePoint {
        &mut self.points[id.index()]
    }

    /// The 64 simulated lattice points.
    #[inline]
    pub fn free_points(&self) -> &[LatticePoint] {
        &self.points[..LATTICE_POINT_COUNT]
    }

    /// Lattice point at grid coordinate `idx`.
    #[inline]
    pub fn at(&self, idx: LatticeIndex) -> &LatticePoint {
        &self.points[idx.flat()]
    }

    /// Snapshot of the 64 lattice positions in flat order.
    pub fn positions(&self) -> [Vec3; LATTICE_POINT_COUNT] {
        let mut out = [Vec3::ZERO; LATTICE_POINT_COUNT];
        for (dst, p) in out.iter_mut().zip(self.free_points()) {
            *dst = p.position;
        }
        out
    }

    /// Snapshot of the 64 lattice velocities in flat order.
    pub fn velocities(&self) -> [Vec3; LATTICE_POINT_COUNT] {
        let mut out = [Vec3::ZERO; LATTICE_POINT_COUNT];
        for (dst, p) in out.iter_mut().zip(self.free_points()) {
            *dst = p.velocity;
        }
        out
    }

    /// Current anchor positions.
    pub fn anchor_positions(&self) -> [Vec3; ANCHOR_COUNT] {
        let mut out = [Vec3::ZERO; ANCHOR_COUNT];
        for (dst, p) in out.iter_mut().zip(&self.points[LATTICE_POINT_COUNT..]) {
            *dst = p.position;
        }
        out
    }

    /// Anchor position by number.
    #[inline]
    pub fn anchor(&self, id: AnchorId) -> Vec3 {
        self.points[id.point_id().index()].position
    }

    /// Overwrites all anchor positions.
    pub fn set_anchor_positions(&mut self, anchors: [Vec3; ANCHOR_COUNT]) {
        for (p, a) in self.points[LATTICE_POINT_COUNT..].iter_mut().zip(anchors) {
            p.position = a;
        }
    }

    /// Overwrites lattice positions and velocities, zeroing accelerations.
    ///
    /// Both slices must hold exactly 64 entries.
    pub fn restore(&mut self, positions: &[Vec3], velocities: &[Vec3]) -> JellyResult<()> {
        if positions.len() != LATTICE_POINT_COUNT || velocities.len() != LATTICE_POINT_COUNT {
            return Err(JellyError::InvalidLattice(format!(
                "Expected {} positions and velocities, got {} and {}",
                LATTICE_POINT_COUNT,
                positions.len(),
                velocities.len()
            )));
        }
        for ((p, &x), &v) in self.points.iter_mut().zip(positions).zip(velocities) {
            p.position = x;
            p.velocity = v;
            p.acceleration = Vec3::ZERO;
        }
        Ok(())
    }

    /// Zeroes every accumulated acceleration, anchors included.
    pub fn reset_accelerations(&mut self) {
        for p in self.points.iter_mut() {
            p.acceleration = Vec3::ZERO;
        }
    }

    /// Total kinetic energy `0.5 · m · Σ |v|²` over the simulated points.
    pub fn kinetic_energy(&self, mass: f32) -> f64 {
        let sum: f64 = self
            .free_points()
            .iter()
            .map(|p| p.velocity.length_squared() as f64)
            .sum();
        0.5 * mass as f64 * sum
    }

    /// Mean position of the simulated points.
    pub fn centroid(&self) -> Vec3 {
        let sum = self
            .free_points()
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.position);
        sum / LATTICE_POINT_COUNT as f32
    }

    /// True when every simulated position is finite.
    pub fn is_finite(&self) -> bool {
        self.free_points().iter().all(|p| p.position.is_finite())
    }
}
