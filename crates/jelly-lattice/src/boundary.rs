//! Axis-aligned bounding box the lattice is confined to.
//!
//! Collision is handled per axis in two phases around the position update:
//! a velocity reflection before the move and a position clamp after it.

use jelly_math::Vec3;

/// The box `[-half_extent, half_extent]³` centred at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub half_extent: f32,
}

impl BoundingBox {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// True when `p` lies inside or on the box on every axis.
    pub fn contains(&self, p: Vec3) -> bool {
        let max = self.half_extent;
        p.abs().cmple(Vec3::splat(max)).all()
    }

    /// Reverses and scales each velocity component whose point sits at or past
    /// a face while still moving outward.
    ///
    /// Returns the new velocity and the number of axes that bounced.
    pub fn reflect_velocity(&self, position: Vec3, velocity: Vec3, restitution: f32) -> (Vec3, u32) {
        let max = self.half_extent;
        let mut v = velocity.to_array();
        let p = position.to_array();
        let mut bounces = 0;

        for axis in 0..3 {
            let outward = (p[axis] >= max && v[axis] > 0.0) || (p[axis] <= -max && v[axis] < 0.0);
            if outward {
                v[axis] = -v[axis] * restitution;
                bounces += 1;
            }
        }

        (Vec3::from_array(v), bounces)
    }

    /// Clamps each coordinate into `[-half_extent, half_extent]`.
    ///
    /// Returns the clamped position and the number of axes that were outside.
    pub fn clamp(&self, position: Vec3) -> (Vec3, u32) {
        let max = self.half_extent;
        let mut p = position.to_array();
        let mut clamps = 0;

        for c in p.iter_mut() {
            if *c > max {
                *c = max;
                clamps += 1;
            } else if *c < -max {
                *c = -max;
                clamps += 1;
            }
        }

        (Vec3::from_array(p), clamps)
    }
}
