//! Mass-point state.

use jelly_math::Vec3;

/// One mass point of the lattice, or one of the external anchors.
///
/// Anchors are flagged static at construction. The integrator never reads
/// or writes their velocity and acceleration; their position is assigned
/// from outside every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    is_static: bool,
}

impl LatticePoint {
    /// A simulated point at rest.
    pub fn free(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            is_static: false,
        }
    }

    /// An externally driven anchor.
    pub fn anchor(position: Vec3) -> Self {
        Self {
            is_static: true,
            ..Self::free(position)
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}
