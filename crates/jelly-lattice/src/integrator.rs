//! Time integration.
//!
//! Integrators advance the simulated points of a lattice by one step from the
//! accelerations the spring network accumulated. Anchors are never touched.

use jelly_math::Vec3;

use crate::boundary::BoundingBox;
use crate::config::PhysicsConfig;
use crate::lattice::Lattice;

/// Boundary activity during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationReport {
    /// Velocity components reflected off a face.
    pub bounces: u32,
    /// Position components clamped back onto a face.
    pub clamps: u32,
}

/// Trait for lattice time integrators.
pub trait IntegrationStrategy: Send + Sync {
    /// Advances every non-static point by `dt` (`dt >= 0`).
    ///
    /// After this returns every simulated position lies inside
    /// `[-bounding_box_size, bounding_box_size]³`.
    fn step(&self, lattice: &mut Lattice, dt: f32, config: &PhysicsConfig) -> IntegrationReport;

    /// Returns the integrator's name.
    fn name(&self) -> &str;
}

/// Semi-implicit (symplectic) Euler with box collision.
///
/// Per point and step:
///
/// ```text
/// 1. v += a·dt
/// 2. per axis: at/past a face and moving outward → v = -v·restitution
/// 3. x += v·dt
/// 4. per axis: clamp x into [-max, max]
/// ```
///
/// Energy is not conserved exactly at a bounce: the velocity is scaled, not
/// reflected about the true crossing point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEuler;

impl SymplecticEuler {
    /// Advances a single point. Exposed for tests and custom drivers.
    #[inline]
    pub fn advance(
        position: Vec3,
        velocity: Vec3,
        acceleration: Vec3,
        dt: f32,
        bounds: &BoundingBox,
        restitution: f32,
    ) -> (Vec3, Vec3, IntegrationReport) {
        let velocity = velocity + acceleration * dt;
        let (velocity, bounces) = bounds.reflect_velocity(position, velocity, restitution);
        let position = position + velocity * dt;
        let (position, clamps) = bounds.clamp(position);
        (position, velocity, IntegrationReport { bounces, clamps })
    }
}

impl IntegrationStrategy for SymplecticEuler {
    fn step(&self, lattice: &mut Lattice, dt: f32, config: &PhysicsConfig) -> IntegrationReport {
        let bounds = BoundingBox::new(config.bounding_box_size);
        let mut report = IntegrationReport::default();

        for p in lattice.points_mut().iter_mut().filter(|p| !p.is_static()) {
            let (position, velocity, r) = Self::advance(
                p.position,
                p.velocity,
                p.acceleration,
                dt,
                &bounds,
                config.collision_elasticity,
            );
            p.position = position;
            p.velocity = velocity;
            report.bounces += r.bounces;
            report.clamps += r.clamps;
        }

        report
    }

    fn name(&self) -> &str {
        "symplectic_euler"
    }
}
