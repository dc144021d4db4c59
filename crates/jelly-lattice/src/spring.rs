//! Damped springs between two point slots.

use jelly_math::Vec3;
use jelly_types::PointId;

use crate::config::PhysicsConfig;
use crate::point::LatticePoint;

/// Role of a spring in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Axis-aligned neighbours, rest length `edge_unit`.
    Structural,
    /// Face diagonals, rest length `edge_unit · √2`.
    Shear,
    /// Lattice corner to external anchor, rest length 0.
    Anchor,
}

/// A damped spring from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: PointId,
    pub b: PointId,
    rest_length: f32,
    involves_static: bool,
    kind: SpringKind,
}

impl Spring {
    /// Creates a spring. `involves_static` selects the control elasticity.
    pub fn new(a: PointId, b: PointId, rest_length: f32, involves_static: bool, kind: SpringKind) -> Self {
        debug_assert!(rest_length >= 0.0);
        Self { a, b, rest_length, involves_static, kind }
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    #[inline]
    pub fn involves_static(&self) -> bool {
        self.involves_static
    }

    #[inline]
    pub fn kind(&self) -> SpringKind {
        self.kind
    }

    /// Acceleration this spring adds to endpoint `a`; `b` receives the negation.
    ///
    /// ```text
    /// d       = b.pos - a.pos,  dir = d / |d|
    /// elastic = k · (|d| - rest)
    /// viscous = c · dot(a.vel - b.vel, dir)
    /// accel   = (elastic - viscous) / m · dir
    /// ```
    ///
    /// Coincident endpoints have no direction and contribute zero.
    pub fn acceleration(&self, points: &[LatticePoint], config: &PhysicsConfig) -> Vec3 {
        let pa = &points[self.a.index()];
        let pb = &points[self.b.index()];

        let diff = pb.position - pa.position;
        let dist = diff.length();
        // zero when the endpoints coincide
        let dir = diff.normalize_or_zero();

        let elastic = config.spring_constant(self.involves_static) * (dist - self.rest_length);
        let relative_velocity = pa.velocity - pb.velocity;
        let viscous = config.viscosity * relative_velocity.dot(dir);
        let force = elastic - viscous;

        dir * (force / config.mass)
    }

    /// Elastic potential `0.5 · k · (|d| - rest)²`.
    pub fn potential_energy(&self, points: &[LatticePoint], config: &PhysicsConfig) -> f64 {
        let dist = points[self.b.index()]
            .position
            .distance(points[self.a.index()].position);
        let stretch = (dist - self.rest_length) as f64;
        0.5 * config.spring_constant(self.involves_static) as f64 * stretch * stretch
    }
}
