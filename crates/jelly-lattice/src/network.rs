//! Spring network topology and force accumulation.
//!
//! The network is built once per body and never changes:
//!
//! | kind       | pairs                                   | count | rest length      |
//! |------------|-----------------------------------------|-------|------------------|
//! | structural | axis neighbours along k, j, i           | 144   | `edge_unit`      |
//! | shear      | both diagonals of every ij, ik, jk cell | 216   | `edge_unit · √2` |
//! | anchor     | 8 lattice corners → 8 anchors           | 8     | 0                |
//!
//! `edge_unit = |max - min| / (3·√3)`: the control cube's diagonal spread over
//! three lattice steps along each of the three axes.

use rayon::prelude::*;

use jelly_math::Vec3;
use jelly_types::constants::LATTICE_DIM;
use jelly_types::LatticeIndex;

use crate::config::{ForceAccumulation, PhysicsConfig};
use crate::lattice::Lattice;
use crate::spring::{Spring, SpringKind};

/// The fixed set of springs acting on a lattice.
#[derive(Debug, Clone)]
pub struct SpringNetwork {
    springs: Vec<Spring>,
    edge_unit: f32,
}

impl SpringNetwork {
    /// Builds the network for a lattice spanning `diff = max - min`.
    pub fn build(lattice: &Lattice, diff: Vec3) -> Self {
        let edge_unit = Self::edge_unit(diff);
        let diagonal = (edge_unit as f64 * std::f64::consts::SQRT_2) as f32;
        let n = LATTICE_DIM;
        let mut springs = Vec::with_capacity(368);

        let mut push = |a: LatticeIndex, b: LatticeIndex, rest: f32, kind: SpringKind| {
            springs.push(Spring::new(a.point_id(), b.point_id(), rest, false, kind));
        };
        let at = LatticeIndex::new;

        // Structural: along k, then j, then i.
        for i in 0..n {
            for j in 0..n {
                for k in 0..n - 1 {
                    push(at(i, j, k), at(i, j, k + 1), edge_unit, SpringKind::Structural);
                }
            }
        }
        for i in 0..n {
            for j in 0..n - 1 {
                for k in 0..n {
                    push(at(i, j, k), at(i, j + 1, k), edge_unit, SpringKind::Structural);
                }
            }
        }
        for i in 0..n - 1 {
            for j in 0..n {
                for k in 0..n {
                    push(at(i, j, k), at(i + 1, j, k), edge_unit, SpringKind::Structural);
                }
            }
        }

        // Shear: two crossing diagonals per cell face.
        for i in 0..n - 1 {
            for j in 0..n - 1 {
                for k in 0..n {
                    push(at(i, j, k), at(i + 1, j + 1, k), diagonal, SpringKind::Shear);
                    push(at(i, j + 1, k), at(i + 1, j, k), diagonal, SpringKind::Shear);
                }
            }
        }
        for i in 0..n - 1 {
            for j in 0..n {
                for k in 0..n - 1 {
                    push(at(i, j, k), at(i + 1, j, k + 1), diagonal, SpringKind::Shear);
                    push(at(i, j, k + 1), at(i + 1, j, k), diagonal, SpringKind::Shear);
                }
            }
        }
        for i in 0..n {
            for j in 0..n - 1 {
                for k in 0..n - 1 {
                    push(at(i, j, k), at(i, j + 1, k + 1), diagonal, SpringKind::Shear);
                    push(at(i, j, k + 1), at(i, j + 1, k), diagonal, SpringKind::Shear);
                }
            }
        }

        // Corners come out of the flat walk in anchor order.
        for idx in LatticeIndex::all() {
            if let Some(anchor) = idx.corner_anchor() {
                let involves_static = lattice.point(anchor.point_id()).is_static();
                springs.push(Spring::new(
                    idx.point_id(),
                    anchor.point_id(),
                    0.0,
                    involves_static,
                    SpringKind::Anchor,
                ));
            }
        }
        tracing::debug!(
            springs = springs.len(),
            edge_unit,
            "spring network built"
        );

        Self { springs, edge_unit }
    }

    /// Structural rest length for a control cube spanning `diff`.
    pub fn edge_unit(diff: Vec3) -> f32 {
        (diff.length() as f64 / (3.0 * 3.0_f64.sqrt())) as f32
    }

    /// Rest length of structural springs.
    #[inline]
    pub fn structural_rest_length(&self) -> f32 {
        self.edge_unit
    }

    #[inline]
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Number of springs of the given kind.
    pub fn count_by_kind(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind() == kind).count()
    }

    /// Adds every spring's equal-and-opposite contribution into its endpoints'
    /// accelerations. Only `acceleration` is written.
    pub fn accumulate_forces(&self, lattice: &mut Lattice, config: &PhysicsConfig) {
        match config.force_accumulation {
            ForceAccumulation::Sequential => self.accumulate_sequential(lattice, config),
            ForceAccumulation::Parallel => self.accumulate_parallel(lattice, config),
        }
    }

    fn accumulate_sequential(&self, lattice: &mut Lattice, config: &PhysicsConfig) {
        let points = lattice.points_mut();
        for spring in &self.springs {
            let accel = spring.acceleration(points, config);
            points[spring.a.index()].acceleration += accel;
            points[spring.b.index()].acceleration -= accel;
        }
    }

    fn accumulate_parallel(&self, lattice: &mut Lattice, config: &PhysicsConfig) {
        let contributions: Vec<Vec3> = {
            let points = lattice.points();
            self.springs
                .par_iter()
                .map(|spring| spring.acceleration(points, config))
                .collect()
        };

        // Reduce in spring order so the sums match the sequential path bit for bit.
        let points = lattice.points_mut();
        for (spring, accel) in self.springs.iter().zip(contributions) {
            points[spring.a.index()].acceleration += accel;
            points[spring.b.index()].acceleration -= accel;
        }
    }

    /// Total elastic potential stored in the network.
    pub fn elastic_energy(&self, lattice: &Lattice, config: &PhysicsConfig) -> f64 {
        let points = lattice.points();
        self.springs
            .iter()
            .map(|s| s.potential_energy(points, config))
            .sum()
    }

    /// Endpoint pairs of every lattice-to-lattice spring, flattened for a line list.
    pub fn line_indices(&self) -> Vec<u32> {
        self.springs
            .iter()
            .filter(|s| s.kind() != SpringKind::Anchor)
            .flat_map(|s| [s.a.0 as u32, s.b.0 as u32])
            .collect()
    }
}
