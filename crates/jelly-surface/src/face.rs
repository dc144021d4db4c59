//! The six faces of the lattice cube.

use serde::{Deserialize, Serialize};

use jelly_math::Vec3;
use jelly_types::constants::LATTICE_POINT_COUNT;
use jelly_types::LatticeIndex;

use crate::patch::BicubicPatch;

/// Winding of a tessellated patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Triangles `(u,v) → (u,v+1) → (u+1,v)`.
    #[default]
    Forward,
    /// Triangles `(u,v) → (u+1,v) → (u,v+1)`, normals negated.
    Reversed,
}

impl Orientation {
    #[inline]
    pub fn is_reversed(self) -> bool {
        self == Orientation::Reversed
    }
}

/// A boundary face of the 4×4×4 lattice.
///
/// Variants are listed in tessellation order; [`CubeFace::ALL`] and the
/// vertex offsets in [`crate::indices::cube_indices`] follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeFace {
    XMin,
    XMax,
    ZMin,
    ZMax,
    YMin,
    YMax,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::XMin,
        CubeFace::XMax,
        CubeFace::ZMin,
        CubeFace::ZMax,
        CubeFace::YMin,
        CubeFace::YMax,
    ];

    /// Position in [`CubeFace::ALL`].
    pub fn ordinal(self) -> usize {
        match self {
            CubeFace::XMin => 0,
            CubeFace::XMax => 1,
            CubeFace::ZMin => 2,
            CubeFace::ZMax => 3,
            CubeFace::YMin => 4,
            CubeFace::YMax => 5,
        }
    }

    /// Winding that makes this face's triangles and normals point outward.
    pub fn orientation(self) -> Orientation {
        match self {
            CubeFace::XMax | CubeFace::ZMax | CubeFace::YMin => Orientation::Reversed,
            CubeFace::XMin | CubeFace::ZMin | CubeFace::YMax => Orientation::Forward,
        }
    }

    /// Lattice coordinate of patch control point `(a, b)`.
    ///
    /// Patch points keep ascending flat-index order: `a` is the slower of the
    /// two free lattice axes.
    pub fn lattice_index(self, a: usize, b: usize) -> LatticeIndex {
        match self {
            CubeFace::XMin => LatticeIndex::new(0, a, b),
            CubeFace::XMax => LatticeIndex::new(3, a, b),
            CubeFace::ZMin => LatticeIndex::new(a, b, 0),
            CubeFace::ZMax => LatticeIndex::new(a, b, 3),
            CubeFace::YMin => LatticeIndex::new(a, 0, b),
            CubeFace::YMax => LatticeIndex::new(a, 3, b),
        }
    }

    /// Extracts this face's 4×4 control net from the lattice positions.
    pub fn patch(self, grid: &[Vec3; LATTICE_POINT_COUNT]) -> BicubicPatch {
        let mut control = [Vec3::ZERO; 16];
        for a in 0..4 {
            for b in 0..4 {
                control[a * 4 + b] = grid[self.lattice_index(a, b).flat()];
            }
        }
        BicubicPatch::new(control)
    }

    pub fn name(self) -> &'static str {
        match self {
            CubeFace::XMin => "x_min",
            CubeFace::XMax => "x_max",
            CubeFace::ZMin => "z_min",
            CubeFace::ZMax => "z_max",
            CubeFace::YMin => "y_min",
            CubeFace::YMax => "y_max",
        }
    }
}
