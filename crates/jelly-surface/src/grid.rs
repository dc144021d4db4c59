//! Tessellated sample grids and renderable surface meshes.

use serde::{Deserialize, Serialize};

use jelly_math::{BernsteinTable, Vec3};
use jelly_types::constants::LATTICE_POINT_COUNT;
use jelly_types::{JellyError, JellyResult};

use crate::face::{CubeFace, Orientation};
use crate::indices::{cube_indices, patch_indices};
use crate::patch::BicubicPatch;

/// How finite differences treat the far edges of a sample grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridTopology {
    /// The last row and column difference backward against their predecessor.
    #[default]
    Open,
    /// Row and column neighbours wrap modulo the resolution.
    Wrapped,
}

/// An `n × n` grid of surface samples, stored row-major: sample `(u, v)` at `u·n + v`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    pub resolution: usize,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SurfaceGrid {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, u: usize, v: usize) -> Vec3 {
        self.positions[u * self.resolution + v]
    }

    #[inline]
    pub fn normal(&self, u: usize, v: usize) -> Vec3 {
        self.normals[u * self.resolution + v]
    }

    /// Pairs the grid with the triangle list for `orientation`.
    pub fn into_mesh(self, orientation: Orientation) -> SurfaceMesh {
        let indices = patch_indices(self.resolution, orientation, 0);
        SurfaceMesh {
            positions: self.positions,
            normals: self.normals,
            indices,
        }
    }
}

/// Positions, normals and a triangle list ready for an external renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks buffer lengths and index bounds.
    pub fn validate(&self) -> JellyResult<()> {
        if self.normals.len() != self.positions.len() {
            return Err(JellyError::InvalidSurface(format!(
                "{} normals for {} positions",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(JellyError::InvalidSurface(format!(
                "Index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let n = self.positions.len() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= n) {
            return Err(JellyError::InvalidSurface(format!(
                "Index {bad} out of range for {n} vertices"
            )));
        }
        Ok(())
    }
}

/// Per-sample normals of a row-major `n × n` grid.
///
/// `normal = normalize(cross(p[u,v+1] - p, p[u+1,v] - p))`, the right-hand
/// normal of a forward-wound triangle. Degenerate neighbourhoods give zero.
pub fn grid_normals(positions: &[Vec3], resolution: usize, topology: GridTopology) -> Vec<Vec3> {
    let n = resolution;
    let at = |u: usize, v: usize| positions[u * n + v];

    let mut normals = Vec::with_capacity(positions.len());
    for u in 0..n {
        for v in 0..n {
            let p = at(u, v);
            let (du, dv) = match topology {
                GridTopology::Wrapped => (at((u + 1) % n, v) - p, at(u, (v + 1) % n) - p),
                GridTopology::Open => {
                    let du = if u + 1 < n {
                        at(u + 1, v) - p
                    } else if u > 0 {
                        p - at(u - 1, v)
                    } else {
                        Vec3::ZERO
                    };
                    let dv = if v + 1 < n {
                        at(u, v + 1) - p
                    } else if v > 0 {
                        p - at(u, v - 1)
                    } else {
                        Vec3::ZERO
                    };
                    (du, dv)
                }
            };
            normals.push(dv.cross(du).normalize_or_zero());
        }
    }
    normals
}

/// Samples `patch` on an `n × n` grid with precomputed basis values.
pub fn tessellate_with_table(
    patch: &BicubicPatch,
    table: &BernsteinTable,
    orientation: Orientation,
    topology: GridTopology,
) -> SurfaceGrid {
    let n = table.len();
    let mut positions = Vec::with_capacity(n * n);
    for u in 0..n {
        for v in 0..n {
            positions.push(patch.evaluate_basis(table.row(u), table.row(v)));
        }
    }

    let mut normals = grid_normals(&positions, n, topology);
    if orientation.is_reversed() {
        for normal in normals.iter_mut() {
            *normal = -*normal;
        }
    }

    SurfaceGrid { resolution: n, positions, normals }
}

/// Samples `patch` at `resolution` uniform steps of `u` and `v` over `[0, 1]`.
///
/// Sample 0 lies at parameter 0 and sample `n-1` at parameter 1. A
/// resolution below 2 yields a degenerate grid with zero normals.
pub fn tessellate_patch(
    patch: &BicubicPatch,
    resolution: usize,
    orientation: Orientation,
    topology: GridTopology,
) -> SurfaceGrid {
    tessellate_with_table(patch, &BernsteinTable::new(resolution), orientation, topology)
}

/// Tessellates one lattice face with its outward orientation.
pub fn evaluate_face_surface(
    grid: &[Vec3; LATTICE_POINT_COUNT],
    face: CubeFace,
    resolution: usize,
) -> SurfaceGrid {
    tessellate_patch(&face.patch(grid), resolution, face.orientation(), GridTopology::Open)
}

/// Tessellates all six faces into a single mesh.
///
/// Face `f` occupies vertices `f·n² .. (f+1)·n²` in [`CubeFace::ALL`] order.
pub fn evaluate_cube_surface(grid: &[Vec3; LATTICE_POINT_COUNT], resolution: usize) -> SurfaceMesh {
    let table = BernsteinTable::new(resolution);
    let per_face = resolution * resolution;
    let mut mesh = SurfaceMesh {
        positions: Vec::with_capacity(per_face * 6),
        normals: Vec::with_capacity(per_face * 6),
        indices: cube_indices(resolution),
    };

    for face in CubeFace::ALL {
        let surface = tessellate_with_table(&face.patch(grid), &table, face.orientation(), GridTopology::Open);
        mesh.positions.extend(surface.positions);
        mesh.normals.extend(surface.normals);
    }

    tracing::trace!(
        resolution,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "cube surface tessellated"
    );
    mesh
}
