//! # jelly-surface
//!
//! Turns the discrete 4×4×4 lattice into smooth renderable geometry.
//!
//! ## Key Types
//!
//! - [`BicubicPatch`] / [`TricubicVolume`] — Bézier control nets over lattice positions
//! - [`CubeFace`] — The six boundary faces, each with a fixed [`Orientation`]
//! - [`SurfaceGrid`] — `n × n` samples with finite-difference normals
//! - [`VolumeDomain`] — Unit-cube sample sets (sphere, fitted point sets)
//! - [`SurfaceMesh`] — Positions, normals and triangle indices for a renderer

pub mod face;
pub mod grid;
pub mod indices;
pub mod patch;
pub mod volume;

pub use face::{CubeFace, Orientation};
pub use grid::{
    evaluate_cube_surface, evaluate_face_surface, grid_normals, tessellate_patch, tessellate_with_table,
    GridTopology, SurfaceGrid, SurfaceMesh,
};
pub use indices::{cube_indices, patch_indices, wrapped_indices};
pub use patch::{BicubicPatch, TricubicVolume};
pub use volume::{evaluate_volume_surface, VolumeDomain, VolumeNormals};
