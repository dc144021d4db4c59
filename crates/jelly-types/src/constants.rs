//! Lattice dimensions and simulation defaults.

/// Control points per lattice axis.
pub const LATTICE_DIM: usize = 4;

/// Number of simulated lattice points (4 × 4 × 4).
pub const LATTICE_POINT_COUNT: usize = LATTICE_DIM * LATTICE_DIM * LATTICE_DIM;

/// Number of external anchor points (one per lattice corner).
pub const ANCHOR_COUNT: usize = 8;

/// Total number of point records held by a lattice (lattice points + anchors).
pub const TOTAL_POINT_COUNT: usize = LATTICE_POINT_COUNT + ANCHOR_COUNT;

/// Half-extent of the axis-aligned box every lattice point is confined to.
pub const BOUNDING_BOX_SIZE: f32 = 10.0;

/// Samples per parametric axis for each of the six cube faces.
pub const FACE_RESOLUTION: usize = 12;

/// Samples per parametric axis for the deformed sphere surface.
pub const VOLUME_RESOLUTION: usize = 60;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Inward offset used when estimating volume normals by finite difference.
pub const NORMAL_OFFSET: f32 = 0.01;

/// Epsilon for floating-point comparisons and degenerate-length guards.
pub const EPSILON: f32 = 1.0e-7;
