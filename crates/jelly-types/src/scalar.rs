//! Scalar type alias for the simulation.
//!
//! Positions, velocities and accelerations are single precision to match
//! the vertex buffers they end up in.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
