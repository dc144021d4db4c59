//! # jelly-math
//!
//! Math primitives for the jelly engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - The cubic Bernstein basis and precomputed basis tables
//! - Uniform parameter sampling over `[0, 1]`

pub mod bernstein;
pub mod sampling;

pub use bernstein::{bernstein, bernstein_basis, BernsteinTable};
pub use sampling::sample_parameter;

// Re-export glam types as the canonical math types for jelly.
pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
