//! # jelly-types
//!
//! Shared types, identifiers, error types, and constants
//! for the jelly lattice soft-body engine.
//!
//! This crate has no simulation logic. It defines the vocabulary
//! every other jelly crate speaks.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{JellyError, JellyResult};
pub use ids::{AnchorId, LatticeIndex, PointId};
pub use scalar::Scalar;
