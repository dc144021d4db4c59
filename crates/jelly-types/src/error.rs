//! Error types for the jelly engine.
//!
//! All crates return `JellyResult<T>` from fallible operations. The numerical
//! core (force accumulation, integration, Bézier evaluation) never fails.

use thiserror::Error;

/// Unified error type for the jelly engine.
#[derive(Debug, Error)]
pub enum JellyError {
    /// Configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Lattice construction input or restored state is malformed.
    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),

    /// Surface domain or tessellation input is malformed.
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g. a point escaped the box).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, JellyError>`.
pub type JellyResult<T> = Result<T, JellyError>;
