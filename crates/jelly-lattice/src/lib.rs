//! # jelly-lattice
//!
//! The soft-body physics core: a 4×4×4 lattice of mass points tied together
//! by springs, driven at its corners by eight external anchors.
//!
//! ## Key Types
//!
//! - [`Lattice`] — Dense arena of 64 lattice points plus 8 anchors
//! - [`SpringNetwork`] — Fixed structural/shear/anchor topology and force model
//! - [`IntegrationStrategy`] — Pluggable time integrator ([`SymplecticEuler`])
//! - [`PhysicsConfig`] — Tunable parameters with validated mutation
//! - [`SoftBody`] — Owns the above and exposes construct / disturb / update
//!
//! Each frame:
//!
//! ```text
//! body.set_anchor_positions(controller.anchor_positions(dt));
//! body.update(dt);          // zero → accumulate forces → integrate
//! let grid = body.positions();
//! ```

pub mod anchor;
pub mod body;
pub mod boundary;
pub mod config;
pub mod integrator;
pub mod lattice;
pub mod network;
pub mod point;
pub mod spring;

pub use anchor::{control_cube_corners, AnchorController, FixedAnchors, TransformedAnchors};
pub use body::{SoftBody, StepReport};
pub use boundary::BoundingBox;
pub use config::{ForceAccumulation, PhysicsConfig, Tunable};
pub use integrator::{IntegrationReport, IntegrationStrategy, SymplecticEuler};
pub use lattice::Lattice;
pub use network::SpringNetwork;
pub use point::LatticePoint;
pub use spring::{Spring, SpringKind};
