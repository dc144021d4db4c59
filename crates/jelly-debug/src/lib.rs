//! # jelly-debug
//!
//! Inspection hooks and state snapshots for debugging soft-body runs.
//! Snapshots serialize the full lattice state to binary for replay and
//! diffing; hooks observe the step loop without changing it.

pub mod hooks;
pub mod snapshot;

pub use hooks::{step_with_hooks, ContainmentHook, InspectionHook, TelemetryHook};
pub use snapshot::{LatticeSnapshot, SnapshotDiff};
