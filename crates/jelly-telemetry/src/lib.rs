//! # jelly-telemetry
//!
//! Event bus for soft-body telemetry. The simulation emits structured events
//! (step timing, energy, boundary contacts, disturbances) that pluggable sinks
//! consume: in-memory collection for tests, or `tracing` for logs.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
