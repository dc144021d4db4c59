//! Simulation event types.
//!
//! Events are small value types tagged with the step that produced them.

use serde::{Deserialize, Serialize};

/// One event from the soft-body loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number the event belongs to.
    pub timestep: u32,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A step is about to run.
    StepBegin {
        /// Simulated time before the step (seconds).
        sim_time: f64,
        /// Step length (seconds).
        dt: f32,
    },

    /// A step completed.
    StepEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// Energy after a step.
    Energy {
        /// `0.5 · m · Σ|v|²` over the lattice points.
        kinetic: f64,
        /// Potential stored in the spring network.
        elastic: f64,
    },

    /// Bounding-box activity during a step.
    Boundary {
        /// Velocity components reflected.
        bounces: u32,
        /// Position components clamped.
        clamps: u32,
    },

    /// Lattice positions randomized.
    Disturbed {
        /// Deformation constant in effect.
        scale: f32,
    },

    /// A tunable parameter was changed.
    ParameterChanged {
        name: String,
        value: f32,
    },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }

    /// Short label for the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Energy { .. } => "energy",
            EventKind::Boundary { .. } => "boundary",
            EventKind::Disturbed { .. } => "disturbed",
            EventKind::ParameterChanged { .. } => "parameter_changed",
            EventKind::Custom { label, .. } => label,
        }
    }
}
