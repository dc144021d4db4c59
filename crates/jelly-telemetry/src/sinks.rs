//! Event consumers.

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// A consumer of simulation events.
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// Clones share one buffer, so a test can keep a clone after boxing the sink
/// into an [`EventBus`](crate::EventBus) and read what arrived.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

macro_rules! emit_at {
    ($level:expr, $($rest:tt)+) => {
        let level = $level;
        if level == tracing::Level::TRACE {
            tracing::trace!($($rest)+)
        } else if level == tracing::Level::DEBUG {
            tracing::debug!($($rest)+)
        } else if level == tracing::Level::INFO {
            tracing::info!($($rest)+)
        } else if level == tracing::Level::WARN {
            tracing::warn!($($rest)+)
        } else {
            tracing::error!($($rest)+)
        }
    };
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match &event.kind {
            EventKind::Energy { kinetic, elastic } => {
                emit_at!(self.level, timestep = event.timestep, kinetic, elastic, "energy");
            }
            EventKind::Boundary { bounces, clamps } => {
                emit_at!(self.level, timestep = event.timestep, bounces, clamps, "boundary");
            }
            kind => {
                emit_at!(self.level, timestep = event.timestep, event = ?kind, "simulation_event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
