//! Inspection hooks for the step loop.
//!
//! Hooks are called around each [`SoftBody::update`] and observe state
//! read-only.

use std::time::Instant;

use jelly_lattice::{AnchorController, SoftBody, StepReport};
use jelly_telemetry::events::{EventKind, SimulationEvent};

/// Observer of the soft-body step loop.
///
/// # Lifecycle
///
/// ```text
/// for each step:
///   hook.on_step_begin(...)
///   body.update(dt)
///   hook.on_step_end(...)
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64, dt: f32) {
        let _ = (timestep, sim_time, dt);
    }

    fn on_step_end(&mut self, body: &SoftBody, report: &StepReport) {
        let _ = (body, report);
    }

    /// Called after the lattice was disturbed.
    fn on_disturb(&mut self, timestep: u32, scale: f32) {
        let _ = (timestep, scale);
    }

    fn on_simulation_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Pulls anchors from `controller`, steps the body and notifies every hook.
///
/// The returned report carries the measured wall time of the step.
pub fn step_with_hooks(
    body: &mut SoftBody,
    controller: &mut dyn AnchorController,
    dt: f32,
    hooks: &mut [Box<dyn InspectionHook>],
) -> StepReport {
    let (timestep, sim_time) = (body.timestep(), body.sim_time());
    for hook in hooks.iter_mut() {
        hook.on_step_begin(timestep, sim_time, dt);
    }
    let start = Instant::now();
    let mut report = body.drive(controller, dt);
    report.wall_time = start.elapsed().as_secs_f64();
    for hook in hooks.iter_mut() {
        hook.on_step_end(body, &report);
    }
    report
}

/// Turns step notifications into telemetry events.
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Takes the collected events, leaving the hook empty.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionHook for TelemetryHook {
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64, dt: f32) {
        self.events
            .push(SimulationEvent::new(timestep, EventKind::StepBegin { sim_time, dt }));
    }

    fn on_step_end(&mut self, body: &SoftBody, report: &StepReport) {
        let timestep = report.timestep;
        self.events.push(SimulationEvent::new(
            timestep,
            EventKind::Energy {
                kinetic: report.kinetic_energy,
                elastic: body.elastic_energy(),
            },
        ));
        if report.bounces > 0 || report.clamps > 0 {
            self.events.push(SimulationEvent::new(
                timestep,
                EventKind::Boundary {
                    bounces: report.bounces,
                    clamps: report.clamps,
                },
            ));
        }
        self.events.push(SimulationEvent::new(
            timestep,
            EventKind::StepEnd { wall_time: report.wall_time },
        ));
    }

    fn on_disturb(&mut self, timestep: u32, scale: f32) {
        self.events
            .push(SimulationEvent::new(timestep, EventKind::Disturbed { scale }));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Records steps after which a lattice point lies outside the bounding box
/// or is not finite.
#[derive(Debug, Default)]
pub struct ContainmentHook {
    violations: Vec<u32>,
    max_coordinate: f32,
}

impl ContainmentHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps that broke containment.
    pub fn violations(&self) -> &[u32] {
        &self.violations
    }

    /// Largest absolute coordinate seen after any step.
    pub fn max_coordinate(&self) -> f32 {
        self.max_coordinate
    }
}

impl InspectionHook for ContainmentHook {
    fn on_step_end(&mut self, body: &SoftBody, report: &StepReport) {
        let limit = body.config().bounding_box_size;
        let mut contained = body.lattice().is_finite();
        for p in body.positions() {
            let m = p.abs().max_element();
            self.max_coordinate = self.max_coordinate.max(m);
            contained &= m <= limit;
        }
        if !contained {
            tracing::warn!(timestep = report.timestep, limit, "lattice left the bounding box");
            self.violations.push(report.timestep);
        }
    }

    fn on_simulation_end(&mut self) {
        tracing::debug!(
            violations = self.violations.len(),
            max_coordinate = self.max_coordinate,
            "containment summary"
        );
    }

    fn name(&self) -> &str {
        "containment_hook"
    }
}
