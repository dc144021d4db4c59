//! CLI command implementations.

use std::error::Error;
use std::sync::mpsc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use jelly_bench::metrics::BenchmarkMetrics;
use jelly_bench::runner::BenchmarkRunner;
use jelly_bench::scenarios::{Scenario, ScenarioKind};
use jelly_debug::hooks::{step_with_hooks, ContainmentHook, InspectionHook, TelemetryHook};
use jelly_debug::snapshot::LatticeSnapshot;
use jelly_lattice::{
    control_cube_corners, FixedAnchors, ForceAccumulation, PhysicsConfig, SoftBody, StepReport, Tunable,
};
use jelly_math::Vec3;
use jelly_render::json_exporter::JsonFrameExporter;
use jelly_render::renderer::{HeadlessRenderer, RenderFrame, RenderTopology, Renderer};
use jelly_surface::{evaluate_cube_surface, evaluate_volume_surface, SurfaceMesh, VolumeDomain, VolumeNormals};
use jelly_telemetry::{EventBus, EventKind, SimulationEvent, TracingSink};
use jelly_types::constants::{ANCHOR_COUNT, FACE_RESOLUTION, VOLUME_RESOLUTION};
use jelly_types::JellyResult;

use crate::SurfaceKind;

type CliResult = Result<(), Box<dyn Error>>;

/// Half edge of the control cube every command starts from.
///
/// Snapshots do not store rest geometry, so `inspect --replay` rebuilds the
/// body from this cube.
const CUBE_HALF_EXTENT: f32 = 5.0;

/// Options of `jelly simulate`.
#[derive(Debug, Clone)]
pub struct SimulateArgs {
    pub config: Option<String>,
    pub steps: u32,
    pub dt: f32,
    /// Disturbance seed; `None` leaves the lattice untouched.
    pub seed: Option<u64>,
    pub overrides: Vec<String>,
    pub parallel: bool,
    pub surface: SurfaceKind,
    pub resolution: Option<usize>,
    pub output: Option<String>,
}

fn load_config(path: Option<&str>) -> JellyResult<PhysicsConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            PhysicsConfig::from_toml_str(&content)
        }
        None => Ok(PhysicsConfig::default()),
    }
}

/// Parses `name=value` into a tunable and its new value.
fn parse_assignment(text: &str) -> Result<(Tunable, f32), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("Expected NAME=VALUE, got '{text}'"))?;
    let name = name.trim();
    let param: Tunable = name.parse().map_err(|e: jelly_types::JellyError| e.to_string())?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|e| format!("Bad value for {name}: {e}"))?;
    Ok((param, value))
}

/// Forwards telemetry-hook events to an [`EventBus`] after every step.
struct BusHook {
    inner: TelemetryHook,
    sender: mpsc::Sender<SimulationEvent>,
}

impl BusHook {
    fn new(sender: mpsc::Sender<SimulationEvent>) -> Self {
        Self {
            inner: TelemetryHook::new(),
            sender,
        }
    }

    fn forward(&mut self) {
        for event in self.inner.drain_events() {
            // The bus outlives every step; a closed channel only drops logs.
            let _ = self.sender.send(event);
        }
    }
}

impl InspectionHook for BusHook {
    fn on_step_begin(&mut self, timestep: u32, sim_time: f64, dt: f32) {
        self.inner.on_step_begin(timestep, sim_time, dt);
    }

    fn on_step_end(&mut self, body: &SoftBody, report: &StepReport) {
        self.inner.on_step_end(body, report);
        self.forward();
    }

    fn on_disturb(&mut self, timestep: u32, scale: f32) {
        self.inner.on_disturb(timestep, scale);
        self.forward();
    }

    fn name(&self) -> &str {
        "bus_hook"
    }
}

/// The surface evaluated for each rendered frame.
enum FrameSurface {
    Cube(usize),
    Sphere(VolumeDomain),
}

impl FrameSurface {
    fn new(kind: SurfaceKind, resolution: Option<usize>) -> Self {
        match kind {
            SurfaceKind::Cube => Self::Cube(resolution.unwrap_or(FACE_RESOLUTION)),
            SurfaceKind::Sphere => Self::Sphere(VolumeDomain::sphere(resolution.unwrap_or(VOLUME_RESOLUTION))),
        }
    }

    fn evaluate(&self, body: &SoftBody) -> JellyResult<SurfaceMesh> {
        let grid = body.positions();
        match self {
            Self::Cube(resolution) => Ok(evaluate_cube_surface(&grid, *resolution)),
            Self::Sphere(domain) => evaluate_volume_surface(&grid, domain, VolumeNormals::OffsetDerivative),
        }
    }
}

fn max_coordinate(positions: &[Vec3]) -> f32 {
    positions.iter().map(|p| p.abs().max_element()).fold(0.0, f32::max)
}

/// Run a simulation, rendering a surface every step.
pub fn simulate(args: &SimulateArgs) -> CliResult {
    println!("Jelly Simulation");
    println!("────────────────");
    println!();

    let mut config = load_config(args.config.as_deref())?;
    if args.parallel {
        config.force_accumulation = ForceAccumulation::Parallel;
    }
    let corners = control_cube_corners(CUBE_HALF_EXTENT);
    let mut body = SoftBody::new(corners, config)?;

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));

    for assignment in &args.overrides {
        let (param, value) = parse_assignment(assignment)?;
        body.set_parameter(param, value)?;
        bus.emit(SimulationEvent::new(
            body.timestep(),
            EventKind::ParameterChanged {
                name: param.name().to_string(),
                value,
            },
        ));
    }

    let mut hooks: Vec<Box<dyn InspectionHook>> = vec![
        Box::new(BusHook::new(bus.sender())),
        Box::new(ContainmentHook::new()),
    ];

    if let Some(seed) = args.seed {
        body.disturb(&mut ChaCha8Rng::seed_from_u64(seed));
        let scale = body.config().deformation_constant;
        for hook in hooks.iter_mut() {
            hook.on_disturb(body.timestep(), scale);
        }
    }

    let surface = FrameSurface::new(args.surface, args.resolution);
    let mesh = surface.evaluate(&body)?;
    mesh.validate()?;
    let topology = RenderTopology::from_mesh(&mesh).with_lines(body.network().line_indices());

    let mut renderer: Box<dyn Renderer> = match &args.output {
        Some(path) => Box::new(JsonFrameExporter::new(path)),
        None => Box::new(HeadlessRenderer::new()),
    };
    renderer.init(&topology)?;
    renderer.submit_frame(&RenderFrame::from_surface(body.timestep(), &mesh).with_lattice(&body.positions()))?;

    println!("Steps:       {} @ dt = {:.4}s", args.steps, args.dt);
    println!("Integrator:  {}", body.integrator_name());
    println!("Springs:     {}", body.network().len());
    println!("Surface:     {:?} ({} verts, {} tris)", args.surface, mesh.vertex_count(), mesh.triangle_count());
    println!("Renderer:    {}", renderer.name());
    println!();

    let mut controller = FixedAnchors::new(corners);
    let mut bounces = 0u64;
    let start = Instant::now();
    for _ in 0..args.steps {
        let report = step_with_hooks(&mut body, &mut controller, args.dt, &mut hooks);
        bounces += report.bounces as u64;
        bus.flush();

        let mesh = surface.evaluate(&body)?;
        renderer.submit_frame(&RenderFrame::from_surface(report.timestep, &mesh).with_lattice(&body.positions()))?;

        if report.timestep % 60 == 0 {
            tracing::info!(
                timestep = report.timestep,
                sim_time = report.sim_time,
                kinetic = report.kinetic_energy,
                "progress"
            );
        }
    }
    let wall = start.elapsed().as_secs_f64();

    for hook in hooks.iter_mut() {
        hook.on_simulation_end();
    }
    bus.finish();
    renderer.finalize()?;

    let positions = body.positions();
    println!("Wall time:     {wall:.3}s");
    println!("Sim time:      {:.3}s", body.sim_time());
    println!("Final KE:      {:.6e}", body.kinetic_energy());
    println!("Elastic:       {:.6e}", body.elastic_energy());
    println!("Bounces:       {bounces}");
    println!("Max |coord|:   {:.4}", max_coordinate(&positions));
    println!("Events:        {}", bus.dispatched());
    if let Some(path) = &args.output {
        println!("Frames written to: {path} ({})", renderer.frame_count());
    }

    Ok(())
}

/// Run benchmark scenarios.
pub fn benchmark(scenario_name: &str, steps: Option<u32>, output_path: Option<&str>) -> CliResult {
    println!("Jelly Benchmark Suite");
    println!("═════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(steps) = steps {
            scenario = scenario.with_timesteps(steps);
        }
        println!("Running: {} ({} steps)", kind, scenario.timesteps);

        let metrics = BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}us", metrics.avg_step_time * 1e6);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Bounces:       {}", metrics.bounces);
        println!("  Contained:     {}", metrics.contained);
        println!();

        all_metrics.push(metrics);
    }

    match output_path {
        Some(path) if path.ends_with(".json") => {
            std::fs::write(path, serde_json::to_string_pretty(&all_metrics)?)?;
            println!("Results written to: {path}");
        }
        Some(path) => {
            std::fs::write(path, BenchmarkMetrics::to_csv(&all_metrics))?;
            println!("Results written to: {path}");
        }
        None => {
            println!("CSV Output:");
            println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
        }
    }

    Ok(())
}

/// Inspect a lattice snapshot, optionally resuming it for `replay` steps.
pub fn inspect(path: &str, replay: u32) -> CliResult {
    println!("Jelly Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = LatticeSnapshot::read_from(path).map_err(|e| format!("Failed to read snapshot: {e}"))?;
    let kinetic: f32 = snapshot
        .velocities
        .iter()
        .map(|v| 0.5 * snapshot.config.mass * v.length_squared())
        .sum();

    println!("Timestep:     {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Points:       {}", snapshot.positions.len());
    println!("Anchors:      {}", snapshot.anchors.len());
    println!("Kinetic:      {kinetic:.6e}");
    println!("Max |coord|:  {:.4}", max_coordinate(&snapshot.positions));
    for param in Tunable::ALL {
        println!("  {:<22}{}", param.name(), snapshot.config.get(param));
    }

    if replay > 0 {
        let anchors: [Vec3; ANCHOR_COUNT] = snapshot
            .anchors
            .as_slice()
            .try_into()
            .map_err(|_| format!("Snapshot has {} anchors", snapshot.anchors.len()))?;
        let mut body = SoftBody::new(control_cube_corners(CUBE_HALF_EXTENT), snapshot.config.clone())?;
        snapshot.apply(&mut body)?;
        let mut controller = FixedAnchors::new(anchors);
        let dt = if snapshot.timestep > 0 {
            (snapshot.sim_time / snapshot.timestep as f64) as f32
        } else {
            jelly_types::constants::DEFAULT_DT
        };
        for _ in 0..replay {
            body.drive(&mut controller, dt);
        }
        let diff = snapshot.diff(&LatticeSnapshot::capture(&body))?;
        println!();
        println!("Replayed {replay} steps (dt = {dt:.4}s)");
        println!("  Max position delta: {:.6} (point {})", diff.max_position_delta, diff.worst_point);
        println!("  Max velocity delta: {:.6}", diff.max_velocity_delta);
        println!("  Final KE:           {:.6e}", body.kinetic_energy());
    }

    Ok(())
}

/// Validate a physics config.
pub fn validate(path: &str) -> CliResult {
    println!("Jelly Validator");
    println!("───────────────");
    println!();

    if !path.ends_with(".toml") {
        println!("Unsupported file format. Use .toml (physics config).");
        return Ok(());
    }

    println!("Validating config: {path}");
    let content = std::fs::read_to_string(path)?;
    match PhysicsConfig::from_toml_str(&content) {
        Ok(config) => {
            for param in Tunable::ALL {
                println!("  {:<22}{}", param.name(), config.get(param));
            }
            println!("  {:<22}{}", "bounding_box_size", config.bounding_box_size);
            println!("  {:<22}{:?}", "force_accumulation", config.force_accumulation);
            println!("✅ Config is valid.");
            Ok(())
        }
        Err(e) => {
            println!("❌ Config validation failed: {e}");
            Err(e.into())
        }
    }
}

/// Run `steps` steps and write the final state to `output`.
pub fn snapshot(config_path: Option<&str>, steps: u32, seed: Option<u64>, output: &str) -> CliResult {
    let config = load_config(config_path)?;
    let corners = control_cube_corners(CUBE_HALF_EXTENT);
    let mut body = SoftBody::new(corners, config)?;
    if let Some(seed) = seed {
        body.disturb(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    let mut controller = FixedAnchors::new(corners);
    for _ in 0..steps {
        body.drive(&mut controller, jelly_types::constants::DEFAULT_DT);
    }

    LatticeSnapshot::capture(&body).write_to(output)?;
    println!("Snapshot of step {} written to: {output}", body.timestep());
    Ok(())
}
