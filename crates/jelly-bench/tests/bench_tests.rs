//! Integration tests for jelly-bench.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use jelly_bench::metrics::BenchmarkMetrics;
use jelly_bench::runner::BenchmarkRunner;
use jelly_bench::scenarios::{AnchorMotion, Scenario, ScenarioKind};
use jelly_debug::hooks::InspectionHook;
use jelly_lattice::{SoftBody, StepReport};

struct CountingHook {
    begins: Arc<AtomicU32>,
    ends: Arc<AtomicU32>,
    disturbs: Arc<AtomicU32>,
}

impl InspectionHook for CountingHook {
    fn on_step_begin(&mut self, _timestep: u32, _sim_time: f64, _dt: f32) {
        self.begins.fetch_add(1, Ordering::SeqCst);
    }

    fn on_step_end(&mut self, _body: &SoftBody, _report: &StepReport) {
        self.ends.fetch_add(1, Ordering::SeqCst);
    }

    fn on_disturb(&mut self, _timestep: u32, _scale: f32) {
        self.disturbs.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "counting"
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn rest_setup() {
    let s = Scenario::rest();
    assert_eq!(s.kind, ScenarioKind::Rest);
    assert_eq!(s.motion, AnchorMotion::Fixed);
    assert!(s.disturb_seed.is_none());
}

#[test]
fn disturbed_setup() {
    let s = Scenario::disturbed();
    assert!(s.disturb_seed.is_some());
    assert_eq!(s.config.deformation_constant, 3.0);
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 5);
    for &kind in ScenarioKind::all() {
        assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
        assert_eq!(Scenario::from_kind(kind).kind, kind);
    }
}

#[test]
fn unknown_scenario_lists_choices() {
    let err = "melt".parse::<ScenarioKind>().unwrap_err();
    assert!(err.to_string().contains("wall_push"));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_rest_stays_put() {
    let scenario = Scenario::rest().with_timesteps(30);
    let metrics = BenchmarkRunner::run(&scenario).unwrap();
    assert_eq!(metrics.scenario, "rest");
    assert_eq!(metrics.timesteps, 30);
    assert!(metrics.contained);
    assert!(metrics.max_displacement < 1e-3);
    assert_eq!(metrics.bounces, 0);
}

#[test]
fn run_disturbed_is_reproducible() {
    let scenario = Scenario::disturbed().with_timesteps(50);
    let a = BenchmarkRunner::run(&scenario).unwrap();
    let b = BenchmarkRunner::run(&scenario).unwrap();
    assert_eq!(a.final_kinetic_energy, b.final_kinetic_energy);
    assert_eq!(a.max_displacement, b.max_displacement);
    assert!(a.contained);
}

#[test]
fn run_squeeze_contracts() {
    let metrics = BenchmarkRunner::run(&Scenario::squeeze().with_timesteps(120)).unwrap();
    assert!(metrics.max_displacement > 1.0);
    assert!(metrics.centroid_drift < 1e-2);
}

#[test]
fn run_spin_keeps_centroid() {
    let metrics = BenchmarkRunner::run(&Scenario::spin().with_timesteps(120)).unwrap();
    assert!(metrics.max_displacement > 0.1);
    assert!(metrics.centroid_drift < 1e-2);
    assert!(metrics.contained);
}

#[test]
fn run_wall_push_collides() {
    let metrics = BenchmarkRunner::run(&Scenario::wall_push().with_timesteps(120)).unwrap();
    assert!(metrics.bounces > 0);
    assert!(metrics.contained);
}

#[test]
fn run_all_scenarios_short() {
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind).with_timesteps(3);
        let metrics = BenchmarkRunner::run(&scenario).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.total_wall_time >= 0.0);
        assert!(metrics.min_step_time <= metrics.max_step_time);
    }
}

#[test]
fn hooks_are_notified() {
    let begins = Arc::new(AtomicU32::new(0));
    let ends = Arc::new(AtomicU32::new(0));
    let disturbs = Arc::new(AtomicU32::new(0));
    let mut hooks: Vec<Box<dyn InspectionHook>> = vec![Box::new(CountingHook {
        begins: begins.clone(),
        ends: ends.clone(),
        disturbs: disturbs.clone(),
    })];

    BenchmarkRunner::run_with_hooks(&Scenario::disturbed().with_timesteps(7), &mut hooks).unwrap();
    assert_eq!(begins.load(Ordering::SeqCst), 7);
    assert_eq!(ends.load(Ordering::SeqCst), 7);
    assert_eq!(disturbs.load(Ordering::SeqCst), 1);
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn csv_columns_line_up() {
    let metrics = BenchmarkRunner::run(&Scenario::rest().with_timesteps(2)).unwrap();
    let csv = BenchmarkMetrics::to_csv(&[metrics.clone(), metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    let columns = lines[0].split(',').count();
    assert!(lines.iter().all(|l| l.split(',').count() == columns));
    assert!(lines[1].starts_with("rest,2,"));
}
