//! Benchmark runner: builds a body per scenario, steps it and collects metrics.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use jelly_debug::hooks::{step_with_hooks, InspectionHook};
use jelly_lattice::SoftBody;
use jelly_types::JellyResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    pub fn run(scenario: &Scenario) -> JellyResult<BenchmarkMetrics> {
        Self::run_with_hooks(scenario, &mut [])
    }

    /// Runs `scenario`, notifying `hooks` around every step.
    pub fn run_with_hooks(
        scenario: &Scenario,
        hooks: &mut [Box<dyn InspectionHook>],
    ) -> JellyResult<BenchmarkMetrics> {
        let mut body = SoftBody::new(scenario.corners, scenario.config.clone())?;
        if let Some(seed) = scenario.disturb_seed {
            body.disturb(&mut ChaCha8Rng::seed_from_u64(seed));
            for hook in hooks.iter_mut() {
                hook.on_disturb(body.timestep(), scenario.config.deformation_constant);
            }
        }

        let initial = body.positions();
        let initial_centroid = body.centroid();
        let limit = scenario.config.bounding_box_size;
        let mut controller = scenario.controller();

        let mut step_times = Vec::with_capacity(scenario.timesteps as usize);
        let mut bounces = 0u64;
        let mut clamps = 0u64;
        let mut contained = true;

        let total_start = Instant::now();
        for _ in 0..scenario.timesteps {
            let report = step_with_hooks(&mut body, controller.as_mut(), scenario.dt, hooks);
            step_times.push(report.wall_time);
            bounces += report.bounces as u64;
            clamps += report.clamps as u64;
            contained &= body.lattice().is_finite()
                && body.positions().iter().all(|p| p.abs().max_element() <= limit);
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        for hook in hooks.iter_mut() {
            hook.on_simulation_end();
        }

        let max_displacement = body
            .positions()
            .iter()
            .zip(&initial)
            .map(|(p, q)| p.distance(*q))
            .fold(0.0f32, f32::max);

        let avg_step_time = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step_time = step_times.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let max_step_time = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            timesteps: scenario.timesteps,
            total_wall_time,
            avg_step_time,
            min_step_time,
            max_step_time,
            final_kinetic_energy: body.kinetic_energy(),
            final_elastic_energy: body.elastic_energy(),
            max_displacement,
            centroid_drift: body.centroid().distance(initial_centroid),
            bounces,
            clamps,
            contained,
        };
        tracing::info!(
            scenario = %metrics.scenario,
            steps = metrics.timesteps,
            wall = metrics.total_wall_time,
            contained = metrics.contained,
            "scenario finished"
        );
        Ok(metrics)
    }

    /// Runs every scenario with its default length.
    pub fn run_all() -> JellyResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
