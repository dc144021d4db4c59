//! Benchmark metrics collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics from one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Mean wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Spring potential after the last step.
    pub final_elastic_energy: f64,
    /// Largest distance any lattice point ended up from where it started.
    pub max_displacement: f32,
    /// Distance between the final and initial centroids.
    pub centroid_drift: f32,
    /// Velocity reflections over the whole run.
    pub bounces: u64,
    /// Position clamps over the whole run.
    pub clamps: u64,
    /// Every step ended with the lattice finite and inside the box.
    pub contained: bool,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,timesteps,total_wall_time_s,avg_step_us,min_step_us,max_step_us,final_ke,final_elastic,max_displacement,centroid_drift,bounces,clamps,contained".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{:.6},{:.3},{:.3},{:.3},{:.6e},{:.6e},{:.6},{:.6},{},{},{}",
            self.scenario,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1e6,
            self.min_step_time * 1e6,
            self.max_step_time * 1e6,
            self.final_kinetic_energy,
            self.final_elastic_energy,
            self.max_displacement,
            self.centroid_drift,
            self.bounces,
            self.clamps,
            self.contained,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
