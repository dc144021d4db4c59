//! # jelly-bench
//!
//! Benchmark suite for the jelly soft-body engine.
//!
//! Provides five scripted scenarios, a runner that collects per-run metrics,
//! and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{AnchorMotion, Scenario, ScenarioKind};
