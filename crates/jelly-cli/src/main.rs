//! Jelly CLI: simulation, benchmarking and snapshot inspection.

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

#[derive(Parser)]
#[command(name = "jelly")]
#[command(version, about = "Jelly: a 4x4x4 mass-spring soft body with Bezier surfaces")]
struct Cli {
    /// Logging verbosity (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Which surface is rendered each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SurfaceKind {
    /// Six bicubic faces of the lattice boundary.
    Cube,
    /// Unit sphere bent through the tricubic volume.
    Sphere,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and optionally export every frame.
    Simulate {
        /// Physics config (TOML). Defaults are used when absent.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of steps to run.
        #[arg(short, long, default_value_t = 600)]
        steps: u32,

        /// Timestep in seconds.
        #[arg(long, default_value_t = jelly_types::constants::DEFAULT_DT)]
        dt: f32,

        /// Seed for the initial disturbance.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Disturb the lattice before the first step.
        #[arg(short, long)]
        disturb: bool,

        /// Override a parameter, e.g. `--set viscosity=0.5`. Repeatable.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Accumulate spring forces in parallel.
        #[arg(long)]
        parallel: bool,

        /// Surface to evaluate each frame.
        #[arg(long, value_enum, default_value_t = SurfaceKind::Cube)]
        surface: SurfaceKind,

        /// Samples per axis of the evaluated surface.
        #[arg(short, long)]
        resolution: Option<usize>,

        /// Write all frames to this JSON file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run benchmark scenarios.
    Benchmark {
        /// Which scenario to run (rest, disturbed, squeeze, spin, wall_push, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override the scenario length.
        #[arg(long)]
        steps: Option<u32>,

        /// Output file path (.csv or .json).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a lattice snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,

        /// Resume the snapshot for this many steps and report the result.
        #[arg(long, default_value_t = 0)]
        replay: u32,
    },

    /// Validate a physics config file.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },

    /// Run a simulation and save its final state.
    Snapshot {
        /// Physics config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Number of steps before capturing.
        #[arg(short, long, default_value_t = 120)]
        steps: u32,

        /// Seed for the initial disturbance.
        #[arg(long)]
        seed: Option<u64>,

        /// Snapshot file to write.
        #[arg(short, long)]
        output: String,
    },
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(true)
        .with_thread_ids(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install log subscriber: {e}");
    }

    let result = match cli.command {
        Commands::Simulate {
            config,
            steps,
            dt,
            seed,
            disturb,
            overrides,
            parallel,
            surface,
            resolution,
            output,
        } => commands::simulate(&commands::SimulateArgs {
            config,
            steps,
            dt,
            seed: disturb.then_some(seed),
            overrides,
            parallel,
            surface,
            resolution,
            output,
        }),
        Commands::Benchmark { scenario, steps, output } => {
            commands::benchmark(&scenario, steps, output.as_deref())
        }
        Commands::Inspect { path, replay } => commands::inspect(&path, replay),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Snapshot {
            config,
            steps,
            seed,
            output,
        } => commands::snapshot(config.as_deref(), steps, seed, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
