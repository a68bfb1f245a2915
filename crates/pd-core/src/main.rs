//! Spatial Prisoner's Dilemma batch runner
//!
//! Queues one or more runs of the same configuration, works through them on
//! a single seeded world, and writes snapshots and a summary as JSON.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use pd_core::output::write_summary;
use pd_core::{default_config_toml, run_queue, ConfigError, OutputError, RunQueue, SimConfig, SnapshotSchedule, World};
use pd_events::WrapMode;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "spatial_pd")]
#[command(about = "Spatial Prisoner's Dilemma on a torus")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Neighborhood radius
    #[arg(long)]
    r: Option<f64>,

    /// Defection bonus (cost / benefit ratio)
    #[arg(long)]
    u: Option<f64>,

    /// Population size
    #[arg(long)]
    n: Option<usize>,

    /// Epochs per run
    #[arg(long)]
    e: Option<usize>,

    /// Use average payoff as fitness
    #[arg(long)]
    average: bool,

    /// Torus wrap mode: toroidal or first_axis_only
    #[arg(long)]
    wrap: Option<WrapMode>,

    /// Number of runs to queue
    #[arg(long)]
    runs: Option<usize>,

    /// Epochs between progress reports
    #[arg(long)]
    step: Option<usize>,

    /// Directory for snapshots and the summary
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Epochs between population snapshots (0 disables)
    #[arg(long)]
    snapshot_interval: Option<usize>,

    /// Print the neighbor-count histogram of the first run's population and exit
    #[arg(long)]
    neighbors: bool,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("failed to write histogram: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr so stdout stays clean for the histogram.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<SimConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            SimConfig::from_file(path)?
        }
        None => SimConfig::default(),
    };

    // Command line flags override the file.
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(r) = args.r {
        config.world.r = r;
    }
    if let Some(u) = args.u {
        config.world.u = u;
    }
    if let Some(n) = args.n {
        config.world.n = n;
    }
    if let Some(e) = args.e {
        config.world.e = e;
    }
    if args.average {
        config.world.use_average = true;
    }
    if let Some(wrap) = args.wrap {
        config.world.wrap = wrap;
    }
    if let Some(runs) = args.runs {
        config.run.runs = runs;
    }
    if let Some(step) = args.step {
        config.run.step = step;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(interval) = args.snapshot_interval {
        config.output.snapshot_interval = interval;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), AppError> {
    let config = load_config(&args)?;
    let params = config.world.params();

    tracing::info!(
        "Spatial PD: r={} u={} n={} e={} average={} wrap={} seed={}",
        params.r,
        params.u,
        params.n,
        params.e,
        params.use_average,
        params.wrap,
        config.run.seed
    );

    // The queue draws each run's population itself.
    let mut world = World::unpopulated(params, config.run.seed);
    world.set_num_runs(config.run.runs);

    let mut queue = RunQueue::new();
    queue.add_runs(world.params(), world.num_runs());

    if args.neighbors {
        queue.start_front(&mut world);
        let hist = world.degree_histogram();
        tracing::info!(
            "Initial population: {} neighbor links, mean degree {:.2}, min degree {:?}",
            world.edge_count(),
            hist.mean_degree(),
            hist.min_degree()
        );
        hist.write_csv(io::stdout().lock())?;
        return Ok(());
    }

    let mut schedule = SnapshotSchedule::new(config.output.snapshot_interval);
    let summary = run_queue(
        &mut world,
        &mut queue,
        &mut schedule,
        config.run.step,
        &config.output.dir,
        config.run.seed,
    )?;

    if let Some(mean) = summary.mean_coop_fraction() {
        tracing::info!(
            "Completed {} runs, mean cooperator fraction {:.4}",
            summary.runs.len(),
            mean
        );
    }

    if config.output.write_summary {
        let path = write_summary(&config.output.dir, &summary)?;
        tracing::info!("Wrote summary to {}", path.display());
    }
    if schedule.snapshot_count() > 0 {
        tracing::info!("Generated {} snapshots.", schedule.snapshot_count());
    }

    Ok(())
}
