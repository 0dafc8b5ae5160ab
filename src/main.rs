use nbsim::simulation::diagnostics::{total_energy, total_momentum};
use nbsim::{build_engine, deserialize_body_states_from_bin, truncate_bodies};
use nbsim::{BodyStateVec, EngineKind, HistoryLog, RunConfig, Timer};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nbsim", about = "Direct-summation gravitational N-body simulator")]
struct Args {
    /// Binary initial-condition file
    ic_bin_file: PathBuf,

    /// Body limit; no effect if < 0 or >= number of bodies in the file
    #[arg(allow_negative_numbers = true)]
    max_n_body: i64,

    /// Time step size
    #[arg(allow_negative_numbers = true)]
    dt: f64,

    /// Number of iterations
    #[arg(allow_negative_numbers = true)]
    n_iteration: i64,

    /// Engine variant (overrides the run config)
    #[arg(long, value_enum)]
    engine: Option<EngineKind>,

    /// History output file (overrides the run config)
    #[arg(long)]
    history: Option<PathBuf>,

    /// YAML run config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nbsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut timer = Timer::new("nbsim");

    let args = Args::parse();
    if args.n_iteration < 0 {
        bail!("n_iteration must be >= 0, got {}", args.n_iteration);
    }
    let n_iteration = args.n_iteration as usize;

    let run_cfg = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load run config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let params = run_cfg.parameters();
    let engine_kind = args.engine.or(run_cfg.engine).unwrap_or_default();
    let history_path = args.history.clone().or_else(|| run_cfg.history.clone());

    info!(
        ic = %args.ic_bin_file.display(),
        max_n_body = args.max_n_body,
        dt = args.dt,
        n_iteration,
        engine = ?engine_kind,
        "running"
    );
    timer.elapsed_previous("parsing_args");

    // Load ic
    let body_states_ic = deserialize_body_states_from_bin(&args.ic_bin_file)
        .with_context(|| format!("failed to load initial conditions from {}", args.ic_bin_file.display()))?;
    let body_states_ic = apply_body_limit(body_states_ic, args.max_n_body)?;
    debug!(
        energy = total_energy(&body_states_ic, params.G),
        momentum = ?total_momentum(&body_states_ic),
        "initial invariants"
    );
    timer.elapsed_previous("loading_ic");

    let (history, history_path) = HistoryLog::for_run(history_path.as_deref(), &args.ic_bin_file)
        .context("failed to create history file")?;
    info!(history = %history_path.display(), "writing history");

    // Select engine here
    let g = params.G;
    let mut engine = build_engine(engine_kind, params, history);
    engine.init(body_states_ic)?;
    timer.elapsed_previous("initializing_engine");

    let body_states = engine.execute(args.dt, n_iteration)?;
    timer.elapsed_previous("running_engine");

    debug!(
        energy = total_energy(&body_states, g),
        momentum = ?total_momentum(&body_states),
        "final invariants"
    );
    info!(n_body = body_states.len(), logged = engine.history().len(), "done");

    Ok(())
}

/// Truncate to `max_n_body` bodies; fails if nothing is left to simulate
fn apply_body_limit(mut body_states: BodyStateVec, max_n_body: i64) -> Result<BodyStateVec> {
    let n_loaded = body_states.len();
    if truncate_bodies(&mut body_states, max_n_body) {
        info!("limiting number of bodies to {}", max_n_body);
    }
    if body_states.is_empty() {
        if n_loaded == 0 {
            bail!("initial-condition file contains no bodies");
        }
        bail!("max_n_body = {max_n_body} leaves no bodies to simulate (file has {n_loaded}); use a negative value for no limit");
    }
    Ok(body_states)
}
