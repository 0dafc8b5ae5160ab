//! Convert a YAML scenario into a binary initial-condition file

use nbsim::{serialize_body_states_to_bin, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bicgen", about = "Write a binary initial-condition file from a YAML scenario")]
struct Args {
    /// YAML scenario with a `bodies` list
    scenario: PathBuf,

    /// Output initial-condition file
    out_bin_file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bicgen=info".into()),
        )
        .init();

    let args = Args::parse();

    info!("loading scenario {}", args.scenario.display());
    let scenario = ScenarioConfig::load(&args.scenario)
        .with_context(|| format!("failed to load scenario {}", args.scenario.display()))?;
    let body_states = scenario.to_body_states()?;

    info!("writing {} bodies into {}", body_states.len(), args.out_bin_file.display());
    serialize_body_states_to_bin(&args.out_bin_file, &body_states)
        .with_context(|| format!("failed to write {}", args.out_bin_file.display()))?;

    Ok(())
}
