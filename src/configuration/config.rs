//! Configuration types loaded from YAML.
//!
//! Two documents are understood:
//!
//! - [`RunConfig`]      – engine selection, `G`, history cadence and output path
//! - [`ScenarioConfig`] – a hand-written list of bodies, converted by `bicgen`
//!   into a binary initial-condition file
//!
//! # Run config
//! ```yaml
//! engine: "owner-computes"   # or "shared-acc"
//! G: 1.0                     # gravitational constant
//! flush_interval: 10         # history flush cadence in iterations
//! history: "out/history.bin" # default: <ic_bin_file>.history.bin
//! ```
//!
//! # Scenario
//! ```yaml
//! bodies:
//!   - x: [ -0.5, 0.0, 0.0 ]
//!     v: [  0.0, -0.5, 0.0 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0, 0.0 ]
//!     v: [  0.0, 0.5, 0.0 ]
//!     m: 1.0
//! ```
//!
//! Every field of a run config is optional; command-line flags take
//! precedence over the file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyState, BodyStateVec, NVec3};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body {index}: `{field}` needs 3 components, got {len}")]
    BadVector { index: usize, field: &'static str, len: usize },
}

/// Which engine variant runs the simulation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EngineKind {
    #[serde(rename = "shared-acc")] // Sequential, one field evaluation per pair
    #[default]
    SharedAcc,

    #[serde(rename = "owner-computes")] // rayon parallel, per-target full sums
    OwnerComputes,
}

#[derive(Deserialize, Debug, Default)]
#[allow(non_snake_case)]
pub struct RunConfig {
    pub engine: Option<EngineKind>,
    pub G: Option<f64>, // gravitational constant, default 1
    pub flush_interval: Option<usize>, // default 10
    pub history: Option<PathBuf>, // history output file
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = open(path.as_ref())?;
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Engine parameters with defaults filled in
    pub fn parameters(&self) -> Parameters {
        let defaults = Parameters::default();
        Parameters {
            G: self.G.unwrap_or(defaults.G),
            flush_interval: self.flush_interval.unwrap_or(defaults.flush_interval),
        }
    }
}

/// Initial state of a single body
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position
    pub v: Vec<f64>, // velocity
    pub m: f64, // mass
}

/// Top-level scenario loaded from YAML
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = open(path.as_ref())?;
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Map each `BodyConfig` to a runtime `BodyState`, keeping order
    pub fn to_body_states(&self) -> Result<BodyStateVec, ConfigError> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, bc)| {
                let x = vec3(index, "x", &bc.x)?;
                let v = vec3(index, "v", &bc.v)?;
                Ok(BodyState::new(x, v, bc.m))
            })
            .collect()
    }
}

fn vec3(index: usize, field: &'static str, c: &[f64]) -> Result<NVec3, ConfigError> {
    match c {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(ConfigError::BadVector { index, field, len: c.len() }),
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_config_fills_defaults() {
        let cfg: RunConfig = serde_yaml::from_str("engine: owner-computes\n").unwrap();
        assert_eq!(cfg.engine, Some(EngineKind::OwnerComputes));
        let p = cfg.parameters();
        assert_eq!(p.G, 1.0);
        assert_eq!(p.flush_interval, 10);
        assert!(cfg.history.is_none());
    }

    #[test]
    fn run_config_reads_all_fields() {
        let yaml = "engine: shared-acc\nG: 6.674e-11\nflush_interval: 5\nhistory: out.bin\n";
        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine, Some(EngineKind::SharedAcc));
        assert_eq!(cfg.parameters().G, 6.674e-11);
        assert_eq!(cfg.parameters().flush_interval, 5);
        assert_eq!(cfg.history, Some(PathBuf::from("out.bin")));
    }

    #[test]
    fn scenario_converts_in_order() {
        let yaml = "bodies:\n  - x: [1, 2, 3]\n    v: [0, 0, 0]\n    m: 5\n  - x: [0, 0, 0]\n    v: [1, 0, 0]\n    m: 0\n";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        let states = cfg.to_body_states().unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].x, NVec3::new(1.0, 2.0, 3.0));
        assert_eq!(states[1].v.x, 1.0);
        assert_eq!(states[1].m, 0.0);
    }

    #[test]
    fn scenario_rejects_2d_vectors() {
        let yaml = "bodies:\n  - x: [1, 2]\n    v: [0, 0, 0]\n    m: 1\n";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        let err = cfg.to_body_states().unwrap_err();
        assert!(matches!(err, ConfigError::BadVector { index: 0, field: "x", len: 2 }));
    }
}
