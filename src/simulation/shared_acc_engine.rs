//! Reference engine: sequential steps with symmetric pair accumulation
//!
//! One field evaluation per unordered pair per step. This is the baseline
//! every other engine is checked against.

use super::engine::{Engine, EngineCore, EngineState, Result};
use super::forces::NewtonianGravity;
use super::history::HistoryLog;
use super::integrator::leapfrog_step;
use super::params::Parameters;
use super::states::BodyStateVec;

pub struct SharedAccEngine {
    core: EngineCore,
    forces: NewtonianGravity,
}

impl SharedAccEngine {
    pub fn new(params: Parameters, history: HistoryLog) -> Self {
        Self {
            core: EngineCore::new(&params, history),
            forces: NewtonianGravity { G: params.G },
        }
    }
}

impl Engine for SharedAccEngine {
    fn name(&self) -> &'static str {
        "SharedAccEngine"
    }

    fn state(&self) -> EngineState {
        self.core.state()
    }

    fn init(&mut self, body_states_ic: BodyStateVec) -> Result<()> {
        self.core.init(body_states_ic)
    }

    fn execute(&mut self, dt: f64, n_iter: usize) -> Result<BodyStateVec> {
        let name = self.name();
        self.core.run(name, &self.forces, dt, n_iter, leapfrog_step::<NewtonianGravity>)
    }

    fn history(&self) -> &HistoryLog {
        self.core.history()
    }
}
