//! Parallel engine using the owner-computes pattern
//!
//! Kick/drift and velocity finalize are split per body across rayon.
//! The force pass gives each target body its own full sum over every
//! source, so workers never share an accumulator.

use super::engine::{Engine, EngineCore, EngineState, Result};
use super::forces::NewtonianGravityOwnerComputes;
use super::history::HistoryLog;
use super::integrator::leapfrog_step_par;
use super::params::Parameters;
use super::states::BodyStateVec;

pub struct OwnerComputesEngine {
    core: EngineCore,
    forces: NewtonianGravityOwnerComputes,
}

impl OwnerComputesEngine {
    pub fn new(params: Parameters, history: HistoryLog) -> Self {
        Self {
            core: EngineCore::new(&params, history),
            forces: NewtonianGravityOwnerComputes { G: params.G },
        }
    }
}

impl Engine for OwnerComputesEngine {
    fn name(&self) -> &'static str {
        "OwnerComputesEngine"
    }

    fn state(&self) -> EngineState {
        self.core.state()
    }

    fn init(&mut self, body_states_ic: BodyStateVec) -> Result<()> {
        self.core.init(body_states_ic)
    }

    fn execute(&mut self, dt: f64, n_iter: usize) -> Result<BodyStateVec> {
        let name = self.name();
        self.core.run(
            name,
            &self.forces,
            dt,
            n_iter,
            leapfrog_step_par::<NewtonianGravityOwnerComputes>,
        )
    }

    fn history(&self) -> &HistoryLog {
        self.core.history()
    }
}
