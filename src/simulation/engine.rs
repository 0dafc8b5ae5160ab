//! Engine interface and the shared double-buffered run loop
//!
//! Every engine moves through `Uninitialized -> Initialized -> Running -> Done`:
//! `init` stores the initial condition once, `execute` runs the whole
//! simulation once and returns the final body states. Engine variants differ
//! only in how a single step is computed; the loop, the buffer swap and the
//! history cadence live in [`EngineCore`].

use thiserror::Error;
use tracing::{debug, info};

use crate::benchmark::timer::{Timer, TriggerLevel};
use crate::configuration::config::EngineKind;
use crate::io::body_bin::SerdeError;
use crate::simulation::buffer::StateBuffer;
use crate::simulation::forces::Acceleration;
use crate::simulation::history::HistoryLog;
use crate::simulation::owner_computes_engine::OwnerComputesEngine;
use crate::simulation::params::Parameters;
use crate::simulation::shared_acc_engine::SharedAccEngine;
use crate::simulation::states::{BodyStateVec, Mass, NVec3, Vel};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine already initialized")]
    AlreadyInitialized,

    #[error("initial condition has no bodies")]
    EmptyBodySet,

    #[error("execute called in state {0:?}, expected Initialized")]
    NotReady(EngineState),

    #[error("flush_interval must be at least 1")]
    ZeroFlushInterval,

    #[error("time step must be finite, got {0}")]
    NonFiniteDt(f64),

    #[error("history log: {0}")]
    History(#[from] SerdeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Done,
}

/// Capability every integration strategy provides to the caller
pub trait Engine {
    fn name(&self) -> &'static str;

    fn state(&self) -> EngineState;

    /// Store the initial condition; allowed once
    fn init(&mut self, body_states_ic: BodyStateVec) -> Result<()>;

    /// Run `n_iter` steps of size `dt` and return the final body states
    fn execute(&mut self, dt: f64, n_iter: usize) -> Result<BodyStateVec>;

    fn history(&self) -> &HistoryLog;
}

/// Build the engine variant selected by `kind`
pub fn build_engine(kind: EngineKind, params: Parameters, history: HistoryLog) -> Box<dyn Engine> {
    match kind {
        EngineKind::SharedAcc => Box::new(SharedAccEngine::new(params, history)),
        EngineKind::OwnerComputes => Box::new(OwnerComputesEngine::new(params, history)),
    }
}

/// State machine, initial condition and history shared by all engines
pub(crate) struct EngineCore {
    state: EngineState,
    body_states_ic: BodyStateVec,
    history: HistoryLog,
    flush_interval: usize,
}

impl EngineCore {
    pub(crate) fn new(params: &Parameters, history: HistoryLog) -> Self {
        Self {
            state: EngineState::Uninitialized,
            body_states_ic: Vec::new(),
            history,
            flush_interval: params.flush_interval,
        }
    }

    pub(crate) fn state(&self) -> EngineState {
        self.state
    }

    pub(crate) fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub(crate) fn init(&mut self, body_states_ic: BodyStateVec) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(EngineError::AlreadyInitialized);
        }
        if body_states_ic.is_empty() {
            return Err(EngineError::EmptyBodySet);
        }
        if self.flush_interval == 0 {
            return Err(EngineError::ZeroFlushInterval);
        }
        debug!(n_body = body_states_ic.len(), "engine initialized");
        self.body_states_ic = body_states_ic;
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Drive the double-buffered loop
    ///
    /// `step` must advance its second argument into its third without
    /// reading the third's previous contents (other than as scratch).
    pub(crate) fn run<F, S>(
        &mut self,
        name: &str,
        forces: &F,
        dt: f64,
        n_iter: usize,
        mut step: S,
    ) -> Result<BodyStateVec>
    where
        F: Acceleration + ?Sized,
        S: FnMut(&F, &StateBuffer, &mut StateBuffer, &[Mass], &mut [Vel], f64),
    {
        if self.state != EngineState::Initialized {
            return Err(EngineError::NotReady(self.state));
        }
        if !dt.is_finite() {
            return Err(EngineError::NonFiniteDt(dt));
        }
        self.state = EngineState::Running;

        let n_body = self.body_states_ic.len();
        let mut timer = Timer::new(format!("{name}({n_body},{dt}*{n_iter})"));

        // Initial buffer and accelerations
        let (mut buf_in, mass) = StateBuffer::from_body_states(&self.body_states_ic);
        timer.elapsed_previous_at("load_ic", TriggerLevel::Debug);
        forces.acceleration(&buf_in.pos, &mass, &mut buf_in.acc);
        timer.elapsed_previous_at("initial_acc", TriggerLevel::Debug);

        let mut buf_out = StateBuffer::new(n_body);
        let mut vel_tmp = vec![NVec3::zeros(); n_body];

        self.history.push_with(|| buf_in.to_body_states(&mass));

        // A failed flush leaves the engine in Running; it cannot be resumed
        for i_iter in 0..n_iter {
            step(forces, &buf_in, &mut buf_out, mass.as_slice(), vel_tmp.as_mut_slice(), dt);

            self.history.push_with(|| buf_out.to_body_states(&mass));
            if i_iter % self.flush_interval == 0 {
                self.history.flush()?;
            }

            std::mem::swap(&mut buf_in, &mut buf_out);
            timer.elapsed_previous_at(&format!("iter{i_iter}"), TriggerLevel::Trace);
        }
        self.history.flush()?;
        timer.elapsed_previous("all_iters");

        self.state = EngineState::Done;
        info!(engine = name, n_body, n_iter, logged = self.history.len(), "run complete");
        Ok(buf_in.to_body_states(&mass))
    }
}
