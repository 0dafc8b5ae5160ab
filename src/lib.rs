pub mod simulation;
pub mod configuration;
pub mod io;
pub mod benchmark;

pub use simulation::states::{BodyState, BodyStateVec, NVec3, Pos, Vel, Acc, truncate_bodies};
pub use simulation::buffer::StateBuffer;
pub use simulation::forces::{Acceleration, NewtonianGravity, NewtonianGravityOwnerComputes, universal_field};
pub use simulation::engine::{Engine, EngineError, EngineState, build_engine};
pub use simulation::shared_acc_engine::SharedAccEngine;
pub use simulation::owner_computes_engine::OwnerComputesEngine;
pub use simulation::history::{HistoryLog, default_history_path};
pub use simulation::params::Parameters;

pub use configuration::config::{EngineKind, RunConfig, ScenarioConfig, BodyConfig};

pub use io::body_bin::{deserialize_body_states_from_bin, serialize_body_states_to_bin, read_history, SerdeError};

pub use benchmark::timer::{Timer, TriggerLevel};
pub use benchmark::benchmark::{bench_gravity, bench_engines};
