pub mod states;
pub mod params;
pub mod buffer;
pub mod forces;
pub mod integrator;
pub mod history;
pub mod engine;
pub mod shared_acc_engine;
pub mod owner_computes_engine;
pub mod diagnostics;
