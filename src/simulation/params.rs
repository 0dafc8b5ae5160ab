//! Numerical and physical parameters for an engine run
//!
//! `Parameters` holds settings that stay fixed for the engine's lifetime:
//! - gravitational constant `G` scaling every field evaluation
//! - history flush cadence (a flush after iteration i when `i % flush_interval == 0`);
//!   zero is rejected by `Engine::init`

pub const DEFAULT_FLUSH_INTERVAL: usize = 10;

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub flush_interval: usize, // iterations between history flushes
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}
