//! Scoped checkpoint timer
//!
//! A `Timer` is owned by whoever is measuring; there is no process-wide
//! instance. Each `elapsed_previous` call emits a tracing event carrying the
//! time since the previous checkpoint, and dropping the timer emits the total.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

/// Level a checkpoint is emitted at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerLevel {
    Info,
    Debug,
    Trace,
}

#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
    previous: Instant,
    checkpoints: usize,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Instant::now();
        Self {
            name: name.into(),
            start: now,
            previous: now,
            checkpoints: 0,
        }
    }

    /// Checkpoint at info level
    pub fn elapsed_previous(&mut self, label: &str) -> Duration {
        self.elapsed_previous_at(label, TriggerLevel::Info)
    }

    /// Emit the time since the previous checkpoint (or construction) and reset it
    pub fn elapsed_previous_at(&mut self, label: &str, level: TriggerLevel) -> Duration {
        let now = Instant::now();
        let delta = now - self.previous;
        self.previous = now;
        self.checkpoints += 1;

        let ms = delta.as_secs_f64() * 1e3;
        match level {
            TriggerLevel::Info => info!(timer = %self.name, checkpoint = label, ms, "elapsed"),
            TriggerLevel::Debug => debug!(timer = %self.name, checkpoint = label, ms, "elapsed"),
            TriggerLevel::Trace => trace!(timer = %self.name, checkpoint = label, ms, "elapsed"),
        }
        delta
    }

    pub fn elapsed_total(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(
            timer = %self.name,
            ms = self.start.elapsed().as_secs_f64() * 1e3,
            "total"
        );
    }
}
