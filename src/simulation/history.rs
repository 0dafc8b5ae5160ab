//! Append-only log of body-state snapshots
//!
//! The engine appends iteration 0 and then one snapshot per completed step.
//! `flush` writes every snapshot appended since the previous flush to the
//! sink as one body-state block each; already written blocks are never
//! touched again. Without a sink the log keeps everything in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::io::body_bin::{self, SerdeError};
use crate::simulation::states::BodyStateVec;

pub struct HistoryLog {
    entries: Vec<BodyStateVec>,          // snapshots not yet discarded
    n_appended: usize,                   // total snapshots ever appended
    n_flushed: usize,                    // snapshots already written to the sink
    flush_marks: Vec<usize>,             // n_appended at each flush
    sink: Option<Box<dyn Write + Send>>, // None = in-memory only
    enabled: bool,
}

impl HistoryLog {
    /// Keep every snapshot in memory
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            n_appended: 0,
            n_flushed: 0,
            flush_marks: Vec::new(),
            sink: None,
            enabled: true,
        }
    }

    /// Ignore all snapshots; snapshot closures are never evaluated
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::in_memory() }
    }

    /// Stream flushed snapshots to `sink`; flushed entries are dropped from memory
    pub fn to_writer(sink: impl Write + Send + 'static) -> Self {
        Self { sink: Some(Box::new(sink)), ..Self::in_memory() }
    }

    /// Create (truncate) a history file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SerdeError> {
        let file = File::create(path)?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    /// File log for a run: `path` if given, else `<ic_bin_file>.history.bin`
    ///
    /// Returns the log together with the path it writes to.
    pub fn for_run(path: Option<&Path>, ic_bin_file: &Path) -> Result<(Self, PathBuf), SerdeError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_history_path(ic_bin_file),
        };
        let log = Self::create(&path)?;
        Ok((log, path))
    }

    /// Append the snapshot produced by `snapshot`, evaluated only when enabled
    pub fn push_with<F>(&mut self, snapshot: F)
    where
        F: FnOnce() -> BodyStateVec,
    {
        if !self.enabled {
            return;
        }
        self.entries.push(snapshot());
        self.n_appended += 1;
    }

    /// Persist everything appended since the last flush
    pub fn flush(&mut self) -> Result<(), SerdeError> {
        if !self.enabled {
            return Ok(());
        }

        if let Some(sink) = self.sink.as_mut() {
            // Entries before `first_pending` were written by an earlier flush
            let first_pending = self.entries.len() - (self.n_appended - self.n_flushed);
            for block in &self.entries[first_pending..] {
                body_bin::write_body_states(sink, block)?;
            }
            sink.flush()?;
            self.entries.clear();
        }

        debug!(
            written = self.n_appended - self.n_flushed,
            total = self.n_appended,
            "history flushed"
        );
        self.n_flushed = self.n_appended;
        self.flush_marks.push(self.n_appended);
        Ok(())
    }

    /// Total snapshots appended, including ones already written out
    pub fn len(&self) -> usize {
        self.n_appended
    }

    pub fn is_empty(&self) -> bool {
        self.n_appended == 0
    }

    /// Log length at each flush, in order
    pub fn flush_marks(&self) -> &[usize] {
        &self.flush_marks
    }

    /// Snapshots still held in memory
    pub fn entries(&self) -> &[BodyStateVec] {
        &self.entries
    }
}

/// `<ic_bin_file>.history.bin`, next to the initial-condition file
pub fn default_history_path(ic_bin_file: &Path) -> PathBuf {
    let mut name = ic_bin_file.as_os_str().to_owned();
    name.push(".history.bin");
    PathBuf::from(name)
}
