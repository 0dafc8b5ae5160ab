//! Binary body-state layout shared by initial-condition and history files
//!
//! A block is a little-endian `u64` body count followed by that many
//! 56-byte records:
//!
//! ```text
//! x y z | vx vy vz | m      (7 x f64, little-endian)
//! ```
//!
//! An initial-condition file is exactly one block. A history file is a
//! concatenation of blocks, one per logged iteration.

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

use crate::simulation::states::{BodyState, BodyStateVec, NVec3};

/// Bytes per body record
pub const RECORD_SIZE: usize = 7 * std::mem::size_of::<f64>();

pub type Result<T> = std::result::Result<T, SerdeError>;

#[derive(Debug, Error)]
pub enum SerdeError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("truncated block: expected {expected} bodies, file ends inside record {index}")]
    Truncated { expected: usize, index: usize },

    #[error("truncated block header at byte {offset}")]
    TruncatedHeader { offset: u64 },

    #[error("body count {0} does not fit in memory on this platform")]
    CountOverflow(u64),

    #[error("{extra} trailing bytes after the last record")]
    TrailingBytes { extra: usize },
}

/// Write one block holding `body_states`
pub fn write_body_states<W: Write>(w: &mut W, body_states: &[BodyState]) -> Result<()> {
    w.write_u64::<LittleEndian>(body_states.len() as u64)?;
    for b in body_states {
        for c in b.x.iter().chain(b.v.iter()) {
            w.write_f64::<LittleEndian>(*c)?;
        }
        w.write_f64::<LittleEndian>(b.m)?;
    }
    Ok(())
}

/// Read one block from `r`
pub fn read_body_states<R: Read>(r: &mut R) -> Result<BodyStateVec> {
    let count = r.read_u64::<LittleEndian>().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SerdeError::TruncatedHeader { offset: 0 },
        _ => SerdeError::Io(e),
    })?;
    let n_body = usize::try_from(count).map_err(|_| SerdeError::CountOverflow(count))?;

    // A corrupt count must not drive a huge up-front allocation
    let mut body_states = Vec::with_capacity(n_body.min(1 << 16));
    for index in 0..n_body {
        let body = read_record(r).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => SerdeError::Truncated { expected: n_body, index },
            _ => SerdeError::Io(e),
        })?;
        body_states.push(body);
    }
    Ok(body_states)
}

fn read_record<R: Read>(r: &mut R) -> io::Result<BodyState> {
    let mut f = [0.0; 7];
    r.read_f64_into::<LittleEndian>(&mut f)?;
    Ok(BodyState::new(
        NVec3::new(f[0], f[1], f[2]),
        NVec3::new(f[3], f[4], f[5]),
        f[6],
    ))
}

/// Load an initial-condition file (exactly one block)
pub fn deserialize_body_states_from_bin(path: impl AsRef<Path>) -> Result<BodyStateVec> {
    let bytes = fs::read(path)?;
    let mut cursor = Cursor::new(bytes.as_slice());
    let body_states = read_body_states(&mut cursor)?;

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(SerdeError::TrailingBytes { extra: bytes.len() - consumed });
    }
    Ok(body_states)
}

/// Write an initial-condition file
pub fn serialize_body_states_to_bin(path: impl AsRef<Path>, body_states: &[BodyState]) -> Result<()> {
    let mut w = io::BufWriter::new(fs::File::create(path)?);
    write_body_states(&mut w, body_states)?;
    w.flush()?;
    Ok(())
}

/// Load every block of a history file, in logged order
pub fn read_history(path: impl AsRef<Path>) -> Result<Vec<BodyStateVec>> {
    let bytes = fs::read(path)?;
    let mut cursor = Cursor::new(bytes.as_slice());
    let mut history = Vec::new();

    while (cursor.position() as usize) < bytes.len() {
        let offset = cursor.position();
        let block = read_body_states(&mut cursor).map_err(|e| match e {
            SerdeError::TruncatedHeader { .. } => SerdeError::TruncatedHeader { offset },
            other => other,
        })?;
        history.push(block);
    }
    Ok(history)
}
