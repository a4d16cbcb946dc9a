//! Error types for libspell-core.
//!
//! Query APIs are total for well-formed inputs: a term with no correction
//! yields an empty list (or an "unknown" sentinel when requested), never an
//! error. The variants below cover the cases that genuinely cannot proceed:
//! invalid construction parameters, a per-call distance budget above what the
//! index was built for, casing transfer over mismatched shapes, and snapshot
//! I/O. A missing dictionary file is reported as a `false` return from the
//! loader (and logged), not raised.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpellError {
    /// Invalid construction parameters (prefix length too small, etc).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// `lookup` asked for a larger edit distance than the index was built for.
    #[error("max_edit_distance {requested} exceeds index maximum {maximum}")]
    DistanceBudgetExceeded { requested: usize, maximum: usize },

    /// Casing transfer between strings whose shapes do not line up.
    #[error("input shape mismatch: {0}")]
    InputShape(String),

    /// Snapshot file I/O failure.
    #[error("snapshot io: {0}")]
    SnapshotIo(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("snapshot codec: {0}")]
    SnapshotCodec(#[from] bincode::Error),
}

pub type Result<T, E = SpellError> = std::result::Result<T, E>;
