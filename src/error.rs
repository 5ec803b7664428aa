//! Error type shared by every fallible operation in the crate.

use crate::cell::CellId;

/// Errors raised by layout, border resolution, path building and
/// configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum PaylineError {
    /// Bad layout or style parameters. No partial result is produced.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// No allowed border of the cell is crossed ahead of the reference point.
    #[error("no border intersection for cell {cell}")]
    NoIntersection { cell: CellId },
    /// A side index outside `0..4`.
    #[error("invalid side index {0}")]
    InvalidSide(u8),
    /// A path was requested over zero cells, or a column offered nothing to pick.
    #[error("payline has no cells")]
    EmptyPath,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaylineError>;
