//! Error type shared by grid construction, device selection and runs.

use thiserror::Error;

/// Everything that can stop a simulation from producing frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Width or height below 3 leaves no interior cell to evaluate.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 3")]
    InvalidDimensions { width: usize, height: usize },

    #[error("buffer size mismatch: expected {expected} cells, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("execution device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("tile edge must be at least 1, got {0}")]
    InvalidTileEdge(usize),

    #[error("run cancelled before generation {generation}")]
    Cancelled { generation: usize },
}

pub type Result<T> = std::result::Result<T, LifeError>;
