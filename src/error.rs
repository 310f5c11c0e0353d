//! Error types for squad selection.

use crate::ip::SolverStatus;
use crate::squad::ConfigError;
use thiserror::Error;

/// Main error type for squad selection runs.
#[derive(Debug, Error)]
pub enum SquadError {
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The pool cannot be expressed as a valid model.
    #[error("Model error: {0}")]
    Model(String),

    /// No squad satisfies every constraint.
    #[error("Infeasible: no squad satisfies the constraints")]
    Infeasible,

    /// The solver stopped without a proven optimum or infeasibility proof.
    #[error("Solver failed with status {0:?}")]
    Solver(SolverStatus),

    /// A solved squad breaks an output invariant.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for squad selection operations.
pub type Result<T> = std::result::Result<T, SquadError>;
