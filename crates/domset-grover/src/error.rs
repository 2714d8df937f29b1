//! Error types for Grover search.

use domset_hal::HalError;
use domset_ir::IrError;
use domset_oracle::OracleError;
use thiserror::Error;

/// Errors raised while building or running a search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroverError {
    /// The problem instance cannot be searched.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Oracle construction failed.
    #[error("Oracle construction failed: {0}")]
    Oracle(#[from] OracleError),

    /// Program construction failed outside the oracle.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// The executor rejected or failed the job.
    #[error("Execution failed: {0}")]
    Hal(#[from] HalError),

    /// Configuration file could not be parsed.
    #[error("Invalid search configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Grover search.
pub type GroverResult<T> = Result<T, GroverError>;
