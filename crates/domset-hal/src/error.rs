//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while executing gate programs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// A zero checkpoint found a line that was not |0⟩.
    #[error("Ancilla not clean at instruction {instruction}: {detail}")]
    AncillaNotClean {
        /// Position of the checkpoint in the program.
        instruction: usize,
        /// Which lines were dirty, and how badly.
        detail: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
