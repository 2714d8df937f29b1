//! Error types for oracle construction.

use domset_ir::IrError;
use thiserror::Error;

/// Errors raised while emitting an oracle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Underlying program construction failed (capacity, width, operands).
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A vertex index does not fit the register width.
    #[error("Vertex {vertex} cannot be encoded in a {width}-bit register")]
    VertexNotEncodable {
        /// Largest vertex index that must be representable.
        vertex: usize,
        /// Register width in bits.
        width: usize,
    },

    /// The candidate list is empty.
    #[error("At least one candidate register is required")]
    EmptyCandidates,

    /// Two operands that must be disjoint share a line.
    #[error("Overlapping operands in {0}")]
    Overlap(String),
}

/// Result type for oracle construction.
pub type OracleResult<T> = Result<T, OracleError>;
