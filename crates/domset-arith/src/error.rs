//! Error types for arithmetic builders.

use domset_ir::IrError;
use thiserror::Error;

/// Errors raised while emitting arithmetic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArithError {
    /// Underlying program construction failed (capacity, values, lines).
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Operands of one operation disagree in width.
    #[error("Width mismatch in {operation}: expected {expected} lines, got {got}")]
    WidthMismatch {
        /// Operation being emitted.
        operation: &'static str,
        /// Width of the first operand.
        expected: usize,
        /// Width of the offending operand.
        got: usize,
    },

    /// An operation was given zero-width operands.
    #[error("{0} needs operands at least one line wide")]
    EmptyOperand(&'static str),

    /// An output register shares lines with an input it must not alias.
    #[error("Overlapping operands in {0}")]
    Overlap(&'static str),
}

/// Result type for arithmetic builders.
pub type ArithResult<T> = Result<T, ArithError>;
