//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a gate program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit{}", format_gate_context(.gate_name))]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A region of lines is too small for what was requested of it.
    #[error("Not enough lines in {region}: need {required}, have {available}")]
    Capacity {
        /// Name of the region that ran out.
        region: String,
        /// Lines requested.
        required: usize,
        /// Lines still available.
        available: usize,
    },

    /// Two registers that must match in width do not.
    #[error("Register width mismatch in {context}: {left} vs {right}")]
    WidthMismatch {
        /// Where the mismatch was detected.
        context: String,
        /// Width of the first register.
        left: usize,
        /// Width of the second register.
        right: usize,
    },

    /// A value does not fit into a register of the given width.
    #[error("Value {value} does not fit in {width} bits")]
    ValueOutOfRange {
        /// The value that was requested.
        value: u64,
        /// Width of the register.
        width: usize,
    },

    /// Circuit (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message() {
        let err = IrError::Capacity {
            region: "aux".into(),
            required: 8,
            available: 5,
        };
        assert_eq!(err.to_string(), "Not enough lines in aux: need 8, have 5");
    }

    #[test]
    fn test_gate_context() {
        let err = IrError::DuplicateQubit {
            qubit: QubitId(3),
            gate_name: Some("ccx".into()),
        };
        assert!(err.to_string().ends_with("(gate: ccx)"));
    }
}
