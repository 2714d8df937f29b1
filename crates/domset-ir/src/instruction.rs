//! Program instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A gate operation.
    Gate(Gate),
    /// Measurement of one qubit into one classical bit.
    Measure,
    /// Barrier (no-op marker).
    Barrier,
    /// Checkpoint: the listed lines are expected to be |0⟩ here.
    ///
    /// Executors verify it and fail loudly when it does not hold.
    AssertZero,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on. Controls first, target last.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a NOT controlled on every line in `controls`.
    pub fn controlled_not(controls: &[QubitId], target: QubitId) -> Self {
        let gate = StandardGate::controlled_not(controls.len() as u32);
        Self::gate(gate, controls.iter().copied().chain([target]))
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a zero checkpoint over `qubits`.
    pub fn assert_zero(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::AssertZero,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this is a zero checkpoint.
    pub fn is_assert_zero(&self) -> bool {
        matches!(self.kind, InstructionKind::AssertZero)
    }

    /// The gate, if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::AssertZero => "assert_zero",
        }
    }

    /// Control lines of a gate instruction (empty otherwise).
    pub fn controls(&self) -> &[QubitId] {
        match &self.kind {
            InstructionKind::Gate(g) => &self.qubits[..g.kind.num_controls() as usize],
            _ => &[],
        }
    }

    /// Target line of a gate instruction.
    pub fn target(&self) -> Option<QubitId> {
        if self.is_gate() {
            self.qubits.last().copied()
        } else {
            None
        }
    }
}
