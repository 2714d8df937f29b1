//! Reversible gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates a domset program is built from.
///
/// Multi-controlled gates list their controls first and the target last.
/// Every gate here is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// NOT.
    X,
    /// Hadamard.
    H,
    /// Controlled NOT.
    CX,
    /// Toffoli.
    CCX,
    /// NOT with an arbitrary number of controls.
    MCX {
        /// Number of control lines.
        num_controls: u32,
    },
}

impl StandardGate {
    /// The canonical gate for a NOT with `num_controls` controls.
    ///
    /// Zero, one and two controls map to X, CX and CCX respectively.
    pub fn controlled_not(num_controls: u32) -> Self {
        match num_controls {
            0 => StandardGate::X,
            1 => StandardGate::CX,
            2 => StandardGate::CCX,
            n => StandardGate::MCX { num_controls: n },
        }
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
            StandardGate::CCX => "ccx",
            StandardGate::MCX { .. } => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_controls() + 1
    }

    /// Number of control lines (zero for X and H).
    #[inline]
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H => 0,
            StandardGate::CX => 1,
            StandardGate::CCX => 2,
            StandardGate::MCX { num_controls } => *num_controls,
        }
    }

    /// True for gates that map basis states to basis states.
    pub fn is_classical(&self) -> bool {
        !matches!(self, StandardGate::H)
    }

    /// Every supported gate is an involution.
    pub fn is_self_inverse(&self) -> bool {
        true
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardGate::MCX { num_controls } => write!(f, "mcx({num_controls})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A gate with an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: StandardGate,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            label: None,
        }
    }

    /// Set a label on the gate.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::X.num_qubits(), 1);
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::MCX { num_controls: 5 }.num_qubits(), 6);
        assert!(!StandardGate::H.is_classical());
        assert!(StandardGate::CCX.is_classical());
    }

    #[test]
    fn test_controlled_not_normalizes() {
        assert_eq!(StandardGate::controlled_not(0), StandardGate::X);
        assert_eq!(StandardGate::controlled_not(1), StandardGate::CX);
        assert_eq!(StandardGate::controlled_not(2), StandardGate::CCX);
        assert_eq!(
            StandardGate::controlled_not(4),
            StandardGate::MCX { num_controls: 4 }
        );
    }

    #[test]
    fn test_gate_label() {
        let gate = Gate::standard(StandardGate::H).with_label("diffuser");
        assert_eq!(gate.name(), "h");
        assert_eq!(gate.label.as_deref(), Some("diffuser"));
        assert_eq!(StandardGate::MCX { num_controls: 3 }.to_string(), "mcx(3)");
    }
}
