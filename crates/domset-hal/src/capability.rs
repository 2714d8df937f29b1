//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// What an executor can run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gates.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"` or `"assert_zero"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            num_qubits,
            gate_set: GateSet::reversible_with_h(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "assert_zero".into()],
        }
    }

    /// Check whether a named feature is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Set of supported gate names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    /// Gate names as reported by `StandardGate::name`.
    pub gates: Vec<String>,
}

impl GateSet {
    /// X, H, CX, CCX and MCX.
    pub fn reversible_with_h() -> Self {
        Self {
            gates: ["x", "h", "cx", "ccx", "mcx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Check whether a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }
}
