//! Basis-state evaluation of classical reversible programs.
//!
//! A program built only from X, CX, CCX and MCX maps each basis state to
//! exactly one basis state, so it can be run on plain bits. This is far
//! cheaper than a statevector and lets oracle truth tables be checked
//! exhaustively.

use domset_hal::{HalError, HalResult};
use domset_ir::{Circuit, InstructionKind, QubitId, QubitRegister};

/// One bit per qubit line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasisState {
    bits: Vec<bool>,
}

impl BasisState {
    /// All lines |0⟩.
    pub fn zeros(num_qubits: usize) -> Self {
        Self {
            bits: vec![false; num_qubits],
        }
    }

    /// All lines |0⟩, sized for `circuit`.
    pub fn for_circuit(circuit: &Circuit) -> Self {
        Self::zeros(circuit.num_qubits())
    }

    /// Read one line.
    pub fn get(&self, qubit: QubitId) -> bool {
        self.bits.get(qubit.index()).copied().unwrap_or(false)
    }

    /// Write one line.
    pub fn set(&mut self, qubit: QubitId, value: bool) {
        if let Some(bit) = self.bits.get_mut(qubit.index()) {
            *bit = value;
        }
    }

    /// Load `value` into a register, LSB first. Higher bits are dropped.
    pub fn set_register(&mut self, register: &QubitRegister, value: u64) {
        for (i, qubit) in register.iter().enumerate() {
            self.set(qubit, i < 64 && (value >> i) & 1 == 1);
        }
    }

    /// Read a register as an integer, LSB first.
    pub fn register_value(&self, register: &QubitRegister) -> u64 {
        register
            .iter()
            .take(64)
            .enumerate()
            .fold(0, |acc, (i, q)| acc | (u64::from(self.get(q)) << i))
    }

    /// Whether every listed line is 0.
    pub fn is_zero<'a>(&self, qubits: impl IntoIterator<Item = &'a QubitId>) -> bool {
        qubits.into_iter().all(|q| !self.get(*q))
    }

    /// Lines that are set.
    pub fn ones(&self) -> Vec<QubitId> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| QubitId(i as u32))
            .collect()
    }
}

/// Outcome of a basis-state run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisRun {
    /// Final line values.
    pub state: BasisState,
    /// Classical bits written by measurements; unwritten bits read 0.
    pub clbits: Vec<bool>,
}

impl BasisRun {
    /// Classical bits as a string, clbit 0 first.
    pub fn bitstring(&self) -> String {
        self.clbits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// Evaluator for programs without Hadamard gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasisSimulator;

impl BasisSimulator {
    /// Create an evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Run `circuit` starting from `initial`.
    ///
    /// Fails with `Unsupported` on a Hadamard and with `AncillaNotClean` when
    /// a zero checkpoint sees a set line.
    pub fn run(&self, circuit: &Circuit, initial: BasisState) -> HalResult<BasisRun> {
        if initial.bits.len() != circuit.num_qubits() {
            return Err(HalError::InvalidCircuit(format!(
                "initial state has {} lines, circuit has {}",
                initial.bits.len(),
                circuit.num_qubits()
            )));
        }

        let mut state = initial;
        let mut clbits = vec![false; circuit.num_clbits()];

        for (index, inst) in circuit.instructions().iter().enumerate() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if !gate.kind.is_classical() {
                        return Err(HalError::Unsupported(format!(
                            "gate '{}' at instruction {index} is not a basis permutation",
                            gate.name()
                        )));
                    }
                    if inst.controls().iter().all(|q| state.get(*q)) {
                        if let Some(target) = inst.target() {
                            let flipped = !state.get(target);
                            state.set(target, flipped);
                        }
                    }
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        clbits[c.index()] = state.get(*q);
                    }
                }
                InstructionKind::AssertZero => {
                    if !state.is_zero(&inst.qubits) {
                        let dirty: Vec<String> = inst
                            .qubits
                            .iter()
                            .filter(|q| state.get(**q))
                            .map(|q| circuit.qubits()[q.index()].to_string())
                            .collect();
                        return Err(HalError::AncillaNotClean {
                            instruction: index,
                            detail: format!("set lines [{}]", dirty.join(", ")),
                        });
                    }
                }
                InstructionKind::Barrier => {}
            }
        }

        Ok(BasisRun { state, clbits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domset_ir::ClbitId;

    #[test]
    fn test_register_roundtrip_is_lsb_first() {
        let mut circuit = Circuit::new("r");
        let r = circuit.add_qreg("r", 4);
        let mut state = BasisState::for_circuit(&circuit);
        state.set_register(&r, 0b0110);
        assert!(!state.get(r.qubits()[0]));
        assert!(state.get(r.qubits()[1]));
        assert_eq!(state.register_value(&r), 6);
        assert_eq!(state.ones(), vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_toffoli_truth_table() {
        let mut circuit = Circuit::with_size("ccx", 3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        let sim = BasisSimulator::new();

        for input in 0..8u64 {
            let all = QubitRegister::from_qubits(vec![QubitId(0), QubitId(1), QubitId(2)]);
            let mut state = BasisState::for_circuit(&circuit);
            state.set_register(&all, input);
            let out = sim.run(&circuit, state).unwrap();
            let expected = if input & 0b011 == 0b011 { input ^ 0b100 } else { input };
            assert_eq!(out.state.register_value(&all), expected, "input {input:03b}");
        }
    }

    #[test]
    fn test_measure_and_bitstring() {
        let mut circuit = Circuit::with_size("m", 2, 2);
        circuit.x(QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();
        let run = BasisSimulator::new()
            .run(&circuit, BasisState::for_circuit(&circuit))
            .unwrap();
        assert_eq!(run.bitstring(), "01");
    }

    #[test]
    fn test_rejects_hadamard() {
        let mut circuit = Circuit::with_size("h", 1, 0);
        circuit.h(QubitId(0)).unwrap();
        let err = BasisSimulator::new()
            .run(&circuit, BasisState::for_circuit(&circuit))
            .unwrap_err();
        assert!(matches!(err, HalError::Unsupported(_)));
    }

    #[test]
    fn test_checkpoint_reports_dirty_lines() {
        let mut circuit = Circuit::new("dirty");
        let aux = circuit.add_qreg("aux", 2);
        circuit.x(aux.qubits()[1]).unwrap();
        circuit.assert_zero(aux.iter()).unwrap();
        let err = BasisSimulator::new()
            .run(&circuit, BasisState::for_circuit(&circuit))
            .unwrap_err();
        match err {
            HalError::AncillaNotClean { instruction, detail } => {
                assert_eq!(instruction, 1);
                assert!(detail.contains("aux[1]"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_state_size_must_match() {
        let circuit = Circuit::with_size("n", 3, 0);
        assert!(BasisSimulator::new().run(&circuit, BasisState::zeros(2)).is_err());
    }
}
