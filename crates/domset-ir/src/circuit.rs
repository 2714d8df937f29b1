//! High-level program builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::QubitRegister;

/// A reversible gate program.
///
/// Instructions are kept in the order they were appended; executors replay
/// them front to back. Every appended instruction is validated against the
/// declared lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// The ordered program.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a named register of `size` qubits, LSB first.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QubitRegister {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        QubitRegister::from_qubits(ids).with_label(name)
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = ClbitId(self.clbits.len() as u32);
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply NOT.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CX, [control, target]))
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply a NOT on `target` controlled by every line in `controls`.
    ///
    /// With no controls this is a plain X.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        let controls: Vec<QubitId> = controls.into_iter().collect();
        self.apply(Instruction::controlled_not(&controls, target))
    }

    /// Apply H to every line of a register.
    pub fn h_all(&mut self, register: &QubitRegister) -> IrResult<&mut Self> {
        for qubit in register {
            self.h(qubit)?;
        }
        Ok(self)
    }

    /// Apply X to every line of a register.
    pub fn x_all(&mut self, register: &QubitRegister) -> IrResult<&mut Self> {
        for qubit in register {
            self.x(qubit)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure each line of `register` into the matching classical bit.
    pub fn measure_register(
        &mut self,
        register: &QubitRegister,
        clbits: &[ClbitId],
    ) -> IrResult<&mut Self> {
        if register.len() != clbits.len() {
            return Err(IrError::WidthMismatch {
                context: "measure_register".into(),
                left: register.len(),
                right: clbits.len(),
            });
        }
        for (qubit, &clbit) in register.iter().zip(clbits) {
            self.measure(qubit, clbit)?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Insert a zero checkpoint over `qubits`.
    pub fn assert_zero(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::assert_zero(qubits))
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Re-run the append checks over every instruction.
    ///
    /// Programs built through [`Circuit::apply`] always pass; this catches
    /// programs that arrive from outside, e.g. through [`Circuit::from_json`].
    pub fn validate(&self) -> IrResult<()> {
        self.instructions.iter().try_for_each(|inst| self.check(inst))
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        }

        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::QubitCountMismatch {
                gate_name: "measure".into(),
                expected: instruction.clbits.len() as u32,
                got: instruction.qubits.len() as u32,
            });
        }

        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.index() >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// The ordered program.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Count of each instruction name, sorted by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether every gate maps basis states to basis states (no H).
    pub fn is_classical(&self) -> bool {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .all(|g| g.kind.is_classical())
    }

    /// Circuit depth over gates and measurements.
    ///
    /// Barriers and zero checkpoints do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut clbit_level: FxHashMap<ClbitId, usize> = FxHashMap::default();
        let mut depth = 0;

        for inst in &self.instructions {
            if inst.is_barrier() || inst.is_assert_zero() {
                continue;
            }
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_level.get(q).copied().unwrap_or(0))
                .chain(
                    inst.clbits
                        .iter()
                        .map(|c| clbit_level.get(c).copied().unwrap_or(0)),
                )
                .max()
                .unwrap_or(0);
            let level = start + 1;
            for &q in &inst.qubits {
                qubit_level.insert(q, level);
            }
            for &c in &inst.clbits {
                clbit_level.insert(c, level);
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Serialize the program as JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a program from JSON.
    ///
    /// The parsed program goes through the same checks as [`Circuit::apply`].
    pub fn from_json(json: &str) -> IrResult<Self> {
        let circuit: Self = serde_json::from_str(json)?;
        circuit.validate()?;
        Ok(circuit)
    }
}
