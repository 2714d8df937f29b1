//! Pattern control: gate blocks that fire only when registers hold given values.
//!
//! A register is made to "read all ones" on a pattern by flipping the lines
//! whose pattern bit is 0. Controls over those lines then fire exactly when
//! the register equals the pattern. The same flips are applied again after
//! the block to restore the register.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;
use crate::register::QubitRegister;

/// Apply X to the lines of `register` whose bit in `value` is 0.
pub fn flip_zero_bits(circuit: &mut Circuit, register: &QubitRegister, value: u64) -> IrResult<()> {
    let bits = register.encode(value)?;
    for (qubit, bit) in register.iter().zip(bits) {
        if !bit {
            circuit.x(qubit)?;
        }
    }
    Ok(())
}

/// Apply X to the lines of `register` whose bit in `value` is 1.
pub fn set_bits(circuit: &mut Circuit, register: &QubitRegister, value: u64) -> IrResult<()> {
    let bits = register.encode(value)?;
    for (qubit, bit) in register.iter().zip(bits) {
        if bit {
            circuit.x(qubit)?;
        }
    }
    Ok(())
}

/// Run `body` inside a pattern scope.
///
/// `body` receives the concatenated lines of all registers; using them as
/// controls makes a gate fire only when every register equals its pattern.
/// Patterns are validated before anything is emitted.
pub fn with_pattern<E, F>(
    circuit: &mut Circuit,
    patterns: &[(&QubitRegister, u64)],
    body: F,
) -> Result<(), E>
where
    E: From<IrError>,
    F: FnOnce(&mut Circuit, &[QubitId]) -> Result<(), E>,
{
    for (register, value) in patterns {
        register.encode(*value)?;
    }

    let controls: Vec<QubitId> = patterns.iter().flat_map(|(r, _)| r.iter()).collect();

    for (register, value) in patterns {
        flip_zero_bits(circuit, register, *value)?;
    }
    body(circuit, &controls)?;
    for (register, value) in patterns.iter().rev() {
        flip_zero_bits(circuit, register, *value)?;
    }
    Ok(())
}

/// Toggle `target` when every register equals its pattern.
pub fn mcx_on_pattern(
    circuit: &mut Circuit,
    patterns: &[(&QubitRegister, u64)],
    target: QubitId,
) -> IrResult<()> {
    with_pattern(circuit, patterns, |c, controls| {
        c.mcx(controls.iter().copied(), target).map(|_| ())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::InstructionKind;
    use crate::gate::StandardGate;

    #[test]
    fn test_pattern_flips_zero_bits_around_block() {
        let mut circuit = Circuit::new("pattern");
        let a = circuit.add_qreg("a", 2);
        let b = circuit.add_qreg("b", 2);
        let flag = circuit.add_qubit();

        // a == 1 (bits 1,0), b == 2 (bits 0,1)
        mcx_on_pattern(&mut circuit, &[(&a, 1), (&b, 2)], flag).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["x", "x", "mcx", "x", "x"]);

        let flipped: Vec<_> = circuit.instructions()[..2]
            .iter()
            .map(|i| i.qubits[0])
            .collect();
        assert_eq!(flipped, vec![a.qubits()[1], b.qubits()[0]]);

        let mcx = &circuit.instructions()[2];
        assert_eq!(
            mcx.kind,
            InstructionKind::Gate(StandardGate::MCX { num_controls: 4 }.into())
        );
        assert_eq!(mcx.target(), Some(flag));
    }

    #[test]
    fn test_pattern_rejects_oversized_value_before_emitting() {
        let mut circuit = Circuit::new("pattern");
        let a = circuit.add_qreg("a", 2);
        let flag = circuit.add_qubit();

        let err = mcx_on_pattern(&mut circuit, &[(&a, 4)], flag).unwrap_err();
        assert!(matches!(err, IrError::ValueOutOfRange { value: 4, width: 2 }));
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_set_bits() {
        let mut circuit = Circuit::new("set");
        let r = circuit.add_qreg("r", 4);
        set_bits(&mut circuit, &r, 0b1010).unwrap();
        let targets: Vec<_> = circuit.instructions().iter().map(|i| i.qubits[0]).collect();
        assert_eq!(targets, vec![r.qubits()[1], r.qubits()[3]]);
    }
}
