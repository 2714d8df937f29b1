//! Inversion about the mean.

use domset_ir::{Circuit, IrResult, QubitRegister};

/// Apply the Grover diffuser to `register`.
///
/// H and X on every line turn the all-zero state into all-ones. A
/// multi-controlled Z on that state (H · MCX · H on the last line) flips its
/// phase, and the X and H layers are undone. Up to a global phase this is
/// `2|s⟩⟨s| - I`.
pub fn apply_diffuser(circuit: &mut Circuit, register: &QubitRegister) -> IrResult<()> {
    let Some(last) = register.msb() else {
        return Ok(());
    };
    let others = &register.qubits()[..register.len() - 1];

    circuit.h_all(register)?.x_all(register)?;
    circuit.h(last)?;
    circuit.mcx(others.iter().copied(), last)?;
    circuit.h(last)?;
    circuit.x_all(register)?.h_all(register)?;
    Ok(())
}
