//! Two's-complement subtraction and the comparison built on it.

use domset_ir::{AncillaSlice, Circuit, QubitId, QubitRegister};

use crate::adder::full_adder;
use crate::bits::{disjoint, same_width};
use crate::error::{ArithError, ArithResult};

/// `r = a + ¬b + 1`, i.e. `(a - b) mod 2^n`, with `r` starting at zero.
///
/// Carries go to the first `n` lines of `aux`; the last of them is set
/// exactly when `a ≥ b`. `b` is inverted for the duration and restored.
pub fn subtract(
    circuit: &mut Circuit,
    a: &QubitRegister,
    b: &QubitRegister,
    r: &QubitRegister,
    aux: &AncillaSlice,
) -> ArithResult<()> {
    let n = same_width("subtract", a, &[b, r])?;
    disjoint("subtract", a, b)?;
    disjoint("subtract", a, r)?;
    disjoint("subtract", b, r)?;
    let (carries, _) = aux.take(n, "borrow")?;
    for line in [a, b, r] {
        disjoint("subtract", line, carries.lines())?;
    }

    let carry = carries.qubits();
    let (a_bits, b_bits, r_bits) = (a.qubits(), b.qubits(), r.qubits());

    circuit.x_all(b)?;

    // bit 0 with carry-in 1: carry = a ∨ ¬b, sum = ¬(a ⊕ ¬b)
    circuit.x(a_bits[0])?.x(b_bits[0])?;
    circuit.ccx(a_bits[0], b_bits[0], carry[0])?;
    circuit.x(carry[0])?;
    circuit.x(a_bits[0])?.x(b_bits[0])?;

    circuit.cx(a_bits[0], b_bits[0])?;
    circuit.x(b_bits[0])?;
    circuit.cx(b_bits[0], r_bits[0])?;
    circuit.x(b_bits[0])?;
    circuit.cx(a_bits[0], b_bits[0])?;

    for i in 1..n {
        full_adder(circuit, a_bits[i], b_bits[i], r_bits[i], carry[i - 1], carry[i])?;
    }

    circuit.x_all(b)?;
    Ok(())
}

/// `result ^= [a ≥ b]`.
///
/// Runs [`subtract`] with the difference in `aux[0..n]` and carries in
/// `aux[n..2n]`, then copies the final carry out. Both halves of `aux` are
/// left holding the subtraction.
pub fn greater_or_eq(
    circuit: &mut Circuit,
    a: &QubitRegister,
    b: &QubitRegister,
    result: QubitId,
    aux: &AncillaSlice,
) -> ArithResult<()> {
    let n = same_width("greater_or_eq", a, &[b])?;
    let (difference, rest) = aux.take(n, "difference")?;
    let (carries, _) = rest.take(n, "borrow")?;
    if [a, b, difference.lines(), carries.lines()]
        .iter()
        .any(|r| r.contains(result))
    {
        return Err(ArithError::Overlap("greater_or_eq"));
    }
    difference.assert_clean(circuit)?;
    carries.assert_clean(circuit)?;

    subtract(circuit, a, b, difference.lines(), &carries)?;
    circuit.cx(carries.qubits()[n - 1], result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domset_ir::IrError;

    #[test]
    fn test_comparison_scratch_size() {
        let mut circuit = Circuit::new("cmp");
        let a = circuit.add_qreg("a", 3);
        let b = circuit.add_qreg("b", 3);
        let res = circuit.add_qubit();
        let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 5));

        let err = greater_or_eq(&mut circuit, &a, &b, res, &aux).unwrap_err();
        assert!(matches!(
            err,
            ArithError::Ir(IrError::Capacity {
                required: 3,
                available: 2,
                ..
            })
        ));
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_subtract_restores_b_gates() {
        let mut circuit = Circuit::new("sub");
        let a = circuit.add_qreg("a", 1);
        let b = circuit.add_qreg("b", 1);
        let r = circuit.add_qreg("r", 1);
        let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 1));
        subtract(&mut circuit, &a, &b, &r, &aux).unwrap();

        // an even number of X on b keeps it unchanged on every input
        let x_on_b = circuit
            .instructions()
            .iter()
            .filter(|i| i.name() == "x" && i.qubits[0] == b.qubits()[0])
            .count();
        assert_eq!(x_on_b % 2, 0);
    }

    #[test]
    fn test_subtract_rejects_shared_lines() {
        let mut circuit = Circuit::new("sub");
        let a = circuit.add_qreg("a", 2);
        let r = circuit.add_qreg("r", 2);
        let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 2));
        assert!(matches!(
            subtract(&mut circuit, &a, &a, &r, &aux),
            Err(ArithError::Overlap("subtract"))
        ));
    }
}
