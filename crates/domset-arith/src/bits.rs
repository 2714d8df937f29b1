//! Register loading, copying, and operand checks shared by the builders.

use domset_ir::{Circuit, QubitRegister, control};

use crate::error::{ArithError, ArithResult};

/// X on the lines of `register` whose bit in `value` is 1.
///
/// Fails with `ValueOutOfRange` when `value` does not fit.
pub fn set_bits(circuit: &mut Circuit, register: &QubitRegister, value: u64) -> ArithResult<()> {
    control::set_bits(circuit, register, value)?;
    Ok(())
}

/// `b[i] ^= a[i]` for every line. Copies `a` when `b` starts at zero.
pub fn copy(circuit: &mut Circuit, a: &QubitRegister, b: &QubitRegister) -> ArithResult<()> {
    same_width("copy", a, &[b])?;
    disjoint("copy", a, b)?;
    for (src, dst) in a.iter().zip(b.iter()) {
        circuit.cx(src, dst)?;
    }
    Ok(())
}

/// Width shared by `first` and every register in `rest`.
pub(crate) fn same_width(
    operation: &'static str,
    first: &QubitRegister,
    rest: &[&QubitRegister],
) -> ArithResult<usize> {
    let n = first.len();
    if n == 0 {
        return Err(ArithError::EmptyOperand(operation));
    }
    if let Some(other) = rest.iter().find(|r| r.len() != n) {
        return Err(ArithError::WidthMismatch {
            operation,
            expected: n,
            got: other.len(),
        });
    }
    Ok(n)
}

pub(crate) fn disjoint(
    operation: &'static str,
    a: &QubitRegister,
    b: &QubitRegister,
) -> ArithResult<()> {
    if a.overlaps(b) {
        return Err(ArithError::Overlap(operation));
    }
    Ok(())
}
