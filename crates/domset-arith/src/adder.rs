//! Ripple-carry addition.
//!
//! The carry chain lives in caller-provided scratch and is left set after
//! the sum is produced. Callers that need the scratch back must uncompute it
//! themselves.

use tracing::debug;

use domset_ir::{AncillaSlice, Circuit, QubitId, QubitRegister};

use crate::bits::{copy, disjoint, same_width};
use crate::error::{ArithError, ArithResult};

/// One full-adder cell.
///
/// `c_out ^= maj(a, b, c_in)` and `r ^= a ⊕ b ⊕ c_in`. `b` is used as
/// scratch for `a ⊕ b` and restored.
pub fn full_adder(
    circuit: &mut Circuit,
    a: QubitId,
    b: QubitId,
    r: QubitId,
    c_in: QubitId,
    c_out: QubitId,
) -> ArithResult<()> {
    circuit.ccx(a, b, c_out)?;
    circuit.cx(a, b)?;
    circuit.ccx(b, c_in, c_out)?;
    circuit.cx(b, r)?;
    circuit.cx(c_in, r)?;
    circuit.cx(a, b)?;
    Ok(())
}

/// `r = (a + b) mod 2^n`, with `r` starting at zero.
///
/// `b` is copied into `r` and `a` is rippled in, with carries in the first
/// `n` lines of `aux`. `a` and `b` may be the same register.
pub fn add(
    circuit: &mut Circuit,
    a: &QubitRegister,
    b: &QubitRegister,
    r: &QubitRegister,
    aux: &AncillaSlice,
) -> ArithResult<()> {
    let n = same_width("add", a, &[b, r])?;
    disjoint("add", a, r)?;
    disjoint("add", b, r)?;
    let (carries, _) = aux.take(n, "carries")?;
    for line in [a, b, r] {
        disjoint("add", line, carries.lines())?;
    }
    carries.assert_clean(circuit)?;

    copy(circuit, b, r)?;

    let carry = carries.qubits();
    let (a, r) = (a.qubits(), r.qubits());
    circuit.ccx(a[0], r[0], carry[0])?;
    circuit.cx(a[0], r[0])?;
    for i in 1..n {
        circuit.ccx(a[i], r[i], carry[i])?;
        circuit.ccx(a[i], carry[i - 1], carry[i])?;
        circuit.ccx(r[i], carry[i - 1], carry[i])?;
        circuit.cx(a[i], r[i])?;
        circuit.cx(carry[i - 1], r[i])?;
    }

    debug!("Emitted {n}-bit adder");
    Ok(())
}

/// Modular addition placeholder: the same as [`add`].
///
/// `modulus` is checked for width only. No reduction is performed, so the
/// result is `(a + b) mod 2^n`, which matches `(a + b) mod N` only when the
/// sum is below `N`.
pub fn add_mod(
    circuit: &mut Circuit,
    modulus: &QubitRegister,
    a: &QubitRegister,
    b: &QubitRegister,
    r: &QubitRegister,
    aux: &AncillaSlice,
) -> ArithResult<()> {
    if modulus.len() != a.len() {
        return Err(ArithError::WidthMismatch {
            operation: "add_mod",
            expected: a.len(),
            got: modulus.len(),
        });
    }
    add(circuit, a, b, r, aux)
}

/// `add_mod(modulus, a, a, r, aux)`, with the same limitation.
pub fn times_two_mod(
    circuit: &mut Circuit,
    modulus: &QubitRegister,
    a: &QubitRegister,
    r: &QubitRegister,
    aux: &AncillaSlice,
) -> ArithResult<()> {
    add_mod(circuit, modulus, a, a, r, aux)
}
