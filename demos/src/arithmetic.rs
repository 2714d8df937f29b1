//! Comparator and adder checks on small registers.

use domset_arith::{ArithResult, add_mod, greater_or_eq, set_bits};
use domset_ir::{AncillaSlice, Circuit};

/// A circuit together with the bit-string it should always produce.
#[derive(Debug, Clone)]
pub struct ArithmeticCheck {
    /// What is being computed, e.g. `7 >= 3`.
    pub label: String,
    /// Program with constants loaded and the answer measured.
    pub circuit: Circuit,
    /// Expected measurement, clbit 0 first.
    pub expected: String,
}

fn bitstring(value: u64, width: u32) -> String {
    (0..width)
        .map(|i| if value >> i & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// `a >= b` into one measured bit.
pub fn comparison(a: u64, b: u64, width: u32) -> ArithResult<ArithmeticCheck> {
    let mut circuit = Circuit::new("greater_or_eq");
    let ra = circuit.add_qreg("a", width);
    let rb = circuit.add_qreg("b", width);
    let result = circuit.add_qubit();
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 2 * width));
    let c = circuit.add_creg("c", 1);

    set_bits(&mut circuit, &ra, a)?;
    set_bits(&mut circuit, &rb, b)?;
    greater_or_eq(&mut circuit, &ra, &rb, result, &aux)?;
    circuit.measure(result, c[0])?;

    Ok(ArithmeticCheck {
        label: format!("{a} >= {b}"),
        circuit,
        expected: if a >= b { "1" } else { "0" }.to_string(),
    })
}

/// `(a + b) mod modulus` into a measured register.
///
/// The modular adder does not reduce, so the expectation is the plain sum
/// truncated to the register width.
pub fn modular_sum(a: u64, b: u64, modulus: u64, width: u32) -> ArithResult<ArithmeticCheck> {
    let mut circuit = Circuit::new("add_mod");
    let rn = circuit.add_qreg("n", width);
    let ra = circuit.add_qreg("a", width);
    let rb = circuit.add_qreg("b", width);
    let sum = circuit.add_qreg("sum", width);
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", width));
    let c = circuit.add_creg("c_sum", width);

    set_bits(&mut circuit, &ra, a)?;
    set_bits(&mut circuit, &rb, b)?;
    set_bits(&mut circuit, &rn, modulus)?;
    add_mod(&mut circuit, &rn, &ra, &rb, &sum, &aux)?;
    circuit.measure_register(&sum, &c)?;

    let mask = 1u64.checked_shl(width).map_or(u64::MAX, |m| m - 1);
    Ok(ArithmeticCheck {
        label: format!("{a} + {b} (mod {modulus})"),
        circuit,
        expected: bitstring(a.wrapping_add(b) & mask, width),
    })
}
