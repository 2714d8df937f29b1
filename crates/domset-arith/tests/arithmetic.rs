//! Arithmetic builders checked against integer arithmetic.

use domset_adapter_sim::{BasisSimulator, BasisState, SimulatorBackend};
use domset_arith::{add, add_mod, greater_or_eq, set_bits, subtract, times_two_mod};
use domset_hal::Backend;
use domset_ir::{AncillaSlice, Circuit, QubitRegister};
use proptest::prelude::*;

const WIDTH: u32 = 4;

struct Binary {
    circuit: Circuit,
    a: QubitRegister,
    b: QubitRegister,
    r: QubitRegister,
    aux: AncillaSlice,
}

fn binary(width: u32, aux: u32) -> Binary {
    let mut circuit = Circuit::new("binary");
    let a = circuit.add_qreg("a", width);
    let b = circuit.add_qreg("b", width);
    let r = circuit.add_qreg("r", width);
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", aux));
    Binary {
        circuit,
        a,
        b,
        r,
        aux,
    }
}

fn run(op: &Binary, a: u64, b: u64) -> BasisState {
    let mut state = BasisState::for_circuit(&op.circuit);
    state.set_register(&op.a, a);
    state.set_register(&op.b, b);
    BasisSimulator::new().run(&op.circuit, state).unwrap().state
}

#[test]
fn add_exhaustive_four_bit() {
    let mut op = binary(WIDTH, WIDTH);
    add(&mut op.circuit, &op.a, &op.b, &op.r, &op.aux).unwrap();

    for a in 0..16 {
        for b in 0..16 {
            let out = run(&op, a, b);
            assert_eq!(out.register_value(&op.r), (a + b) % 16, "{a} + {b}");
            assert_eq!(out.register_value(&op.a), a);
            assert_eq!(out.register_value(&op.b), b);
        }
    }
}

#[test]
fn subtract_exhaustive_four_bit() {
    let mut op = binary(WIDTH, WIDTH);
    subtract(&mut op.circuit, &op.a, &op.b, &op.r, &op.aux).unwrap();
    let last_carry = op.aux.qubits()[WIDTH as usize - 1];

    for a in 0..16 {
        for b in 0..16 {
            let out = run(&op, a, b);
            assert_eq!(out.register_value(&op.r), (a + 16 - b) % 16, "{a} - {b}");
            assert_eq!(out.get(last_carry), a >= b);
            assert_eq!(out.register_value(&op.b), b, "b restored");
        }
    }
}

#[test]
fn greater_or_eq_exhaustive_four_bit() {
    let mut circuit = Circuit::new("cmp");
    let a = circuit.add_qreg("a", WIDTH);
    let b = circuit.add_qreg("b", WIDTH);
    let result = circuit.add_qubit();
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 2 * WIDTH + 2));
    greater_or_eq(&mut circuit, &a, &b, result, &aux).unwrap();

    for x in 0..16 {
        for y in 0..16 {
            let mut state = BasisState::for_circuit(&circuit);
            state.set_register(&a, x);
            state.set_register(&b, y);
            let out = BasisSimulator::new().run(&circuit, state).unwrap().state;
            assert_eq!(out.get(result), x >= y, "{x} >= {y}");
        }
    }
}

#[test]
fn add_mod_is_plain_addition() {
    let mut op = binary(WIDTH, WIDTH);
    let modulus = op.circuit.add_qreg("n", WIDTH);
    set_bits(&mut op.circuit, &modulus, 5).unwrap();
    add_mod(&mut op.circuit, &modulus, &op.a, &op.b, &op.r, &op.aux).unwrap();

    // 4 + 3 = 7 with modulus 5: no reduction happens
    let out = run(&op, 4, 3);
    assert_eq!(out.register_value(&op.r), 7);
}

#[test]
fn times_two_mod_doubles() {
    let mut op = binary(WIDTH, WIDTH);
    let modulus = op.circuit.add_qreg("n", WIDTH);
    times_two_mod(&mut op.circuit, &modulus, &op.a, &op.r, &op.aux).unwrap();

    for a in 0..16 {
        let out = run(&op, a, 0);
        assert_eq!(out.register_value(&op.r), (2 * a) % 16);
    }
}

#[tokio::test]
async fn seven_at_least_three_on_statevector() {
    let mut circuit = Circuit::new("ge");
    let a = circuit.add_qreg("a", WIDTH);
    let b = circuit.add_qreg("b", WIDTH);
    let result = circuit.add_qubit();
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 2 * WIDTH));
    let c = circuit.add_creg("c", 1);

    set_bits(&mut circuit, &a, 7).unwrap();
    set_bits(&mut circuit, &b, 3).unwrap();
    greater_or_eq(&mut circuit, &a, &b, result, &aux).unwrap();
    circuit.measure(result, c[0]).unwrap();

    let backend = SimulatorBackend::new().with_seed(3);
    let exec = backend.execute(&circuit, 256).await.unwrap();
    assert_eq!(exec.counts.get("1"), 256);
}

#[tokio::test]
async fn two_plus_three_on_statevector() {
    let mut circuit = Circuit::new("add_mod");
    let modulus = circuit.add_qreg("n", WIDTH);
    let a = circuit.add_qreg("a", WIDTH);
    let b = circuit.add_qreg("b", WIDTH);
    let sum = circuit.add_qreg("sum", WIDTH);
    let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", WIDTH));
    let c = circuit.add_creg("c_sum", WIDTH);

    set_bits(&mut circuit, &a, 2).unwrap();
    set_bits(&mut circuit, &b, 3).unwrap();
    set_bits(&mut circuit, &modulus, 15).unwrap();
    add_mod(&mut circuit, &modulus, &a, &b, &sum, &aux).unwrap();
    circuit.measure_register(&sum, &c).unwrap();

    let backend = SimulatorBackend::new();
    let exec = backend.execute(&circuit, 100).await.unwrap();
    // 5 read clbit 0 first
    assert_eq!(exec.counts.most_frequent(), Some(("1010", 100)));
}

proptest! {
    #[test]
    fn add_and_compare_any_width(width in 1u32..=6, x in any::<u64>(), y in any::<u64>()) {
        let mask = (1u64 << width) - 1;
        let (x, y) = (x & mask, y & mask);

        let mut op = binary(width, width);
        add(&mut op.circuit, &op.a, &op.b, &op.r, &op.aux).unwrap();
        let out = run(&op, x, y);
        prop_assert_eq!(out.register_value(&op.r), (x + y) & mask);

        let mut circuit = Circuit::new("cmp");
        let a = circuit.add_qreg("a", width);
        let b = circuit.add_qreg("b", width);
        let result = circuit.add_qubit();
        let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 2 * width));
        greater_or_eq(&mut circuit, &a, &b, result, &aux).unwrap();

        let mut state = BasisState::for_circuit(&circuit);
        state.set_register(&a, x);
        state.set_register(&b, y);
        let out = BasisSimulator::new().run(&circuit, state).unwrap().state;
        prop_assert_eq!(out.get(result), x >= y);
    }
}
