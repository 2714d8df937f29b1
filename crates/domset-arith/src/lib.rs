//! Reversible arithmetic on gate programs.
//!
//! Operands are [`QubitRegister`](domset_ir::QubitRegister)s read LSB first;
//! scratch comes in as an [`AncillaSlice`](domset_ir::AncillaSlice) and must
//! be |0⟩ on entry. Results are written into zeroed output registers.
//!
//! | Builder | Effect | Scratch |
//! |---------|--------|---------|
//! | [`add`] | `r = (a + b) mod 2^n` | `n`, left dirty |
//! | [`subtract`] | `r = (a - b) mod 2^n` | `n`, left dirty |
//! | [`greater_or_eq`] | `result ^= [a ≥ b]` | `2n`, left dirty |
//! | [`add_mod`] | same as [`add`]; no reduction | `n` |
//! | [`times_two_mod`] | `add_mod(a, a)` | `n` |
//!
//! # Example
//!
//! ```rust
//! use domset_arith::{add, set_bits};
//! use domset_ir::{AncillaSlice, Circuit};
//!
//! let mut circuit = Circuit::new("sum");
//! let a = circuit.add_qreg("a", 4);
//! let b = circuit.add_qreg("b", 4);
//! let r = circuit.add_qreg("r", 4);
//! let aux = AncillaSlice::arena("aux", circuit.add_qreg("aux", 4));
//!
//! set_bits(&mut circuit, &a, 2).unwrap();
//! set_bits(&mut circuit, &b, 3).unwrap();
//! add(&mut circuit, &a, &b, &r, &aux).unwrap();
//! assert!(circuit.is_classical());
//! ```

pub mod adder;
pub mod bits;
pub mod compare;
pub mod error;

pub use adder::{add, add_mod, full_adder, times_two_mod};
pub use bits::{copy, set_bits};
pub use compare::{greater_or_eq, subtract};
pub use error::{ArithError, ArithResult};
