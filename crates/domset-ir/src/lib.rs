//! Reversible gate program representation.
//!
//! This crate holds the data structures every other domset crate builds on:
//! qubit lines, register groups, the ordered instruction list, and the
//! ancilla arena that hands scratch lines to sub-routines.
//!
//! # Core Components
//!
//! - **Lines**: [`QubitId`], [`ClbitId`] address qubits and classical bits
//! - **Registers**: [`QubitRegister`] groups lines into an integer, LSB first
//! - **Gates**: [`StandardGate`] covers X, H, CX, CCX and MCX, all self-inverse
//! - **Program**: [`Circuit`] is an ordered, validated list of [`Instruction`]s
//! - **Scratch**: [`AncillaSlice`] carves an arena into explicit sub-ranges
//! - **Pattern control**: [`control::with_pattern`] restricts a block to fire
//!   only when registers equal given values
//!
//! # Example: a pattern-controlled toggle
//!
//! ```rust
//! use domset_ir::{Circuit, control};
//!
//! let mut circuit = Circuit::new("pattern");
//! let a = circuit.add_qreg("a", 2);
//! let flag = circuit.add_qubit();
//!
//! // flag ^= [a == 2]
//! control::mcx_on_pattern(&mut circuit, &[(&a, 2)], flag).unwrap();
//!
//! assert_eq!(circuit.num_gates(), 3); // x, ccx, x
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | NOT |
//! | `H` | 1 | Hadamard |
//! | `CX` | 2 | Controlled NOT |
//! | `CCX` | 3 | Toffoli |
//! | `MCX` | n+1 | NOT with n controls |

pub mod ancilla;
pub mod circuit;
pub mod control;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use ancilla::AncillaSlice;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
pub use register::{QubitRegister, encode_bits, ensure_same_width};
