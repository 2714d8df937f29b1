//! Reversible oracles for dominating-set search.
//!
//! Every emitter here appends gates to a [`domset_ir::Circuit`] that XOR a
//! classical predicate into a flag line, leaving all inputs and scratch lines
//! as they were. Emitting an oracle twice is therefore the identity, which is
//! how each layer uncomputes its own scratch.
//!
//! | Emitter | Effect |
//! |---------|--------|
//! | [`build_adjacency`] | `flag ^= [{a, b} ∈ E]` |
//! | [`dominates`] | `flag ^= [c == v ∨ {c, v} ∈ E]` |
//! | [`dominated`] | `result ^= OR_i dominates(A_i, v)` |
//! | [`all_dominated`] | `result ^= [A_0..A_{k-1} dominate G]` |
//!
//! # Example
//!
//! ```rust
//! use domset_graph::Graph;
//! use domset_ir::{AncillaSlice, Circuit};
//! use domset_oracle::{all_dominated, required_ancilla};
//!
//! let graph = Graph::triangle_with_isolated();
//! let bits = graph.node_bits() as u32;
//!
//! let mut circuit = Circuit::new("oracle");
//! let a0 = circuit.add_qreg("a0", bits);
//! let a1 = circuit.add_qreg("a1", bits);
//! let aux = circuit.add_qreg("aux", required_ancilla(4, 2) as u32);
//! let result = circuit.add_qubit();
//!
//! all_dominated(&mut circuit, &graph, &[a0, a1], &AncillaSlice::arena("aux", aux), result)
//!     .unwrap();
//! assert!(circuit.is_classical());
//! ```

pub mod adjacency;
pub mod domination;
pub mod error;

pub use adjacency::build_adjacency;
pub use domination::{all_dominated, dominated, dominates, required_ancilla};
pub use error::{OracleError, OracleResult};
