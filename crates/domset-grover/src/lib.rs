//! Grover amplitude amplification for dominating-set search.
//!
//! [`GroverSearch`] lays out `k` candidate registers of `node_bits(n)` lines
//! each, puts them in uniform superposition, and alternates the
//! [`domset_oracle::all_dominated`] oracle (phase kickback through a |−⟩
//! target) with the diffuser. The measured bit-strings are decoded back
//! into vertex assignments by [`SearchOutcome`].
//!
//! # Example
//!
//! ```rust,no_run
//! use domset_adapter_sim::SimulatorBackend;
//! use domset_graph::Graph;
//! use domset_grover::GroverSearch;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SimulatorBackend::new().with_seed(7);
//! let search = GroverSearch::new(Graph::triangle_with_isolated(), 2)
//!     .with_iterations(Some(1))
//!     .with_shots(512);
//!
//! let (_circuit, outcome) = search.run(&backend).await?;
//! for ranked in outcome.top(3) {
//!     println!("{:?}: {}", ranked.vertices, ranked.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diffuser;
pub mod error;
pub mod layout;
pub mod outcome;
pub mod search;

pub use config::{DEFAULT_SHOTS, SearchConfig};
pub use diffuser::apply_diffuser;
pub use error::{GroverError, GroverResult};
pub use layout::{SearchLayout, aux_width};
pub use outcome::{RankedAssignment, SearchOutcome};
pub use search::{GroverCircuit, GroverSearch, optimal_iterations};
