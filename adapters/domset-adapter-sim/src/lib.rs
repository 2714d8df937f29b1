//! Local executors for domset gate programs.
//!
//! Two executors live here:
//!
//! - [`SimulatorBackend`]: a statevector simulator behind the
//!   [`domset_hal::Backend`] trait. It evolves the program once and samples
//!   shots from the resulting distribution over measured bits.
//! - [`BasisSimulator`]: a bit-level evaluator for programs without
//!   Hadamard gates, used to check oracle truth tables exhaustively.
//!
//! Both honour zero checkpoints: a checkpoint over a line that is not |0⟩
//! fails the run instead of producing corrupted results.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use domset_adapter_sim::SimulatorBackend;
//! use domset_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let result = backend.execute(&circuit, 1024).await?;
//! println!("Results: {:?}", result.counts.sorted());
//! ```

mod basis;
mod simulator;
mod statevector;

pub use basis::{BasisRun, BasisSimulator, BasisState};
pub use simulator::SimulatorBackend;
