//! Executor interface for domset gate programs.
//!
//! Program construction never runs anything itself. It hands a finished
//! [`domset_ir::Circuit`] to a [`Backend`] and gets [`Counts`] back:
//!
//! - [`Backend`]: async job lifecycle (submit, status, result) with
//!   provided [`Backend::wait`] and [`Backend::execute`]
//! - [`Capabilities`]: qubit limit and supported gates
//! - [`ExecutionResult`] / [`Counts`]: measured bit-strings, clbit 0 first
//! - [`BackendConfig`] / [`BackendFactory`]: construction from JSON config
//!
//! # Example
//!
//! ```ignore
//! use domset_hal::Backend;
//! use domset_adapter_sim::SimulatorBackend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let result = backend.execute(&circuit, 1024).await?;
//! if let Some((bitstring, count)) = result.counts.most_frequent() {
//!     println!("Most frequent: {bitstring} ({count} times)");
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{
    Backend, BackendConfig, BackendFactory, POLL_INTERVAL, ValidationResult, check_capabilities,
};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
