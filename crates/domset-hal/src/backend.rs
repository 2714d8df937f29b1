//! Backend trait and configuration.
//!
//! The [`Backend`] trait is the hand-off between program construction and
//! execution:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! [`Backend::execute`] strings these together for callers that only want
//! the counts of one program.
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `validate()` | async | provided | `HalResult<ValidationResult>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<ExecutionResult>` |
//! | `wait()` | async | provided | `HalResult<ExecutionResult>` |
//! | `execute()` | async | provided | `HalResult<ExecutionResult>` |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use domset_ir::{Circuit, InstructionKind};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Interval between status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration (`max_qubits`, `seed`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned extra entry, failing if it has the wrong type.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!("'{key}' must be an unsigned integer, got {value}"))
            }),
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for program executors.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; cache it at construction.
/// - `submit()` returns a `JobId` for a job that starts out `Queued`.
/// - `result()` is only valid once `status()` reports `Completed`.
/// - `wait()` polls until the job is terminal. There is no timeout.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    ///
    /// The default checks qubit count and gate support.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(check_capabilities(self.capabilities(), circuit))
    }

    /// Submit a circuit for execution.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Wait for a job to reach a terminal state and return its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        loop {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
    }

    /// Validate, submit and wait for one program.
    async fn execute(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }
        let job_id = self.submit(circuit, shots).await?;
        debug!("Waiting for job {job_id} on {}", self.name());
        self.wait(&job_id).await
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be submitted as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Check qubit count and gate support.
pub fn check_capabilities(caps: &Capabilities, circuit: &Circuit) -> ValidationResult {
    let mut reasons = Vec::new();

    if circuit.num_qubits() > caps.num_qubits as usize {
        reasons.push(format!(
            "circuit has {} qubits but {} supports {}",
            circuit.num_qubits(),
            caps.name,
            caps.num_qubits
        ));
    }

    for inst in circuit.instructions() {
        if let InstructionKind::Gate(gate) = &inst.kind {
            if !caps.gate_set.contains(gate.name()) {
                reasons.push(format!("gate '{}' is not supported", gate.name()));
                break;
            }
        }
    }

    if reasons.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid { reasons }
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use std::sync::Mutex;

    /// Reports `Queued`, then `Running`, then `Completed`.
    struct SlowBackend {
        caps: Capabilities,
        polls: Mutex<u32>,
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::new("slow-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let mut polls = self.polls.lock().unwrap();
            *polls += 1;
            Ok(match *polls {
                1 => JobStatus::Queued,
                2 => JobStatus::Running,
                _ => JobStatus::Completed,
            })
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let mut counts = Counts::new();
            counts.insert("1", 8);
            Ok(ExecutionResult::new(counts, 8))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_terminal() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(4),
            polls: Mutex::new(0),
        };
        let mut circuit = Circuit::with_size("t", 1, 1);
        circuit.x(domset_ir::QubitId(0)).unwrap();

        let result = backend.execute(&circuit, 8).await.unwrap();
        assert_eq!(result.counts.get("1"), 8);
        assert_eq!(*backend.polls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_execute_rejects_oversized_circuit() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(2),
            polls: Mutex::new(0),
        };
        let circuit = Circuit::with_size("t", 5, 0);
        let err = backend.execute(&circuit, 8).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidCircuit(_)));
    }

    #[test]
    fn test_config_extra() {
        let config = BackendConfig::from_json(r#"{"name": "sim", "max_qubits": 12, "seed": "x"}"#)
            .unwrap();
        assert_eq!(config.name, "sim");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_u64("missing").unwrap(), None);
        assert!(matches!(
            config.extra_u64("seed"),
            Err(HalError::Configuration(_))
        ));
    }
}
