//! Statevector simulator backend.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use domset_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, Job, JobId, JobStatus,
};
use domset_ir::{Circuit, InstructionKind};

use crate::statevector::{PROBABILITY_EPSILON, Statevector};

/// Default qubit limit; 2^24 amplitudes is 256 MiB.
const DEFAULT_MAX_QUBITS: u32 = 24;

/// Largest residual allowed on a zero checkpoint.
const CHECKPOINT_TOLERANCE: f64 = 1e-9;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator backend.
///
/// The state is evolved once per job; shots are then drawn from the
/// distribution over the measured classical bits. Measurements must be
/// terminal: a gate touching an already-measured qubit is rejected.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Shot sampler.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("statevector"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Make shot sampling reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Exact probabilities of each measured bit-string, sorted by bit-string.
    ///
    /// Runs the same checks as `submit` (size, terminal measurement,
    /// zero checkpoints) without sampling.
    pub fn probabilities(&self, circuit: &Circuit) -> HalResult<Vec<(String, f64)>> {
        self.check_size(circuit)?;
        let dist = evolve(circuit)?;
        let mut out: Vec<(String, f64)> = dist
            .into_iter()
            .map(|(key, p)| (key_to_bitstring(key, circuit.num_clbits()), p))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if circuit.num_clbits() > 64 {
            return Err(HalError::Unsupported(format!(
                "{} classical bits; at most 64 can be sampled",
                circuit.num_clbits()
            )));
        }
        circuit
            .validate()
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            circuit.num_qubits(),
            circuit.instructions().len(),
            shots
        );

        let dist = evolve(circuit)?;
        let mut outcomes: Vec<(u64, f64)> = dist.into_iter().collect();
        outcomes.sort_by_key(|(key, _)| *key);

        let weights: Vec<f64> = outcomes.iter().map(|(_, p)| *p).collect();
        let sampler = WeightedIndex::new(&weights)
            .map_err(|e| HalError::Backend(format!("cannot sample distribution: {e}")))?;

        let mut tallies = vec![0u64; outcomes.len()];
        {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for _ in 0..shots {
                tallies[sampler.sample(&mut *rng)] += 1;
            }
        }

        let counts: Counts = outcomes
            .iter()
            .zip(tallies)
            .filter(|(_, n)| *n > 0)
            .map(|((key, _), n)| (key_to_bitstring(*key, circuit.num_clbits()), n))
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed.as_millis() as u64)
            .with_metadata("num_qubits", serde_json::json!(circuit.num_qubits())))
    }

    fn update_job(&self, job_id: &JobId, f: impl FnOnce(&mut SimJob)) {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            f(sim_job);
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Evolve the program and return the distribution over measured clbits.
fn evolve(circuit: &Circuit) -> HalResult<FxHashMap<u64, f64>> {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut measurements: Vec<(usize, usize)> = Vec::new();
    let mut measured: FxHashSet<usize> = FxHashSet::default();

    for (index, inst) in circuit.instructions().iter().enumerate() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                if let Some(q) = qubits.iter().find(|q| measured.contains(*q)) {
                    return Err(HalError::Unsupported(format!(
                        "gate '{}' at instruction {index} acts on measured qubit q{q}",
                        gate.name()
                    )));
                }
                sv.apply_gate(&gate.kind, &qubits);
            }
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    measured.insert(q.index());
                    measurements.push((q.index(), c.index()));
                }
            }
            InstructionKind::AssertZero => {
                let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                let mass = sv.excited_mass(&qubits);
                if mass > CHECKPOINT_TOLERANCE {
                    let lines: Vec<String> = inst.qubits.iter().map(|q| q.to_string()).collect();
                    return Err(HalError::AncillaNotClean {
                        instruction: index,
                        detail: format!("{:.3e} probability off |0⟩ on [{}]", mass, lines.join(", ")),
                    });
                }
            }
            InstructionKind::Barrier => {}
        }
    }

    let mut dist = sv.measured_distribution(&measurements);
    dist.retain(|_, p| *p >= PROBABILITY_EPSILON);
    Ok(dist)
}

/// Render a clbit key as a string, clbit 0 first.
fn key_to_bitstring(key: u64, num_clbits: usize) -> String {
    (0..num_clbits)
        .map(|c| if (key >> c) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested; allowed range is 1..={}",
                self.capabilities.max_shots
            )));
        }
        self.check_size(circuit)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }
        debug!("Submitted job: {}", job_id);

        self.update_job(&job_id, |j| j.job.transition(JobStatus::Running));
        match self.run_simulation(circuit, shots) {
            Ok(result) => self.update_job(&job_id, |j| {
                j.result = Some(result);
                j.job.transition(JobStatus::Completed);
            }),
            Err(e) => {
                warn!("Job {} failed: {}", job_id, e);
                self.update_job(&job_id, |j| j.job.transition(JobStatus::Failed(e.to_string())));
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result yet ({status})"
            ))),
        }
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .extra_u64("max_qubits")?
            .map_or(Ok(DEFAULT_MAX_QUBITS), u32::try_from)
            .map_err(|_| HalError::Configuration("max_qubits does not fit in u32".into()))?;
        let rng = match config.extra_u64("seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            capabilities: Capabilities::simulator(max_qubits),
            config,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(rng),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domset_ir::{ClbitId, QubitId};

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, DEFAULT_MAX_QUBITS);
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new().with_seed(11);

        let job_id = backend.submit(&bell(), 1000).await.unwrap();
        assert!(backend.status(&job_id).await.unwrap().is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_bitstrings_read_clbit_zero_first() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("order", 3, 3);
        circuit.x(QubitId(0)).unwrap();
        for i in 0..3 {
            circuit.measure(QubitId(i), ClbitId(i)).unwrap();
        }
        let result = backend.execute(&circuit, 10).await.unwrap();
        assert_eq!(result.counts.get("100"), 10);
    }

    #[tokio::test]
    async fn test_seeded_runs_repeat() {
        let a = SimulatorBackend::new().with_seed(5);
        let b = SimulatorBackend::new().with_seed(5);
        let ra = a.execute(&bell(), 200).await.unwrap();
        let rb = b.execute(&bell(), 200).await.unwrap();
        assert_eq!(ra.counts, rb.counts);
    }

    #[tokio::test]
    async fn test_exact_probabilities() {
        let backend = SimulatorBackend::new();
        let probs = backend.probabilities(&bell()).unwrap();
        assert_eq!(probs.len(), 2);
        assert_eq!(probs[0].0, "00");
        assert!((probs[0].1 - 0.5).abs() < 1e-12);
        assert_eq!(probs[1].0, "11");
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.submit(&circuit, 100).await;

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let result = backend.submit(&bell(), 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_dirty_checkpoint_fails_job() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("dirty", 2, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.assert_zero([QubitId(1)]).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let job_id = backend.submit(&circuit, 10).await.unwrap();
        assert!(matches!(
            backend.status(&job_id).await.unwrap(),
            JobStatus::Failed(_)
        ));
        match backend.wait(&job_id).await {
            Err(HalError::JobFailed(msg)) => assert!(msg.contains("Ancilla not clean")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gate_after_measure_rejected() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("mid", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();

        let err = backend.probabilities(&circuit).unwrap_err();
        assert!(matches!(err, HalError::Unsupported(_)));
    }

    fn with_operand(circuit: &Circuit, operand: serde_json::Value) -> Circuit {
        let mut value = serde_json::to_value(circuit).unwrap();
        value["instructions"][0]["qubits"] = operand;
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_out_of_range_operand_rejected() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("h", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        for operand in [serde_json::json!([5]), serde_json::json!([])] {
            let bad = with_operand(&circuit, operand);
            let err = backend.probabilities(&bad).unwrap_err();
            assert!(matches!(err, HalError::InvalidCircuit(_)));
            let err = backend.submit(&bad, 10).await.unwrap_err();
            assert!(matches!(err, HalError::InvalidCircuit(_)));
        }
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = BackendConfig::new("seeded")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(3));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.name(), "seeded");
        assert_eq!(backend.capabilities().num_qubits, 8);

        let bad = BackendConfig::new("bad").with_extra("seed", serde_json::json!("x"));
        assert!(SimulatorBackend::from_config(bad).is_err());
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let err = backend.status(&JobId::new("nope")).await.unwrap_err();
        assert!(matches!(err, HalError::JobNotFound(_)));
    }
}
