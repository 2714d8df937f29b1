//! Search program construction and execution.

use std::f64::consts::FRAC_PI_4;

use tracing::{debug, info};

use domset_graph::Graph;
use domset_hal::Backend;
use domset_ir::Circuit;
use domset_oracle::all_dominated;

use crate::config::{DEFAULT_SHOTS, SearchConfig};
use crate::diffuser::apply_diffuser;
use crate::error::{GroverError, GroverResult};
use crate::layout::SearchLayout;
use crate::outcome::SearchOutcome;

/// `floor(π/4 · sqrt(2^lines))`, the iteration count for one marked state
/// among `2^lines`.
pub fn optimal_iterations(input_lines: usize) -> usize {
    let space = 2f64.powi(input_lines as i32);
    (FRAC_PI_4 * space.sqrt()).floor() as usize
}

/// A built search program.
#[derive(Debug, Clone)]
pub struct GroverCircuit {
    /// The full program, measurements included.
    pub circuit: Circuit,
    /// Register placement.
    pub layout: SearchLayout,
    /// Oracle + diffuser rounds emitted.
    pub iterations: usize,
}

/// Grover search for a dominating assignment of `k` candidates.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    graph: Graph,
    k: usize,
    iterations: Option<usize>,
    shots: u32,
}

impl GroverSearch {
    /// Search `graph` for `k` candidates that dominate it.
    pub fn new(graph: Graph, k: usize) -> Self {
        Self {
            graph,
            k,
            iterations: None,
            shots: DEFAULT_SHOTS,
        }
    }

    /// Take iterations and shots from a configuration.
    pub fn from_config(graph: Graph, k: usize, config: &SearchConfig) -> Self {
        Self::new(graph, k)
            .with_iterations(config.iterations)
            .with_shots(config.shots)
    }

    /// Fix the iteration count; `None` picks [`optimal_iterations`].
    pub fn with_iterations(mut self, iterations: Option<usize>) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// The graph being searched.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of candidates.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of shots.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Width of the input register.
    pub fn input_lines(&self) -> usize {
        self.k * self.graph.node_bits()
    }

    /// Iterations the program will run.
    pub fn iterations(&self) -> usize {
        self.iterations
            .unwrap_or_else(|| optimal_iterations(self.input_lines()))
    }

    fn validate(&self) -> GroverResult<()> {
        if self.graph.num_vertices() == 0 {
            return Err(GroverError::InvalidProblem("graph has no vertices".into()));
        }
        if self.k == 0 {
            return Err(GroverError::InvalidProblem(
                "at least one candidate is required".into(),
            ));
        }
        if self.input_lines() > 64 {
            return Err(GroverError::InvalidProblem(format!(
                "{} input lines cannot be measured into one bit-string key",
                self.input_lines()
            )));
        }
        Ok(())
    }

    /// Build the full program.
    ///
    /// Superposition over the input, the phase target prepared in |−⟩, then
    /// `iterations` rounds of oracle and diffuser, then measurement of the
    /// input.
    pub fn build(&self) -> GroverResult<GroverCircuit> {
        self.validate()?;
        let n = self.graph.num_vertices();
        let iterations = self.iterations();

        let mut circuit = Circuit::new(format!("domset_n{n}_k{}", self.k));
        let layout = SearchLayout::allocate(&mut circuit, n, self.k);
        let arena = layout.arena();

        circuit.h_all(&layout.input)?;
        circuit.x(layout.target)?.h(layout.target)?;

        for round in 0..iterations {
            all_dominated(
                &mut circuit,
                &self.graph,
                &layout.candidates,
                &arena,
                layout.target,
            )?;
            apply_diffuser(&mut circuit, &layout.input)?;
            debug!("Grover round {}: {} instructions", round + 1, circuit.instructions().len());
        }

        circuit.measure_register(&layout.input, &layout.meas)?;

        debug!(
            "Built search program: {} qubits, {} gates, {} iterations",
            circuit.num_qubits(),
            circuit.num_gates(),
            iterations
        );
        Ok(GroverCircuit {
            circuit,
            layout,
            iterations,
        })
    }

    /// Build the program, execute it on `backend`, and decode the counts.
    pub async fn run<B>(&self, backend: &B) -> GroverResult<(Circuit, SearchOutcome)>
    where
        B: Backend + ?Sized,
    {
        let built = self.build()?;
        info!(
            "Running search on {}: n={}, k={}, {} iterations, {} shots",
            backend.name(),
            self.graph.num_vertices(),
            self.k,
            built.iterations,
            self.shots
        );

        let result = backend.execute(&built.circuit, self.shots).await?;
        let outcome = SearchOutcome::new(self.graph.clone(), built.layout, result.counts);
        info!("Marked mass: {:.3}", outcome.marked_mass());
        Ok((built.circuit, outcome))
    }
}
