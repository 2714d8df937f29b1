//! Integration tests for the demo drivers.
//!
//! Every preset and arithmetic check is run end to end on a seeded
//! simulator so results are reproducible.

use domset_adapter_sim::SimulatorBackend;
use domset_demos::arithmetic::{comparison, modular_sum};
use domset_demos::experiments::Experiment;
use domset_graph::parse_graph;
use domset_grover::{GroverSearch, SearchConfig};
use domset_hal::Backend;

fn preset(experiment: Experiment, shots: u32) -> GroverSearch {
    GroverSearch::new(experiment.graph(), experiment.k())
        .with_iterations(experiment.iterations())
        .with_shots(shots)
}

#[tokio::test]
async fn test_triangle_experiment_finds_solutions() {
    let backend = SimulatorBackend::new().with_seed(11);
    let (_, outcome) = preset(Experiment::Triangle, 1000).run(&backend).await.unwrap();

    let best = &outcome.top(1)[0];
    assert!(best.dominating);
    assert!(best.vertices.contains(&3));
    assert!(outcome.marked_mass() > 0.7);
}

/// Half of the path assignments dominate, and one Grover round leaves a
/// half-marked space exactly where it started.
#[test]
fn test_path_experiment_is_half_marked() {
    let experiment = Experiment::Path;
    let graph = experiment.graph();
    assert_eq!(graph.dominating_assignments(2).len(), 8);

    let built = preset(experiment, 1).build().unwrap();
    let probabilities = SimulatorBackend::new().probabilities(&built.circuit).unwrap();
    let marked: f64 = probabilities
        .iter()
        .filter(|(bits, _)| {
            built
                .layout
                .decode(bits)
                .is_some_and(|v| graph.is_dominating(&v))
        })
        .map(|(_, p)| p)
        .sum();
    assert!((marked - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_cycle_experiment_finds_nothing() {
    let backend = SimulatorBackend::new().with_seed(5);
    let (circuit, outcome) = preset(Experiment::Cycle, 500).run(&backend).await.unwrap();

    assert_eq!(circuit.num_qubits(), 11);
    assert_eq!(outcome.marked_mass(), 0.0);
    assert!(outcome.top(4).iter().all(|r| !r.dominating));
}

#[tokio::test]
async fn test_loaded_graph_with_config() {
    let report = parse_graph("4\n0 1\n1 2\n0 2\n");
    assert!(report.is_clean());

    let config = SearchConfig::from_json(r#"{"shots": 300, "iterations": 1, "seed": 2}"#).unwrap();
    let backend = SimulatorBackend::new().with_seed(config.seed.unwrap());
    let search = GroverSearch::from_config(report.graph, 2, &config);
    let (_, outcome) = search.run(&backend).await.unwrap();

    assert_eq!(outcome.counts().total_shots(), 300);
    assert!(outcome.marked_mass() > 0.5);
}

#[tokio::test]
async fn test_arithmetic_checks_are_deterministic() {
    let backend = SimulatorBackend::new();
    for check in [
        comparison(7, 3, 4).unwrap(),
        comparison(3, 7, 4).unwrap(),
        modular_sum(2, 3, 15, 4).unwrap(),
    ] {
        let result = backend.execute(&check.circuit, 64).await.unwrap();
        assert_eq!(result.counts.get(&check.expected), 64, "{}", check.label);
    }
}
