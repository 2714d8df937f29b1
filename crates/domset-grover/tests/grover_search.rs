//! End-to-end search runs on the statevector simulator.

use domset_adapter_sim::SimulatorBackend;
use domset_graph::Graph;
use domset_grover::{GroverError, GroverSearch};
use domset_hal::HalError;

fn exact(search: &GroverSearch) -> (Vec<(String, f64)>, domset_grover::SearchLayout) {
    let built = search.build().unwrap();
    let probabilities = SimulatorBackend::new().probabilities(&built.circuit).unwrap();
    (probabilities, built.layout)
}

#[test]
fn triangle_one_iteration_amplifies_solutions() {
    let graph = Graph::triangle_with_isolated();
    let search = GroverSearch::new(graph.clone(), 2).with_iterations(Some(1));
    let (probabilities, layout) = exact(&search);

    let total: f64 = probabilities.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let marked: f64 = probabilities
        .iter()
        .filter(|(bits, _)| graph.is_dominating(&layout.decode(bits).unwrap()))
        .map(|(_, p)| p)
        .sum();
    // six marked states of sixteen: sin²(3θ) with sin²θ = 6/16
    let theta = (6.0f64 / 16.0).sqrt().asin();
    assert!((marked - (3.0 * theta).sin().powi(2)).abs() < 1e-9);
    assert!(marked > 0.8);

    for solution in graph.dominating_assignments(2) {
        let key = layout.encode(&solution);
        let p = probabilities
            .iter()
            .find(|(bits, _)| *bits == key)
            .map_or(0.0, |(_, p)| *p);
        assert!(p > 1.0 / 16.0, "{solution:?} not amplified: {p}");
    }
}

#[test]
fn four_cycle_single_candidate_stays_uniform() {
    let graph = Graph::cycle(4);
    let search = GroverSearch::new(graph, 1);
    assert_eq!(search.iterations(), 1);

    let built = search.build().unwrap();
    assert_eq!(built.circuit.num_qubits(), 11);

    let probabilities = SimulatorBackend::new().probabilities(&built.circuit).unwrap();
    assert_eq!(probabilities.len(), 4);
    for (bits, p) in probabilities {
        assert!((p - 0.25).abs() < 1e-9, "{bits}: {p}");
    }
}

#[tokio::test]
async fn seeded_run_concentrates_shots() {
    let backend = SimulatorBackend::new().with_seed(42);
    let search = GroverSearch::new(Graph::triangle_with_isolated(), 2)
        .with_iterations(Some(1))
        .with_shots(2000);

    let (circuit, outcome) = search.run(&backend).await.unwrap();
    assert_eq!(circuit.num_clbits(), 4);
    assert_eq!(outcome.counts().total_shots(), 2000);

    // expected 0.844; 2000 shots keep the estimate well above 0.75
    assert!(outcome.marked_mass() > 0.75);
    assert!(outcome.marked_mass() > outcome.baseline_mass());

    let top = outcome.top(6);
    assert!(top.iter().all(|r| r.dominating && r.valid));
}

#[tokio::test]
async fn four_cycle_shot_counts_stay_flat() {
    let backend = SimulatorBackend::new().with_seed(1);
    let search = GroverSearch::new(Graph::cycle(4), 1).with_shots(4000);
    let (_, outcome) = search.run(&backend).await.unwrap();

    assert_eq!(outcome.marked_mass(), 0.0);
    for vertex in 0..4 {
        let count = outcome.frequency(&[vertex]);
        // mean 1000, standard deviation about 27
        assert!((850..=1150).contains(&count), "vertex {vertex}: {count}");
    }
}

#[tokio::test]
async fn oversized_program_is_rejected_by_backend() {
    let backend = SimulatorBackend::with_max_qubits(8);
    let search = GroverSearch::new(Graph::path(3), 1);
    let err = search.run(&backend).await.unwrap_err();
    assert!(matches!(
        err,
        GroverError::Hal(HalError::InvalidCircuit(_) | HalError::CircuitTooLarge(_))
    ));
}
