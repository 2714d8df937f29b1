//! Measured counts read back as candidate assignments.

use serde::Serialize;

use domset_graph::Graph;
use domset_hal::Counts;

use crate::layout::SearchLayout;

/// One measured assignment with its frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAssignment {
    /// Raw bit-string, clbit 0 first.
    pub bitstring: String,
    /// Decoded vertex encoding per candidate.
    pub vertices: Vec<usize>,
    /// Shots that produced this outcome.
    pub count: u64,
    /// Relative frequency.
    pub probability: f64,
    /// Every encoding names a real vertex.
    pub valid: bool,
    /// The assignment dominates the graph.
    pub dominating: bool,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    graph: Graph,
    layout: SearchLayout,
    counts: Counts,
}

impl SearchOutcome {
    /// Wrap the counts a backend returned for a search program.
    pub fn new(graph: Graph, layout: SearchLayout, counts: Counts) -> Self {
        Self {
            graph,
            layout,
            counts,
        }
    }

    /// The raw counts.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// The layout the program was built with.
    pub fn layout(&self) -> &SearchLayout {
        &self.layout
    }

    /// Decode a bit-string into one vertex encoding per candidate.
    pub fn decode(&self, bitstring: &str) -> Option<Vec<usize>> {
        self.layout.decode(bitstring)
    }

    /// Whether every encoding names a vertex of the graph.
    pub fn is_valid(&self, vertices: &[usize]) -> bool {
        vertices.iter().all(|&v| v < self.graph.num_vertices())
    }

    /// Observations of the given assignment.
    pub fn frequency(&self, vertices: &[usize]) -> u64 {
        self.counts.get(&self.layout.encode(vertices))
    }

    /// The `n` most frequent assignments.
    pub fn top(&self, n: usize) -> Vec<RankedAssignment> {
        let total = self.counts.total_shots().max(1) as f64;
        self.counts
            .sorted()
            .into_iter()
            .filter_map(|(bitstring, count)| {
                let vertices = self.decode(bitstring)?;
                Some(RankedAssignment {
                    bitstring: bitstring.to_string(),
                    valid: self.is_valid(&vertices),
                    dominating: self.graph.is_dominating(&vertices),
                    vertices,
                    count,
                    probability: count as f64 / total,
                })
            })
            .take(n)
            .collect()
    }

    /// Fraction of shots that landed on a dominating assignment.
    pub fn marked_mass(&self) -> f64 {
        let total = self.counts.total_shots();
        if total == 0 {
            return 0.0;
        }
        let marked: u64 = self
            .counts
            .iter()
            .filter(|(bitstring, _)| {
                self.decode(bitstring)
                    .is_some_and(|v| self.graph.is_dominating(&v))
            })
            .map(|(_, &count)| count)
            .sum();
        marked as f64 / total as f64
    }

    /// Fraction a uniformly random assignment would be expected to hit.
    pub fn baseline_mass(&self) -> f64 {
        let marked = self.graph.dominating_assignments(self.layout.k).len();
        marked as f64 / (1u64 << self.layout.input.len()) as f64
    }
}
