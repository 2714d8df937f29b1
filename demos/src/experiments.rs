//! Preset search problems.

use clap::ValueEnum;
use serde::Serialize;

use domset_graph::Graph;

/// Built-in experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Experiment {
    /// Triangle 0-1-2 plus isolated vertex 3, two candidates, one iteration.
    Triangle,
    /// Path 0-1-2-3, two candidates, one iteration.
    Path,
    /// Square 0-1-2-3-0 with a single candidate: no solution exists.
    Cycle,
}

impl Experiment {
    /// The graph searched.
    pub fn graph(self) -> Graph {
        match self {
            Experiment::Triangle => Graph::triangle_with_isolated(),
            Experiment::Path => Graph::path(4),
            Experiment::Cycle => Graph::cycle(4),
        }
    }

    /// Number of candidates.
    pub fn k(self) -> usize {
        match self {
            Experiment::Triangle | Experiment::Path => 2,
            Experiment::Cycle => 1,
        }
    }

    /// Fixed iteration count, or `None` for the default.
    pub fn iterations(self) -> Option<usize> {
        match self {
            Experiment::Triangle | Experiment::Path => Some(1),
            Experiment::Cycle => None,
        }
    }

    /// One-line description.
    pub fn title(self) -> &'static str {
        match self {
            Experiment::Triangle => "Triangle + isolated vertex (k=2)",
            Experiment::Path => "Path on 4 vertices (k=2)",
            Experiment::Cycle => "Square cycle (k=1, no solution)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_their_descriptions() {
        assert_eq!(Experiment::Triangle.graph().minimum_dominating_set_size(), Some(2));
        assert_eq!(Experiment::Path.graph().minimum_dominating_set_size(), Some(2));
        assert!(Experiment::Cycle.graph().dominating_assignments(1).is_empty());
    }
}
