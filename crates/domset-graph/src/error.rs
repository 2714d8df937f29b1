//! Error types for the graph crate.

use thiserror::Error;

/// Errors raised while building or loading a graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge endpoint is not a declared vertex.
    #[error("Edge ({u}, {v}) is out of range for a graph with {n} vertices")]
    OutOfRange {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Number of declared vertices.
        n: usize,
    },

    /// An edge from a vertex to itself.
    #[error("Self-loop on vertex {0} is not allowed")]
    SelfLoop(usize),

    /// A line of an edge-list file could not be parsed.
    #[error("Malformed input on line {line}: {reason} ({content:?})")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// What was wrong with it.
        reason: String,
    },

    /// I/O error while reading a graph file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
