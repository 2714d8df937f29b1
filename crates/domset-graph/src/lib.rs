//! Graph model for the dominating-set search.
//!
//! - [`Graph`]: vertices `0..n` with sorted, symmetric adjacency, no
//!   self-loops and no parallel edges
//! - [`loader`]: edge-list parsing that reports and skips bad lines
//! - classical predicates ([`Graph::is_dominating`],
//!   [`Graph::dominating_assignments`]) used as the reference the quantum
//!   oracle is checked against
//!
//! # Example
//!
//! ```rust
//! use domset_graph::{Graph, node_bits};
//!
//! let mut graph = Graph::with_vertices(4);
//! graph.add_edge(0, 1).unwrap();
//! graph.add_edge(1, 2).unwrap();
//! graph.add_edge(0, 2).unwrap();
//!
//! assert_eq!(graph, Graph::triangle_with_isolated());
//! assert_eq!(node_bits(graph.num_vertices()), 2);
//! assert!(graph.is_dominating(&[3, 1]));
//! ```

pub mod error;
pub mod graph;
pub mod loader;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, node_bits};
pub use loader::{LoadReport, load_file, load_reader, parse_graph};
