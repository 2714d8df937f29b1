//! Undirected simple graphs and classical dominating-set checks.
//!
//! A set S of vertices dominates G when every vertex is in S or adjacent to
//! a member of S. Candidates here are ordered tuples of vertex indices: a
//! repeated index is allowed and simply covers the same vertices twice, and
//! an index ≥ n (an unused encoding) covers nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{GraphError, GraphResult};

/// Bits needed to encode one vertex index: `max(1, ⌈log2 n⌉)`.
pub fn node_bits(n: usize) -> usize {
    let bits = (usize::BITS - n.saturating_sub(1).leading_zeros()) as usize;
    bits.max(1)
}

/// An undirected graph without self-loops or parallel edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Sorted neighbour set per vertex.
    adjacency: Vec<BTreeSet<usize>>,
}

impl Graph {
    /// Create a graph with `n` vertices and no edges.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); n],
        }
    }

    /// Create a graph from an edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> GraphResult<Self> {
        let mut graph = Self::with_vertices(n);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Reset to `n` vertices, discarding every edge.
    pub fn declare(&mut self, n: usize) {
        self.adjacency = vec![BTreeSet::new(); n];
    }

    /// Insert the undirected edge {u, v}.
    ///
    /// Re-adding an existing edge is a no-op. The graph is left unchanged
    /// on error.
    pub fn add_edge(&mut self, u: usize, v: usize) -> GraphResult<()> {
        let n = self.num_vertices();
        if u >= n || v >= n {
            return Err(GraphError::OutOfRange { u, v, n });
        }
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
        Ok(())
    }

    /// Number of declared vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Whether {u, v} is an edge. Out-of-range indices are never adjacent.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|n| n.contains(&v))
    }

    /// Neighbours of `v` in ascending order (empty when out of range).
    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        self.adjacency
            .get(v)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every edge once as `(u, v)` with `u < v`, ascending.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, n)| n.range(u + 1..).map(move |&v| (u, v)))
            .collect()
    }

    /// Bits needed per vertex index for this graph.
    pub fn node_bits(&self) -> usize {
        node_bits(self.num_vertices())
    }

    // =========================================================================
    // Classical reference predicates
    // =========================================================================

    /// Whether candidate `c` covers vertex `v` (equal or adjacent).
    pub fn covers(&self, c: usize, v: usize) -> bool {
        (c == v && v < self.num_vertices()) || self.has_edge(c, v)
    }

    /// Whether every vertex is covered by some candidate.
    pub fn is_dominating(&self, candidates: &[usize]) -> bool {
        (0..self.num_vertices()).all(|v| candidates.iter().any(|&c| self.covers(c, v)))
    }

    /// Every ordered k-tuple of vertex encodings that dominates the graph.
    ///
    /// Encodings range over `0..2^node_bits`, so indices ≥ n appear in the
    /// enumeration (and cover nothing). Tuples are in lexicographic order
    /// with candidate 0 most significant.
    pub fn dominating_assignments(&self, k: usize) -> Vec<Vec<usize>> {
        let space = 1usize << self.node_bits();
        let mut out = Vec::new();
        let mut tuple = vec![0usize; k];
        loop {
            if self.is_dominating(&tuple) {
                out.push(tuple.clone());
            }
            // odometer increment, last position fastest
            let mut pos = k;
            loop {
                if pos == 0 {
                    return out;
                }
                pos -= 1;
                tuple[pos] += 1;
                if tuple[pos] < space {
                    break;
                }
                tuple[pos] = 0;
            }
        }
    }

    /// Size of a smallest dominating set, by exhaustive search.
    ///
    /// Returns `None` for graphs with more than 24 vertices.
    pub fn minimum_dominating_set_size(&self) -> Option<usize> {
        let n = self.num_vertices();
        if n > 24 {
            return None;
        }
        (0u32..(1 << n))
            .filter(|mask| {
                let members: Vec<usize> = (0..n).filter(|i| mask >> i & 1 == 1).collect();
                self.is_dominating(&members)
            })
            .map(|mask| mask.count_ones() as usize)
            .min()
    }

    // =========================================================================
    // Sample graphs
    // =========================================================================

    /// Triangle 0-1-2 plus an isolated vertex 3.
    ///
    /// ```text
    /// 0 --- 1
    ///  \   /
    ///    2      3
    /// ```
    pub fn triangle_with_isolated() -> Self {
        Self::sample(4, &[(0, 1), (1, 2), (0, 2)])
    }

    /// Path 0-1-...-(n-1).
    pub fn path(n: usize) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Self::sample(n, &edges)
    }

    /// Cycle 0-1-...-(n-1)-0. Fewer than three vertices gives a path.
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.adjacency[0].insert(n - 1);
            graph.adjacency[n - 1].insert(0);
        }
        graph
    }

    /// Star with centre 0 and `n - 1` leaves.
    pub fn star(n: usize) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (0, i)).collect();
        Self::sample(n, &edges)
    }

    /// Complete graph on `n` vertices.
    pub fn complete(n: usize) -> Self {
        let edges: Vec<_> = (0..n)
            .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
            .collect();
        Self::sample(n, &edges)
    }

    /// Build from edges known to be valid for `n`.
    fn sample(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::with_vertices(n);
        for &(u, v) in edges {
            graph.adjacency[u].insert(v);
            graph.adjacency[v].insert(u);
        }
        graph
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph ({} vertices, {} edges):",
            self.num_vertices(),
            self.num_edges()
        )?;
        for (v, neighbors) in self.adjacency.iter().enumerate() {
            let list: Vec<String> = neighbors.iter().map(ToString::to_string).collect();
            writeln!(f, "  {v}: [{}]", list.join(", "))?;
        }
        Ok(())
    }
}
