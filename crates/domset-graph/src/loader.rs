//! Edge-list loading.
//!
//! Format: the first non-empty line holds the vertex count, every further
//! line holds two whitespace-separated vertex indices. Problems are
//! collected in a [`LoadReport`] rather than aborting the load:
//!
//! | Problem | Effect |
//! |---------|--------|
//! | fewer than two tokens on a line | line skipped |
//! | endpoint ≥ vertex count, or a self-loop | line skipped |
//! | token that is not an unsigned integer | loading stops, edges so far kept |
//! | missing or invalid vertex count | loading stops, empty graph |
//!
//! Only I/O failures are returned as errors.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Outcome of loading an edge list.
#[derive(Debug)]
pub struct LoadReport {
    /// Everything that was parsed successfully.
    pub graph: Graph,
    /// Problems found, in file order.
    pub issues: Vec<GraphError>,
    /// Whether loading stopped before the end of the input.
    pub truncated: bool,
}

impl LoadReport {
    /// Whether the input loaded without any issue.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && !self.truncated
    }

    fn record(&mut self, issue: GraphError) {
        warn!("{issue}");
        self.issues.push(issue);
    }
}

/// Parse an edge list held in memory.
pub fn parse_graph(text: &str) -> LoadReport {
    let lines = text.lines().map(|l| Ok(l.to_string()));
    // in-memory lines cannot fail
    load_lines(lines).unwrap_or_else(|e| LoadReport {
        graph: Graph::default(),
        issues: vec![e],
        truncated: true,
    })
}

/// Read an edge list from any buffered reader.
pub fn load_reader<R: BufRead>(reader: R) -> GraphResult<LoadReport> {
    load_lines(reader.lines())
}

/// Read an edge list from a file.
pub fn load_file(path: impl AsRef<Path>) -> GraphResult<LoadReport> {
    let path = path.as_ref();
    debug!("Loading graph from {}", path.display());
    let file = File::open(path)?;
    load_reader(BufReader::new(file))
}

fn parse_index(token: &str, line: usize, content: &str) -> GraphResult<usize> {
    token.parse::<usize>().map_err(|e| GraphError::Malformed {
        line,
        content: content.to_string(),
        reason: format!("'{token}' is not a vertex index ({e})"),
    })
}

fn load_lines<I>(lines: I) -> GraphResult<LoadReport>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut report = LoadReport {
        graph: Graph::default(),
        issues: Vec::new(),
        truncated: false,
    };
    let mut declared = false;

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line_no = index + 1;
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();

        if !declared {
            match parse_index(tokens[0], line_no, content) {
                Ok(n) => {
                    report.graph.declare(n);
                    declared = true;
                }
                Err(issue) => {
                    report.record(issue);
                    report.truncated = true;
                    return Ok(report);
                }
            }
            continue;
        }

        if tokens.len() < 2 {
            report.record(GraphError::Malformed {
                line: line_no,
                content: content.to_string(),
                reason: "expected two vertex indices".into(),
            });
            continue;
        }

        let endpoints = parse_index(tokens[0], line_no, content)
            .and_then(|u| parse_index(tokens[1], line_no, content).map(|v| (u, v)));
        let (u, v) = match endpoints {
            Ok(pair) => pair,
            Err(issue) => {
                report.record(issue);
                report.truncated = true;
                return Ok(report);
            }
        };

        if let Err(issue) = report.graph.add_edge(u, v) {
            report.record(issue);
        }
    }

    if !declared {
        report.record(GraphError::Malformed {
            line: 0,
            content: String::new(),
            reason: "missing vertex count".into(),
        });
        report.truncated = true;
    }

    debug!(
        "Loaded graph: {} vertices, {} edges, {} issues",
        report.graph.num_vertices(),
        report.graph.num_edges(),
        report.issues.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_clean_file() {
        let report = parse_graph("4\n0 1\n1 2\n0 2\n");
        assert!(report.is_clean());
        assert_eq!(report.graph, Graph::triangle_with_isolated());
    }

    #[test]
    fn test_blank_lines_and_extra_tokens() {
        let report = parse_graph("\n3\n\n0 1 ignored\n  1   2  \n");
        assert!(report.is_clean());
        assert_eq!(report.graph.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_out_of_range_is_skipped() {
        let report = parse_graph("3\n0 1\n0 5\n1 2\n");
        assert!(!report.truncated);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            report.issues[0],
            GraphError::OutOfRange { u: 0, v: 5, n: 3 }
        ));
        assert_eq!(report.graph.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_short_line_is_skipped() {
        let report = parse_graph("3\n0\n1 2\n");
        assert!(!report.truncated);
        assert!(matches!(report.issues[0], GraphError::Malformed { line: 2, .. }));
        assert_eq!(report.graph.edges(), vec![(1, 2)]);
    }

    #[test]
    fn test_bad_token_stops_loading() {
        let report = parse_graph("4\n0 1\nx 2\n2 3\n");
        assert!(report.truncated);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(report.issues[0], GraphError::Malformed { line: 3, .. }));
        assert_eq!(report.graph.num_vertices(), 4);
        assert_eq!(report.graph.edges(), vec![(0, 1)]);
    }

    #[test]
    fn test_bad_vertex_count() {
        let report = parse_graph("four\n0 1\n");
        assert!(report.truncated);
        assert_eq!(report.graph.num_vertices(), 0);

        let empty = parse_graph("");
        assert!(empty.truncated);
        assert_eq!(empty.issues.len(), 1);
    }

    #[test]
    fn test_self_loop_reported() {
        let report = parse_graph("2\n1 1\n0 1\n");
        assert!(matches!(report.issues[0], GraphError::SelfLoop(1)));
        assert_eq!(report.graph.num_edges(), 1);
    }

    #[test]
    fn test_reader_and_missing_file() {
        let report = load_reader(Cursor::new("2\n0 1\n")).unwrap();
        assert_eq!(report.graph.edges(), vec![(0, 1)]);

        let err = load_file("/nonexistent/graph.txt").unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
