//! Adjacency oracle: `flag ^= [{a, b} ∈ E]`.

use domset_graph::Graph;
use domset_ir::{Circuit, QubitId, QubitRegister, control, ensure_same_width};

use crate::error::{OracleError, OracleResult};

/// Error unless every vertex of `graph` fits in `width` bits.
pub(crate) fn check_encodable(graph: &Graph, width: usize) -> OracleResult<()> {
    let n = graph.num_vertices();
    if n > 0 && width < 64 && (n - 1) >> width != 0 {
        return Err(OracleError::VertexNotEncodable {
            vertex: n - 1,
            width,
        });
    }
    Ok(())
}

/// Toggle `flag` when registers `a` and `b` hold the two ends of an edge.
///
/// Each edge {u, v} (u < v, ascending) contributes two pattern-controlled
/// toggles, one for `(a, b) == (u, v)` and one for `(a, b) == (v, u)`. On a
/// basis state at most one of them fires. `a` and `b` are restored, so
/// emitting this twice is the identity.
pub fn build_adjacency(
    circuit: &mut Circuit,
    graph: &Graph,
    a: &QubitRegister,
    b: &QubitRegister,
    flag: QubitId,
) -> OracleResult<()> {
    ensure_same_width("adjacency", a, b)?;
    check_encodable(graph, a.len())?;
    if a.overlaps(b) || a.contains(flag) || b.contains(flag) {
        return Err(OracleError::Overlap("adjacency".into()));
    }

    for (u, v) in graph.edges() {
        control::mcx_on_pattern(circuit, &[(a, u as u64), (b, v as u64)], flag)?;
        control::mcx_on_pattern(circuit, &[(a, v as u64), (b, u as u64)], flag)?;
    }
    Ok(())
}
