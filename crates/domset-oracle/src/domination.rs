//! Domination oracle.
//!
//! Three layers, each self-inverse so that uncomputation is re-emission:
//!
//! - [`dominates`]: `flag ^= [c == v] ∨ [c ~ v]` for one candidate
//! - [`dominated`]: `result ^= OR_i dominates(A_i, v)` over all candidates,
//!   using one scratch flag per candidate
//! - [`all_dominated`]: `result ^= AND_v dominated(v)` over every vertex
//!
//! Scratch is carved from an [`AncillaSlice`] and must be |0⟩ on entry. Debug
//! builds emit a zero checkpoint there so executors can catch violations.

use tracing::debug;

use domset_graph::Graph;
use domset_ir::{AncillaSlice, Circuit, QubitId, QubitRegister, control, ensure_same_width};

use crate::adjacency::{build_adjacency, check_encodable};
use crate::error::{OracleError, OracleResult};

/// Minimum arena width [`all_dominated`] needs: vertex register, one
/// coverage flag per vertex, and one scratch flag per candidate.
pub fn required_ancilla(num_vertices: usize, num_candidates: usize) -> usize {
    domset_graph::node_bits(num_vertices) + num_vertices + num_candidates
}

/// Toggle `flag` when `candidate` equals `target` or is adjacent to it.
///
/// `target` is temporarily rewritten to the bitwise equality of the two
/// registers and restored before the adjacency block. The two conditions are
/// exclusive (there are no self-loops), so toggling for each in turn yields
/// their OR.
pub fn dominates(
    circuit: &mut Circuit,
    graph: &Graph,
    candidate: &QubitRegister,
    target: &QubitRegister,
    flag: QubitId,
) -> OracleResult<()> {
    ensure_same_width("dominates", candidate, target)?;
    check_encodable(graph, candidate.len())?;
    if candidate.overlaps(target) || candidate.contains(flag) || target.contains(flag) {
        return Err(OracleError::Overlap("dominates".into()));
    }

    // equality: target[j] := !(candidate[j] ^ target[j])
    for (c, t) in candidate.iter().zip(target.iter()) {
        circuit.cx(c, t)?;
        circuit.x(t)?;
    }
    circuit.mcx(target.iter(), flag)?;
    for (c, t) in candidate.iter().zip(target.iter()).rev() {
        circuit.x(t)?;
        circuit.cx(c, t)?;
    }

    build_adjacency(circuit, graph, candidate, target, flag)
}

/// Toggle `result` when some candidate dominates `target`.
///
/// The first `candidates.len()` lines of `scratch` hold per-candidate flags.
/// They are computed, OR-reduced into `result` through De Morgan
/// (`result ^= ¬AND(¬flags)`), and uncomputed, leaving scratch at |0⟩.
pub fn dominated(
    circuit: &mut Circuit,
    graph: &Graph,
    candidates: &[QubitRegister],
    target: &QubitRegister,
    scratch: &AncillaSlice,
    result: QubitId,
) -> OracleResult<()> {
    if candidates.is_empty() {
        return Err(OracleError::EmptyCandidates);
    }
    let (flags, _) = scratch.take(candidates.len(), "candidate-flags")?;
    flags.assert_clean(circuit)?;

    for (candidate, &flag) in candidates.iter().zip(flags.qubits()) {
        dominates(circuit, graph, candidate, target, flag)?;
    }

    // OR into result; result is intentionally left un-negated
    for &flag in flags.qubits() {
        circuit.x(flag)?;
    }
    circuit.x(result)?;
    circuit.mcx(flags.qubits().iter().copied(), result)?;
    for &flag in flags.qubits() {
        circuit.x(flag)?;
    }

    for (candidate, &flag) in candidates.iter().zip(flags.qubits()).rev() {
        dominates(circuit, graph, candidate, target, flag)?;
    }
    Ok(())
}

/// Toggle `result` when the candidates dominate every vertex of `graph`.
///
/// Arena layout, in order: a `node_bits(n)`-wide vertex register, `n`
/// coverage flags, then the scratch handed to [`dominated`]. The vertex loop
/// runs forward to compute the coverage flags and backward to uncompute them,
/// with the AND of all flags toggled into `result` in between.
pub fn all_dominated(
    circuit: &mut Circuit,
    graph: &Graph,
    candidates: &[QubitRegister],
    arena: &AncillaSlice,
    result: QubitId,
) -> OracleResult<()> {
    if candidates.is_empty() {
        return Err(OracleError::EmptyCandidates);
    }
    let n = graph.num_vertices();
    let bits = graph.node_bits();
    for candidate in candidates {
        if candidate.len() != bits {
            return Err(domset_ir::IrError::WidthMismatch {
                context: "all_dominated candidate".into(),
                left: candidate.len(),
                right: bits,
            }
            .into());
        }
    }

    let (vertex, rest) = arena.take(bits, "vertex")?;
    let (covered, inner) = rest.take(n, "covered")?;
    inner.require(candidates.len())?;
    debug!(
        "all_dominated: n={}, k={}, arena offset {} width {}",
        n,
        candidates.len(),
        arena.offset(),
        arena.len()
    );

    arena.assert_clean(circuit)?;

    let vertex_reg = vertex.lines();
    for v in 0..n {
        cover_vertex(circuit, graph, candidates, vertex_reg, &inner, covered.qubits()[v], v)?;
    }

    circuit.mcx(covered.qubits().iter().copied(), result)?;

    for v in (0..n).rev() {
        cover_vertex(circuit, graph, candidates, vertex_reg, &inner, covered.qubits()[v], v)?;
    }
    Ok(())
}

/// Load `v` into the vertex register, toggle its coverage flag, unload.
fn cover_vertex(
    circuit: &mut Circuit,
    graph: &Graph,
    candidates: &[QubitRegister],
    vertex: &QubitRegister,
    scratch: &AncillaSlice,
    flag: QubitId,
    v: usize,
) -> OracleResult<()> {
    control::set_bits(circuit, vertex, v as u64)?;
    dominated(circuit, graph, candidates, vertex, scratch, flag)?;
    control::set_bits(circuit, vertex, v as u64)?;
    Ok(())
}
