//! Line allocation for the search program.
//!
//! Qubit order is fixed: the input register (candidate 0 first, each
//! candidate LSB first), then the oracle arena, then the phase target.
//! Measurement bit `i` records input line `i`.

use serde::Serialize;

use domset_graph::node_bits;
use domset_ir::{AncillaSlice, Circuit, ClbitId, QubitId, QubitRegister};

/// Arena width reserved for `n` vertices and `k` candidates.
///
/// At least [`domset_oracle::required_ancilla`], with two candidate flags
/// kept even for a single candidate.
pub fn aux_width(n: usize, k: usize) -> usize {
    node_bits(n) + n + k.max(2)
}

/// Where everything lives in a search program.
#[derive(Debug, Clone, Serialize)]
pub struct SearchLayout {
    /// Number of candidates.
    pub k: usize,
    /// Bits per candidate.
    pub node_bits: usize,
    /// All candidate lines, `k * node_bits` wide.
    pub input: QubitRegister,
    /// One register per candidate, slices of `input`.
    pub candidates: Vec<QubitRegister>,
    /// Oracle scratch.
    pub aux: QubitRegister,
    /// Phase kickback line.
    pub target: QubitId,
    /// Classical bits holding the measured input.
    pub meas: Vec<ClbitId>,
}

impl SearchLayout {
    /// Allocate registers for `k` candidates over `n` vertices in `circuit`.
    pub fn allocate(circuit: &mut Circuit, n: usize, k: usize) -> Self {
        let bits = node_bits(n);
        let input = circuit.add_qreg("input", (k * bits) as u32);
        let candidates = (0..k)
            .map(|i| {
                let (_, tail) = input.split_at(i * bits);
                let (head, _) = tail.split_at(bits);
                head.with_label(format!("a{i}"))
            })
            .collect();
        let aux = circuit.add_qreg("aux", aux_width(n, k) as u32);
        let target = circuit.add_qubit();
        let meas = circuit.add_creg("meas", (k * bits) as u32);

        Self {
            k,
            node_bits: bits,
            input,
            candidates,
            aux,
            target,
            meas,
        }
    }

    /// The oracle arena.
    pub fn arena(&self) -> AncillaSlice {
        AncillaSlice::arena("aux", self.aux.clone())
    }

    /// Total qubit lines.
    pub fn num_qubits(&self) -> usize {
        self.input.len() + self.aux.len() + 1
    }

    /// Decode a clbit-0-first bit-string into one vertex encoding per
    /// candidate. `None` when the string has the wrong length or a
    /// character other than `0`/`1`.
    pub fn decode(&self, bitstring: &str) -> Option<Vec<usize>> {
        let bits = bitstring.as_bytes();
        if bits.len() != self.k * self.node_bits {
            return None;
        }
        bits.chunks(self.node_bits)
            .map(|chunk| {
                chunk.iter().enumerate().try_fold(0usize, |acc, (j, c)| match c {
                    b'0' => Some(acc),
                    b'1' => Some(acc | 1 << j),
                    _ => None,
                })
            })
            .collect()
    }

    /// Encode candidate values as the bit-string the measurement produces.
    pub fn encode(&self, values: &[usize]) -> String {
        values
            .iter()
            .flat_map(|&v| (0..self.node_bits).map(move |j| if v >> j & 1 == 1 { '1' } else { '0' }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aux_width() {
        assert_eq!(aux_width(4, 2), 2 + 4 + 2);
        assert_eq!(aux_width(4, 1), 2 + 4 + 2);
        assert_eq!(aux_width(6, 3), 3 + 6 + 3);
        assert!(aux_width(6, 3) >= domset_oracle::required_ancilla(6, 3));
    }

    #[test]
    fn test_allocation_order() {
        let mut circuit = Circuit::new("layout");
        let layout = SearchLayout::allocate(&mut circuit, 4, 2);

        assert_eq!(layout.input.len(), 4);
        assert_eq!(layout.candidates[1].qubits(), &[QubitId(2), QubitId(3)]);
        assert_eq!(layout.candidates[1].label(), Some("a1"));
        assert_eq!(layout.aux.qubits()[0], QubitId(4));
        assert_eq!(layout.target, QubitId(12));
        assert_eq!(layout.num_qubits(), 13);
        assert_eq!(circuit.num_qubits(), 13);
        assert_eq!(circuit.num_clbits(), 4);
    }

    #[test]
    fn test_decode_is_lsb_first_per_candidate() {
        let mut circuit = Circuit::new("layout");
        let layout = SearchLayout::allocate(&mut circuit, 4, 2);

        // candidate 0 = 3 ("11"), candidate 1 = 2 ("01")
        assert_eq!(layout.decode("1101"), Some(vec![3, 2]));
        assert_eq!(layout.encode(&[3, 2]), "1101");
        assert_eq!(layout.decode("110"), None);
        assert_eq!(layout.decode("11x1"), None);
    }
}
