//! Statevector simulation engine.

use num_complex::Complex64;
use rustc_hash::FxHashMap;

use domset_ir::StandardGate;

/// Amplitudes below this magnitude squared are treated as zero.
pub(crate) const PROBABILITY_EPSILON: f64 = 1e-12;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply a gate. `qubits` lists controls first, target last.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::X | StandardGate::CX | StandardGate::CCX | StandardGate::MCX { .. } => {
                let Some((&target, controls)) = qubits.split_last() else {
                    return;
                };
                let ctrl_mask = controls.iter().fold(0usize, |m, &q| m | (1 << q));
                self.apply_controlled_x(ctrl_mask, target);
            }
        }
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Swap amplitude pairs on `target` where every control bit is set.
    ///
    /// An empty control mask is a plain X.
    fn apply_controlled_x(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Readout
    // =========================================================================

    /// Probability of finding any of `qubits` in |1⟩.
    pub fn excited_mass(&self, qubits: &[usize]) -> f64 {
        let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Distribution over classical bits given `(qubit, clbit)` measurements.
    ///
    /// The key has bit `c` set when clbit `c` reads 1. Clbits that are never
    /// written read 0.
    pub fn measured_distribution(&self, measurements: &[(usize, usize)]) -> FxHashMap<u64, f64> {
        let mut dist: FxHashMap<u64, f64> = FxHashMap::default();
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p < PROBABILITY_EPSILON {
                continue;
            }
            let mut key = 0u64;
            for &(qubit, clbit) in measurements {
                if (i >> qubit) & 1 == 1 {
                    key |= 1 << clbit;
                } else {
                    key &= !(1 << clbit);
                }
            }
            *dist.entry(key).or_insert(0.0) += p;
        }
        dist
    }

    /// Total probability; 1 up to rounding.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }
}
