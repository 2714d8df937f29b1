//! Register groups: ordered lines that encode one integer.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// An ordered group of qubit lines representing one unsigned integer.
///
/// Line 0 carries the least-significant bit. Every builder in the workspace
/// (oracles, arithmetic, result decoding) relies on this ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRegister {
    /// The qubits in this register, ordered from LSB to MSB.
    qubits: Vec<QubitId>,
    /// Label for this register (for debugging/visualization).
    label: Option<String>,
}

impl QubitRegister {
    /// Create a register from existing qubits.
    pub fn from_qubits(qubits: Vec<QubitId>) -> Self {
        Self {
            qubits,
            label: None,
        }
    }

    /// Create a register with a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of qubits in this register.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Get the qubits in this register.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get a specific qubit by index.
    pub fn qubit(&self, index: usize) -> Option<QubitId> {
        self.qubits.get(index).copied()
    }

    /// Get the LSB qubit.
    pub fn lsb(&self) -> Option<QubitId> {
        self.qubits.first().copied()
    }

    /// Get the MSB qubit.
    pub fn msb(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }

    /// Get the label if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sub-register over `range` (bit positions, LSB-relative).
    pub fn slice(&self, range: Range<usize>) -> IrResult<QubitRegister> {
        if range.start > range.end || range.end > self.qubits.len() {
            return Err(IrError::Capacity {
                region: self.label().unwrap_or("register").to_string(),
                required: range.end,
                available: self.qubits.len(),
            });
        }
        Ok(QubitRegister::from_qubits(self.qubits[range].to_vec()))
    }

    /// Split the register at an index, returning (lower, upper).
    pub fn split_at(&self, index: usize) -> (QubitRegister, QubitRegister) {
        let (lower, upper) = self.qubits.split_at(index.min(self.qubits.len()));
        (
            QubitRegister::from_qubits(lower.to_vec()),
            QubitRegister::from_qubits(upper.to_vec()),
        )
    }

    /// Cut the register into consecutive groups of `width` lines.
    ///
    /// Fails unless the length is an exact multiple of `width`.
    pub fn chunks(&self, width: usize) -> IrResult<Vec<QubitRegister>> {
        if width == 0 || self.qubits.len() % width != 0 {
            return Err(IrError::WidthMismatch {
                context: "chunks".into(),
                left: self.qubits.len(),
                right: width,
            });
        }
        Ok(self
            .qubits
            .chunks(width)
            .map(|c| QubitRegister::from_qubits(c.to_vec()))
            .collect())
    }

    /// Concatenate two registers.
    pub fn concat(&self, other: &QubitRegister) -> QubitRegister {
        let mut qubits = self.qubits.clone();
        qubits.extend(other.qubits.iter().copied());
        QubitRegister::from_qubits(qubits)
    }

    /// Whether `qubit` is one of this register's lines.
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Whether the two registers share any line.
    pub fn overlaps(&self, other: &QubitRegister) -> bool {
        self.qubits.iter().any(|q| other.contains(*q))
    }

    /// Bits of `value` in register order, or an error if it does not fit.
    pub fn encode(&self, value: u64) -> IrResult<Vec<bool>> {
        encode_bits(value, self.qubits.len())
    }

    /// Iterate over qubits.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, QubitId>> {
        self.qubits.iter().copied()
    }
}

impl IntoIterator for QubitRegister {
    type Item = QubitId;
    type IntoIter = std::vec::IntoIter<QubitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.into_iter()
    }
}

impl<'a> IntoIterator for &'a QubitRegister {
    type Item = QubitId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, QubitId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.iter().copied()
    }
}

/// LSB-first bits of `value` over `width` positions.
pub fn encode_bits(value: u64, width: usize) -> IrResult<Vec<bool>> {
    if width < 64 && value >> width != 0 {
        return Err(IrError::ValueOutOfRange { value, width });
    }
    Ok((0..width).map(|i| i < 64 && (value >> i) & 1 == 1).collect())
}

/// Error unless both registers have the same width.
pub fn ensure_same_width(
    context: &str,
    left: &QubitRegister,
    right: &QubitRegister,
) -> IrResult<()> {
    if left.len() != right.len() {
        return Err(IrError::WidthMismatch {
            context: context.to_string(),
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
