//! Ancilla arena with explicit sub-ranges.
//!
//! Scratch lines live in one flat register. Each sub-routine receives a
//! slice `(offset, len)` of it and carves its own pieces with
//! [`AncillaSlice::take`], so overlapping use of scratch shows up as a
//! capacity error at build time rather than as a silently shared line.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;
use crate::register::QubitRegister;

/// A contiguous range of ancilla lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaSlice {
    region: String,
    offset: usize,
    lines: QubitRegister,
}

impl AncillaSlice {
    /// Wrap a whole register as the root of an arena.
    pub fn arena(region: impl Into<String>, lines: QubitRegister) -> Self {
        Self {
            region: region.into(),
            offset: 0,
            lines,
        }
    }

    /// Name of the region this slice was carved for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Offset of the first line relative to the arena root.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of lines in this slice.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the slice has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines as a register.
    pub fn lines(&self) -> &QubitRegister {
        &self.lines
    }

    /// The lines as a slice of ids.
    pub fn qubits(&self) -> &[QubitId] {
        self.lines.qubits()
    }

    /// Error unless at least `width` lines are available.
    pub fn require(&self, width: usize) -> IrResult<()> {
        if self.len() < width {
            return Err(IrError::Capacity {
                region: self.region.clone(),
                required: width,
                available: self.len(),
            });
        }
        Ok(())
    }

    /// Split off the first `width` lines for `purpose`.
    ///
    /// Returns `(head, rest)`. `rest` keeps this slice's region name.
    pub fn take(&self, width: usize, purpose: &str) -> IrResult<(AncillaSlice, AncillaSlice)> {
        self.require(width)?;
        let (head, rest) = self.lines.split_at(width);
        Ok((
            AncillaSlice {
                region: format!("{}/{purpose}", self.region),
                offset: self.offset,
                lines: head,
            },
            AncillaSlice {
                region: self.region.clone(),
                offset: self.offset + width,
                lines: rest,
            },
        ))
    }

    /// Record that every line of this slice is |0⟩ at this point.
    ///
    /// Only emitted in debug builds; release programs carry no checkpoints.
    pub fn assert_clean(&self, circuit: &mut Circuit) -> IrResult<()> {
        if cfg!(debug_assertions) && !self.is_empty() {
            circuit.assert_zero(self.lines.iter())?;
        }
        Ok(())
    }
}
