//! Line qubits.
//!
//! Qubits live on a one-dimensional line. A qubit is identified by its
//! 0-based position on that line, which is also what the photonic layout
//! uses to derive its waveguide rails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qubit on the line, identified by its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit on the line.
    #[inline]
    pub fn position(self) -> u32 {
        self.0
    }

    /// Distance between two qubits on the line.
    #[inline]
    pub fn distance(self, other: QubitId) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// Two qubits are adjacent iff their positions differ by exactly one.
    ///
    /// Both device validation and the CNOT lowering rely on this predicate.
    #[inline]
    pub fn is_adjacent(self, other: QubitId) -> bool {
        self.distance(other) == 1
    }

    /// Create `count` qubits at positions `0..count`.
    pub fn range(count: u32) -> Vec<QubitId> {
        (0..count).map(QubitId).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
