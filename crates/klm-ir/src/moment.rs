//! Moments: operations that execute in the same logical time step.

use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// An ordered collection of operations considered to run concurrently.
///
/// The order of operations inside a moment is significant to the compiler:
/// it is the order photonic components are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    operations: Vec<Instruction>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a moment from operations, in the given order.
    pub fn from_operations(operations: impl IntoIterator<Item = Instruction>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }

    /// Operations in this moment, in insertion order.
    pub fn operations(&self) -> &[Instruction] {
        &self.operations
    }

    /// Check whether any operation in this moment touches `qubit`.
    pub fn operates_on(&self, qubit: QubitId) -> bool {
        self.operations.iter().any(|op| op.acts_on(qubit))
    }

    /// Check whether any operation in this moment touches any of `qubits`.
    pub fn operates_on_any(&self, qubits: &[QubitId]) -> bool {
        qubits.iter().any(|&q| self.operates_on(q))
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the moment has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub(crate) fn push(&mut self, instruction: Instruction) {
        self.operations.push(instruction);
    }
}
