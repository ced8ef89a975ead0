//! Device constraints checked before compilation.

use klm_ir::{Circuit, Instruction, InstructionKind, StandardGate};
use tracing::debug;

use crate::error::ConstraintViolation;

/// Structural constraints of a photonic device.
pub trait DeviceConstraints {
    /// Device name.
    fn name(&self) -> &str;

    /// Number of line qubits the device provides.
    fn num_qubits(&self) -> u32;

    /// Check a single operation.
    fn validate_operation(&self, operation: &Instruction) -> Result<(), ConstraintViolation>;

    /// Check every operation of a circuit, stopping at the first violation.
    fn validate_circuit(&self, circuit: &Circuit) -> Result<(), ConstraintViolation> {
        for operation in circuit.operations() {
            self.validate_operation(operation)?;
        }
        debug!(device = self.name(), "Circuit satisfies device constraints");
        Ok(())
    }
}

/// A linear-optics device running the KLM protocol.
///
/// Accepts CNOT, X, H and measurements, and only lets two-qubit
/// operations act on neighbouring qubits.
#[derive(Debug, Clone)]
pub struct KlmDevice {
    num_qubits: u32,
}

impl KlmDevice {
    /// Create a device with `num_qubits` line qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self { num_qubits }
    }
}

impl DeviceConstraints for KlmDevice {
    fn name(&self) -> &str {
        "klm"
    }

    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn validate_operation(&self, operation: &Instruction) -> Result<(), ConstraintViolation> {
        match &operation.kind {
            InstructionKind::Gate(StandardGate::CX | StandardGate::X | StandardGate::H)
            | InstructionKind::Measure { .. } => {}
            InstructionKind::Gate(gate) => {
                return Err(ConstraintViolation::UnsupportedGate {
                    gate: gate.name().to_string(),
                });
            }
            InstructionKind::Barrier => {
                return Err(ConstraintViolation::UnsupportedOperation {
                    operation: operation.to_string(),
                });
            }
        }

        if let Some(&qubit) = operation
            .qubits
            .iter()
            .find(|q| q.position() >= self.num_qubits)
        {
            return Err(ConstraintViolation::QubitOutOfRange {
                operation: operation.to_string(),
                qubit,
                available: self.num_qubits,
            });
        }

        if let &[p, q] = operation.qubits.as_slice() {
            if !p.is_adjacent(q) {
                return Err(ConstraintViolation::NonLocalInteraction {
                    operation: operation.to_string(),
                });
            }
        }

        Ok(())
    }
}
