//! Error types for the compilation crate.

use std::path::PathBuf;

use klm_ir::QubitId;
use thiserror::Error;

/// A device rejected an operation of the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintViolation {
    /// The instruction kind is not something the device can execute.
    #[error("{operation} is not a supported operation")]
    UnsupportedOperation {
        /// Rendered operation.
        operation: String,
    },

    /// The gate is not in the device's gate set.
    #[error("{gate} is not a supported gate")]
    UnsupportedGate {
        /// Gate name.
        gate: String,
    },

    /// A qubit lies outside the device's line.
    #[error("{operation} uses {qubit}, but the device only has {available} qubits")]
    QubitOutOfRange {
        /// Rendered operation.
        operation: String,
        /// Offending qubit.
        qubit: QubitId,
        /// Device size.
        available: u32,
    },

    /// A two-qubit operation acts on qubits that are not neighbours.
    #[error("Non-local interaction: {operation}")]
    NonLocalInteraction {
        /// Rendered operation.
        operation: String,
    },
}

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] klm_ir::IrError),

    /// Device validation failed and the policy makes that fatal.
    #[error("Constraint violation: {0}")]
    Constraint(#[from] ConstraintViolation),

    /// Swap network requested with non-normalized endpoints.
    #[error("Malformed swap input: lower position {low} exceeds upper position {upper}")]
    MalformedSwapInput {
        /// Requested lower position.
        low: u32,
        /// Requested upper position.
        upper: u32,
    },

    /// The circuit source could not produce a circuit.
    #[error("Circuit source '{name}' failed: {reason}")]
    Source {
        /// Source name.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// Writing the compiled program failed.
    #[error("Failed to write program to {}: {source}", .path.display())]
    Sink {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A pass failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Pass name.
        name: String,
        /// Failure reason.
        reason: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
