//! KLM Circuit Intermediate Representation
//!
//! This crate provides the logical circuit model consumed by the photonic
//! compiler in `klm-compile`.
//!
//! # Overview
//!
//! Qubits sit on a line and are identified by their position ([`QubitId`]).
//! A [`Circuit`] is an ordered list of [`Moment`]s, and each moment is an
//! ordered list of [`Instruction`]s that execute in the same time step.
//! Moment order, then instruction order, is the order the compiler emits
//! photonic components in, so the IR never reorders anything.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use klm_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(1), QubitId(0)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//!
//! Only `H`, `X` and `CX` have a photonic lowering today.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod moment;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use moment::Moment;
pub use qubit::QubitId;
