//! KLM Photonic Compiler
//!
//! This crate lowers logical circuits from `klm-ir` into photonic assembly:
//! a flat list of waveguide crossings and directional couplers placed on
//! numbered rails, following the Knill-Laflamme-Milburn linear-optics
//! protocol.
//!
//! # Overview
//!
//! Every qubit is dual-rail encoded. The qubit at line position `p` owns
//! rails `2p` (input) and `2p + 1` (output). Gates are lowered as follows:
//!
//! | Gate | Photonic lowering |
//! |------|-------------------|
//! | `H` | One 50/50 directional coupler on the qubit's rails |
//! | `X` | One waveguide crossing of the qubit's rails |
//! | `CX` | Five couplers, wrapped in a crossing network when the operands are not neighbours |
//!
//! Everything else is skipped with a warning.
//!
//! # Architecture
//!
//! ```text
//! CircuitSource ──► Circuit
//!                     │
//!                     ├── DeviceConstraints (Report / Enforce)
//!                     ├── CircuitPass*
//!                     ▼
//!               GateOp ──► ProtocolLowering ──► Block
//!                     │
//!                     ├── ProgramPass*
//!                     ▼
//!                  Program ──► render() ──► ProgramSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use klm_compile::{Compiler, KlmDevice, MemorySink, Protocol};
//! use klm_ir::Circuit;
//!
//! let circuit = Circuit::bell().unwrap();
//! let mut sink = MemorySink::new();
//!
//! Compiler::new(Protocol::Klm)
//!     .compile_to(&circuit, &KlmDevice::new(2), &mut sink)
//!     .unwrap();
//!
//! assert!(sink.text().starts_with(".text\n    _init:\n        nop"));
//! assert!(sink.text().contains("directional_standard 5 20 0.4 15 (1,0) (1,0)"));
//! ```

pub mod compiler;
pub mod component;
pub mod device;
pub mod error;
pub mod gates;
pub mod klm;
pub mod layout;
pub mod parts;
pub mod pass;
pub mod program;
pub mod protocol;
pub mod sink;
pub mod source;
pub mod swap;

pub use compiler::{Compiler, ValidationPolicy, pass_failed};
pub use component::{Block, ComponentInstance, Port, PortPair, ProgramLine};
pub use device::{DeviceConstraints, KlmDevice};
pub use error::{CompileError, CompileResult, ConstraintViolation};
pub use gates::{CnotGate, GateOp, HadamardGate, PauliXGate, translate};
pub use klm::KlmLowering;
pub use layout::RailPair;
pub use parts::Part;
pub use pass::{CircuitPass, IdentityPass, PassKind, ProgramPass};
pub use program::Program;
pub use protocol::{Protocol, ProtocolLowering};
pub use sink::{DEFAULT_OUTPUT, FileSink, MemorySink, ProgramSink};
pub use source::{BuiltinCircuit, CircuitSource, JsonCircuitFile};
pub use swap::swap_network;
