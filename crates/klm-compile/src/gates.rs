//! Gate translators.
//!
//! Instructions are adapted into the closed [`GateOp`] type at the IR
//! boundary. Each supported kind then has a translator that lowers it
//! through the protocol's [`ProtocolLowering`](crate::protocol::ProtocolLowering).

use klm_ir::{Instruction, InstructionKind, QubitId, StandardGate};

use crate::component::Block;
use crate::error::CompileResult;
use crate::protocol::Protocol;

/// A logical operation, as far as the photonic compiler is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOp {
    /// Controlled-NOT.
    Cnot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Hadamard.
    H(QubitId),
    /// Pauli-X.
    X(QubitId),
    /// Anything without a photonic lowering.
    Unsupported {
        /// Name of the original instruction.
        name: String,
    },
}

impl GateOp {
    /// Check if the operation has a lowering.
    pub fn is_supported(&self) -> bool {
        !matches!(self, GateOp::Unsupported { .. })
    }
}

impl From<&Instruction> for GateOp {
    fn from(instruction: &Instruction) -> Self {
        match (&instruction.kind, instruction.qubits.as_slice()) {
            (InstructionKind::Gate(StandardGate::CX), &[control, target]) => {
                GateOp::Cnot { control, target }
            }
            (InstructionKind::Gate(StandardGate::H), &[qubit]) => GateOp::H(qubit),
            (InstructionKind::Gate(StandardGate::X), &[qubit]) => GateOp::X(qubit),
            _ => GateOp::Unsupported {
                name: instruction.name().to_string(),
            },
        }
    }
}

/// Hadamard translator.
#[derive(Debug, Clone, Copy)]
pub struct HadamardGate {
    protocol: Protocol,
}

impl HadamardGate {
    /// Create a translator for `protocol`.
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }

    /// Lower `H(qubit)`.
    pub fn compile(&self, qubit: QubitId) -> Block {
        self.protocol.lowering().hadamard(qubit)
    }
}

/// Pauli-X translator.
#[derive(Debug, Clone, Copy)]
pub struct PauliXGate {
    protocol: Protocol,
}

impl PauliXGate {
    /// Create a translator for `protocol`.
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }

    /// Lower `X(qubit)`.
    pub fn compile(&self, qubit: QubitId) -> Block {
        self.protocol.lowering().pauli_x(qubit)
    }
}

/// CNOT translator.
#[derive(Debug, Clone, Copy)]
pub struct CnotGate {
    protocol: Protocol,
}

impl CnotGate {
    /// Create a translator for `protocol`.
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }

    /// Lower `CNOT(control, target)`.
    pub fn compile(&self, control: QubitId, target: QubitId) -> CompileResult<Block> {
        self.protocol.lowering().cnot(control, target)
    }
}

/// Lower one operation. Returns `None` for unsupported operations.
pub fn translate(op: &GateOp, protocol: Protocol) -> CompileResult<Option<Block>> {
    let block = match *op {
        GateOp::Cnot { control, target } => CnotGate::new(protocol).compile(control, target)?,
        GateOp::H(qubit) => HadamardGate::new(protocol).compile(qubit),
        GateOp::X(qubit) => PauliXGate::new(protocol).compile(qubit),
        GateOp::Unsupported { .. } => return Ok(None),
    };
    Ok(Some(block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ProgramLine;
    use proptest::prelude::*;

    #[test]
    fn test_adapter() {
        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(2), QubitId(0));
        assert_eq!(
            GateOp::from(&cx),
            GateOp::Cnot {
                control: QubitId(2),
                target: QubitId(0)
            }
        );

        let h = Instruction::single_qubit_gate(StandardGate::H, QubitId(1));
        assert_eq!(GateOp::from(&h), GateOp::H(QubitId(1)));

        let z = Instruction::single_qubit_gate(StandardGate::Z, QubitId(1));
        assert_eq!(
            GateOp::from(&z),
            GateOp::Unsupported {
                name: "z".to_string()
            }
        );

        let m = Instruction::measure([QubitId(0)], "m");
        assert!(!GateOp::from(&m).is_supported());
    }

    #[test]
    fn test_unsupported_emits_nothing() {
        let op = GateOp::Unsupported {
            name: "swap".to_string(),
        };
        assert!(translate(&op, Protocol::Klm).unwrap().is_none());
    }

    #[test]
    fn test_swap_blocks_wrap_cnot_identically() {
        let block = CnotGate::new(Protocol::Klm)
            .compile(QubitId(0), QubitId(3))
            .unwrap();
        let lines = block.lines();
        // 4 crossings + blank, 5 couplers, 4 crossings + blank.
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[..5], lines[10..]);
        assert_eq!(lines[4], ProgramLine::Blank);
    }

    proptest! {
        #[test]
        fn prop_single_qubit_gates_emit_one_line(pos in 0_u32..10_000) {
            let q = QubitId(pos);
            prop_assert_eq!(HadamardGate::new(Protocol::Klm).compile(q).component_count(), 1);
            prop_assert_eq!(PauliXGate::new(Protocol::Klm).compile(q).component_count(), 1);
        }

        #[test]
        fn prop_cnot_component_count(c in 0_u32..40, t in 0_u32..40) {
            prop_assume!(c != t);
            let block = CnotGate::new(Protocol::Klm).compile(QubitId(c), QubitId(t)).unwrap();
            let (low, upper) = crate::layout::normalized(QubitId(c), QubitId(t));
            let swap = if low.distance(upper) > 1 {
                crate::swap::swap_network(low, upper).unwrap().component_count()
            } else {
                0
            };
            prop_assert_eq!(block.component_count(), 2 * swap + 5);
            if QubitId(c).is_adjacent(QubitId(t)) {
                prop_assert_eq!(block.component_count(), 5);
            }
        }
    }
}
