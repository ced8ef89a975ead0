//! Dual-rail layout of line qubits.
//!
//! Every qubit is encoded in two waveguides. The qubit at line position `p`
//! owns the input rail `2p` and the output rail `2p + 1`; rails are never
//! stored, only derived when components are emitted.

use klm_ir::QubitId;

use crate::component::Port;

/// The two rails of a dual-rail qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RailPair {
    /// Input rail, `2 * position`.
    pub input: u64,
    /// Output rail, `2 * position + 1`.
    pub output: u64,
}

impl RailPair {
    /// Rails of the given qubit.
    pub fn of(qubit: QubitId) -> Self {
        let base = 2 * u64::from(qubit.position());
        Self {
            input: base,
            output: base + 1,
        }
    }

    /// Input rail as a port.
    pub fn input_port(&self) -> Port {
        Port::Rail(self.input)
    }

    /// Output rail as a port.
    pub fn output_port(&self) -> Port {
        Port::Rail(self.output)
    }

    /// The rail just below the input rail, i.e. the output rail of the
    /// previous qubit on the line. Open when this is the first qubit.
    pub fn below_input(&self) -> Port {
        self.input.checked_sub(1).map_or(Port::Open, Port::Rail)
    }
}

/// Order two qubits by line position, lowest first.
#[inline]
pub fn normalized(a: QubitId, b: QubitId) -> (QubitId, QubitId) {
    if a <= b { (a, b) } else { (b, a) }
}
