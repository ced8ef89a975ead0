//! Physical protocols and their gate lowerings.
//!
//! Every gate translator carries a [`Protocol`] and asks it for the
//! matching [`ProtocolLowering`]. KLM is the only protocol today; adding a
//! protocol means adding a variant and a lowering, call sites stay as they
//! are.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use klm_ir::QubitId;

use crate::component::Block;
use crate::error::CompileResult;
use crate::klm::KlmLowering;

/// Physical protocol a circuit is compiled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Knill-Laflamme-Milburn linear-optics protocol.
    #[default]
    Klm,
}

impl Protocol {
    /// All known protocols.
    pub const ALL: [Protocol; 1] = [Protocol::Klm];

    /// Protocol name.
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Klm => "klm",
        }
    }

    /// The lowering strategy registered for this protocol.
    pub fn lowering(&self) -> &'static dyn ProtocolLowering {
        match self {
            Protocol::Klm => &KlmLowering,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "klm" => Ok(Protocol::Klm),
            other => Err(format!("Unknown protocol: '{other}'. Available: klm")),
        }
    }
}

/// Lowers the supported logical gates into photonic components.
///
/// Implementations are stateless; every call is a pure function of its
/// operands.
pub trait ProtocolLowering: Send + Sync {
    /// Name of the protocol this lowering implements.
    fn name(&self) -> &str;

    /// Lower a Hadamard gate.
    fn hadamard(&self, qubit: QubitId) -> Block;

    /// Lower a Pauli-X gate.
    fn pauli_x(&self, qubit: QubitId) -> Block;

    /// Lower a CNOT gate, including any routing it needs.
    fn cnot(&self, control: QubitId, target: QubitId) -> CompileResult<Block>;
}
