//! Extension points around translation.
//!
//! Circuit passes run after device validation and before translation
//! (simulation, logical optimization). Program passes run on the emitted
//! component records before rendering (photonic-level optimization such as
//! merging couplers). The compiler runs none by default.

use klm_ir::Circuit;

use crate::error::CompileResult;
use crate::program::Program;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads but does not modify its input.
    Analysis,
    /// Modifies its input.
    Transformation,
}

/// A pass over the logical circuit.
pub trait CircuitPass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the circuit.
    fn run(&self, circuit: &mut Circuit) -> CompileResult<()>;
}

/// A pass over the emitted photonic program.
pub trait ProgramPass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the program.
    fn run(&self, program: &mut Program) -> CompileResult<()>;
}

/// A pass that changes nothing. Usable at either stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPass;

impl CircuitPass for IdentityPass {
    fn name(&self) -> &str {
        "identity"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, _circuit: &mut Circuit) -> CompileResult<()> {
        Ok(())
    }
}

impl ProgramPass for IdentityPass {
    fn name(&self) -> &str {
        "identity"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, _program: &mut Program) -> CompileResult<()> {
        Ok(())
    }
}
