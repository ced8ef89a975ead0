//! Circuit sources.
//!
//! The compiler does not care where a circuit comes from. A
//! [`CircuitSource`] hands it a fully built [`Circuit`]; sources exist for
//! in-memory circuits, the bundled demonstration circuits and JSON files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use klm_ir::Circuit;
use tracing::debug;

use crate::error::{CompileError, CompileResult};

/// Anything that can produce a circuit to compile.
pub trait CircuitSource {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Build the circuit.
    fn generate_circuit(&self) -> CompileResult<Circuit>;
}

impl CircuitSource for Circuit {
    fn name(&self) -> &str {
        Circuit::name(self)
    }

    fn generate_circuit(&self) -> CompileResult<Circuit> {
        Ok(self.clone())
    }
}

/// Demonstration circuits shipped with the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCircuit {
    /// `H(q0)`, `CNOT(q1, q0)`, measure both.
    Bell,
    /// Entangling part of three-qubit teleportation.
    Teleportation,
    /// Every lowered gate kind on three qubits.
    GateTour,
}

impl BuiltinCircuit {
    /// All builtin circuits.
    pub const ALL: [BuiltinCircuit; 3] = [
        BuiltinCircuit::Bell,
        BuiltinCircuit::Teleportation,
        BuiltinCircuit::GateTour,
    ];

    /// Command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinCircuit::Bell => "bell",
            BuiltinCircuit::Teleportation => "teleportation",
            BuiltinCircuit::GateTour => "gate-tour",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            BuiltinCircuit::Bell => "Bell pair with measurement (2 qubits)",
            BuiltinCircuit::Teleportation => "Teleportation entangling stage (3 qubits)",
            BuiltinCircuit::GateTour => "H, X and CNOT on every position (3 qubits)",
        }
    }

    /// Number of qubits the circuit uses.
    pub fn num_qubits(&self) -> u32 {
        match self {
            BuiltinCircuit::Bell => 2,
            BuiltinCircuit::Teleportation | BuiltinCircuit::GateTour => 3,
        }
    }
}

impl fmt::Display for BuiltinCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinCircuit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bell" => Ok(BuiltinCircuit::Bell),
            "teleportation" | "teleport" => Ok(BuiltinCircuit::Teleportation),
            "gate-tour" | "tour" => Ok(BuiltinCircuit::GateTour),
            other => Err(format!(
                "Unknown circuit: '{other}'. Available: bell, teleportation, gate-tour"
            )),
        }
    }
}

impl CircuitSource for BuiltinCircuit {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn generate_circuit(&self) -> CompileResult<Circuit> {
        let circuit = match self {
            BuiltinCircuit::Bell => Circuit::bell()?,
            BuiltinCircuit::Teleportation => Circuit::teleportation()?,
            BuiltinCircuit::GateTour => Circuit::gate_tour()?,
        };
        Ok(circuit)
    }
}

/// A circuit stored as JSON on disk.
///
/// The file is read on every call to
/// [`generate_circuit`](CircuitSource::generate_circuit) and structurally
/// verified after parsing.
#[derive(Debug, Clone)]
pub struct JsonCircuitFile {
    path: PathBuf,
    name: String,
}

impl JsonCircuitFile {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn source_error(&self, reason: impl fmt::Display) -> CompileError {
        CompileError::Source {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl CircuitSource for JsonCircuitFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_circuit(&self) -> CompileResult<Circuit> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.source_error(e))?;
        let circuit: Circuit = serde_json::from_str(&text).map_err(|e| self.source_error(e))?;
        circuit.verify()?;

        debug!(
            path = %self.path.display(),
            operations = circuit.num_operations(),
            "Loaded circuit"
        );
        Ok(circuit)
    }
}
