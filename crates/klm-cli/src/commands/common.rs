//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use klm_compile::{BuiltinCircuit, CircuitSource, JsonCircuitFile};
use klm_ir::Circuit;

/// Resolve a circuit argument: a `.json` path or a builtin circuit name.
pub fn resolve_source(circuit: &str) -> Result<Box<dyn CircuitSource>> {
    let path = Path::new(circuit);
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        if !path.exists() {
            anyhow::bail!("File not found: {circuit}");
        }
        return Ok(Box::new(JsonCircuitFile::new(path)));
    }

    let builtin: BuiltinCircuit = circuit.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    Ok(Box::new(builtin))
}

/// Load the circuit named by a circuit argument.
pub fn load_circuit(circuit: &str) -> Result<Circuit> {
    let source = resolve_source(circuit)?;
    source
        .generate_circuit()
        .with_context(|| format!("Failed to load circuit: {circuit}"))
}
