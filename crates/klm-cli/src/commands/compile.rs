//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;

use klm_compile::{Compiler, FileSink, KlmDevice};

use super::common::load_circuit;
use crate::config::Config;

/// Execute the compile command.
pub fn execute(config: &Config, print: bool) -> Result<()> {
    println!(
        "{} Compiling {} for protocol {}",
        style("→").cyan().bold(),
        style(&config.circuit).green(),
        style(config.protocol).yellow()
    );

    let circuit = load_circuit(&config.circuit)?;
    println!(
        "  Loaded: {} qubits, depth {}, {} operations",
        circuit.num_qubits(),
        circuit.depth(),
        circuit.num_operations()
    );

    let device = KlmDevice::new(config.qubits.unwrap_or(circuit.num_qubits()));
    let compiler = Compiler::new(config.protocol).with_policy(config.policy());
    let mut sink = FileSink::new(&config.output);

    let program = compiler
        .compile_to(&circuit, &device, &mut sink)
        .context("Compilation failed")?;

    println!("{} Compilation complete", style("✓").green().bold());
    println!(
        "  Result: {} operations, {} components",
        program.num_operations(),
        program.component_count()
    );
    println!("  Output: {}", style(config.output.display()).green());

    if print {
        println!();
        print!("{program}");
    }

    Ok(())
}
