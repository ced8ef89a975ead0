//! Circuits command implementation.

use console::style;

use klm_compile::BuiltinCircuit;

/// Execute the circuits command.
pub fn execute() {
    println!("{}", style("Builtin circuits:").bold());
    for builtin in BuiltinCircuit::ALL {
        println!(
            "  {:<15} {}",
            style(builtin.as_str()).green(),
            builtin.description()
        );
    }
    println!();
    println!(
        "Any other circuit can be passed as a {} file.",
        style(".json").yellow()
    );
}
