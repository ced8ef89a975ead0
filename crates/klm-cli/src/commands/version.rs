//! Version command implementation.

use console::style;

use klm_compile::Protocol;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - photonic circuit compiler",
        style("klmc").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  klm-ir       Line-qubit circuit representation");
    println!("  klm-compile  Gate-to-component compiler");
    println!("  klm-cli      Command-line interface");
    println!();
    let protocols: Vec<&str> = Protocol::ALL.iter().map(Protocol::name).collect();
    println!("Protocols:  {}", protocols.join(", "));
    println!("License:    {}", style("Apache-2.0").dim());
}
