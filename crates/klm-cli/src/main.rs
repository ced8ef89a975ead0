//! KLM Photonic Compiler Command-Line Interface
//!
//! The main entry point for the `klmc` tool.
//!
//! ```text
//!   ══╗   ╔══════╗   ╔══
//!     ╚═══╝      ╚═══╝
//!     ╔═══╗      ╔═══╗
//!   ══╝   ╚══════╝   ╚══
//!
//!          K L M C
//!   Linear-optics circuit compiler
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{circuits, compile, version};
use config::{Config, Overrides};
use klm_compile::Protocol;

/// klmc - compile logical circuits into photonic assembly
#[derive(Parser)]
#[command(name = "klmc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a circuit into a photonic program
    Compile {
        /// Builtin circuit name or path to a JSON circuit file
        #[arg(short, long)]
        circuit: Option<String>,

        /// Number of line qubits on the device
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Physical protocol (klm)
        #[arg(short, long)]
        protocol: Option<Protocol>,

        /// Abort on device constraint violations
        #[arg(long)]
        strict: bool,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also print the program to stdout
        #[arg(long)]
        print: bool,
    },

    /// List builtin circuits
    Circuits,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Compile { config, .. } => config.clone(),
        _ => None,
    };
    let loaded = Config::load(config_path.as_deref());
    let configured = match &loaded {
        Ok(config) => config.log_level.as_str(),
        Err(_) => "warn",
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compile {
            circuit,
            qubits,
            output,
            protocol,
            strict,
            config: _,
            print,
        } => {
            let overrides = Overrides {
                circuit,
                qubits,
                output,
                protocol,
                strict,
            };
            loaded
                .and_then(|config| config.with_overrides(overrides))
                .map_err(anyhow::Error::from)
                .and_then(|config| compile::execute(&config, print))
        }

        Commands::Circuits => {
            circuits::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
