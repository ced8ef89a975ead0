//! Configuration for the `klmc` compiler.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with KLMC_ prefix)
//! 3. Command-line flags
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use klm_compile::{DEFAULT_OUTPUT, Protocol, ValidationPolicy};

/// Complete compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Circuit to compile: a builtin name or a path to a JSON circuit file
    #[serde(default = "default_circuit")]
    pub circuit: String,

    /// Number of line qubits on the device; defaults to the circuit's own size
    #[serde(default)]
    pub qubits: Option<u32>,

    /// Output file for the photonic program
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Physical protocol
    #[serde(default)]
    pub protocol: Protocol,

    /// Abort on device constraint violations instead of reporting them
    #[serde(default)]
    pub strict: bool,

    /// Log level used when no `-v` flag is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_circuit() -> String {
    "bell".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            circuit: default_circuit(),
            qubits: None,
            output: default_output(),
            protocol: Protocol::default(),
            strict: false,
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line. `None` leaves the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub circuit: Option<String>,
    pub qubits: Option<u32>,
    pub output: Option<PathBuf>,
    pub protocol: Option<Protocol>,
    pub strict: bool,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from the optional file, then the process
    /// environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading variables through `lookup`.
    pub fn load_with(
        config_file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set override the current values. Values
    /// that do not parse are ignored.
    fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("KLMC_CIRCUIT") {
            self.circuit = v;
        }
        if let Some(v) = lookup("KLMC_OUTPUT") {
            self.output = PathBuf::from(v);
        }
        if let Some(v) = lookup("KLMC_QUBITS") {
            if let Ok(val) = v.parse() {
                self.qubits = Some(val);
            }
        }
        if let Some(v) = lookup("KLMC_PROTOCOL") {
            if let Ok(val) = v.parse() {
                self.protocol = val;
            }
        }
        if let Some(v) = lookup("KLMC_STRICT") {
            match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.strict = true,
                "0" | "false" | "no" | "off" => self.strict = false,
                _ => {}
            }
        }
        if let Some(v) = lookup("KLMC_LOG_LEVEL") {
            self.log_level = v;
        }

        self
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(circuit) = overrides.circuit {
            self.circuit = circuit;
        }
        if let Some(qubits) = overrides.qubits {
            self.qubits = Some(qubits);
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(protocol) = overrides.protocol {
            self.protocol = protocol;
        }
        self.strict |= overrides.strict;

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.qubits == Some(0) {
            return Err(ConfigError::ValidationError(
                "qubits must be greater than 0".to_string(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output path must not be empty".to_string(),
            ));
        }

        if self.circuit.is_empty() {
            return Err(ConfigError::ValidationError(
                "circuit must not be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Validation policy implied by `strict`.
    pub fn policy(&self) -> ValidationPolicy {
        if self.strict {
            ValidationPolicy::Enforce
        } else {
            ValidationPolicy::Report
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
