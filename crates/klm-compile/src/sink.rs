//! Destinations for rendered programs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CompileError, CompileResult};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "quantum.qa";

/// Receives the rendered program text.
pub trait ProgramSink {
    /// Write the complete program.
    fn write_program(&mut self, text: &str) -> CompileResult<()>;
}

/// Writes the program to a file, creating or truncating it.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sink_error(&self, source: std::io::Error) -> CompileError {
        CompileError::Sink {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT)
    }
}

impl ProgramSink for FileSink {
    fn write_program(&mut self, text: &str) -> CompileResult<()> {
        let file = File::create(&self.path).map_err(|e| self.sink_error(e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .map_err(|e| self.sink_error(e))?;
        let file = writer
            .into_inner()
            .map_err(|e| self.sink_error(e.into_error()))?;
        file.sync_all().map_err(|e| self.sink_error(e))?;

        info!(path = %self.path.display(), bytes = text.len(), "Wrote program");
        Ok(())
    }
}

/// Keeps the program in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    text: String,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the written text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl ProgramSink for MemorySink {
    fn write_program(&mut self, text: &str) -> CompileResult<()> {
        self.text.push_str(text);
        Ok(())
    }
}
