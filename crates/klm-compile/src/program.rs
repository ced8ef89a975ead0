//! The compiled photonic program and its text rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::component::{Block, ComponentInstance};

/// Program header, up to and including the blank line after `_init`.
pub const PROLOGUE: &str = ".text\n    _init:\n        nop\n\n";

/// Program trailer.
pub const EPILOGUE: &str = "    _exit:\n        nop \n        ret\n";

/// Indentation unit applied to every body line.
pub const INDENT: &str = "    ";

/// A compiled program: one block per translated operation, in emission
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    operations: Vec<Block>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the block of one translated operation.
    pub fn push_operation(&mut self, block: Block) {
        self.operations.push(block);
    }

    /// Operation blocks, in emission order.
    pub fn operations(&self) -> &[Block] {
        &self.operations
    }

    /// Mutable access to the operation blocks, for program passes.
    pub fn operations_mut(&mut self) -> &mut Vec<Block> {
        &mut self.operations
    }

    /// Number of translated operations.
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Every emitted component, in order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentInstance> + '_ {
        self.operations.iter().flat_map(Block::components)
    }

    /// Number of emitted components.
    pub fn component_count(&self) -> usize {
        self.components().count()
    }

    /// Unindented body text: each block followed by one separator line.
    pub fn body(&self) -> String {
        let mut body = String::new();
        for block in &self.operations {
            body.push_str(&block.render());
            body.push('\n');
        }
        body
    }

    /// Render the complete program text.
    pub fn render(&self) -> String {
        let mut emitter = Emitter::new();
        emitter.write_raw(PROLOGUE);
        for line in self.body().split('\n') {
            emitter.writeln(line);
        }
        emitter.write_raw(EPILOGUE);
        emitter.finish()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<Block>> for Program {
    fn from(operations: Vec<Block>) -> Self {
        Self { operations }
    }
}

/// Line-oriented text builder with a fixed body indentation.
struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn write_raw(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(INDENT);
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn finish(self) -> String {
        self.output
    }
}
