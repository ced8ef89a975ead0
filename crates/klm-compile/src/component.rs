//! Emitted component records.
//!
//! Translators produce structured records rather than text. The records are
//! append-only and only turned into text by [`crate::program::Program`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parts::Part;

/// A component port: a rail index or an open (unconnected) port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    /// A waveguide rail.
    Rail(u64),
    /// Open port, rendered as `~`.
    Open,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Rail(rail) => write!(f, "{rail}"),
            Port::Open => f.write_str("~"),
        }
    }
}

/// An ordered pair of ports, rendered as `(a,b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortPair(pub Port, pub Port);

impl fmt::Display for PortPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// One instantiated part with its input and output coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Part template.
    pub part: Part,
    /// Input coordinates.
    pub input: PortPair,
    /// Output coordinates.
    pub output: PortPair,
}

impl ComponentInstance {
    /// A component whose input and output coordinates coincide.
    pub fn straight(part: Part, a: Port, b: Port) -> Self {
        let pair = PortPair(a, b);
        Self {
            part,
            input: pair,
            output: pair,
        }
    }

    /// A waveguide crossing between rails `a` and `b`.
    pub fn crossing(a: u64, b: u64) -> Self {
        Self::straight(Part::WaveguideCrossing, Port::Rail(a), Port::Rail(b))
    }

    /// A standard directional coupler between two ports.
    pub fn coupler(a: Port, b: Port) -> Self {
        Self::straight(Part::DirectionalStandard, a, b)
    }
}

impl fmt::Display for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.part, self.input, self.output)
    }
}

/// One line of the program body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramLine {
    /// A component instantiation.
    Component(ComponentInstance),
    /// An empty separator line.
    Blank,
}

impl ProgramLine {
    /// The component on this line, if any.
    pub fn component(&self) -> Option<&ComponentInstance> {
        match self {
            ProgramLine::Component(c) => Some(c),
            ProgramLine::Blank => None,
        }
    }
}

impl From<ComponentInstance> for ProgramLine {
    fn from(component: ComponentInstance) -> Self {
        ProgramLine::Component(component)
    }
}

impl fmt::Display for ProgramLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramLine::Component(c) => write!(f, "{c}"),
            ProgramLine::Blank => Ok(()),
        }
    }
}

/// The lines emitted for one gate (or one swap network).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    lines: Vec<ProgramLine>,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component.
    pub fn push(&mut self, component: ComponentInstance) {
        self.lines.push(ProgramLine::Component(component));
    }

    /// Append a blank separator line.
    pub fn push_blank(&mut self) {
        self.lines.push(ProgramLine::Blank);
    }

    /// Append every line of another block.
    pub fn extend(&mut self, other: &Block) {
        self.lines.extend(other.lines.iter().cloned());
    }

    /// All lines, in emission order.
    pub fn lines(&self) -> &[ProgramLine] {
        &self.lines
    }

    /// Components only, in emission order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentInstance> + '_ {
        self.lines.iter().filter_map(ProgramLine::component)
    }

    /// Number of component lines.
    pub fn component_count(&self) -> usize {
        self.components().count()
    }

    /// Check if the block has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the block: every line followed by a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }
}

impl FromIterator<ComponentInstance> for Block {
    fn from_iter<I: IntoIterator<Item = ComponentInstance>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(ProgramLine::Component).collect(),
        }
    }
}
