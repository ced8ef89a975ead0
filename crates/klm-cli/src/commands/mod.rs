//! CLI command implementations.

pub mod circuits;
pub mod common;
pub mod compile;
pub mod version;
