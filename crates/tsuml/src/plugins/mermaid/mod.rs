//! Mermaid plugin
//!
//! Block-diagram notation: Mermaid `classDiagram` syntax.

mod engine;

pub use engine::{MermaidEngine, MERMAID_HEADER};
