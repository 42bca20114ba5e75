//! Plugin implementations for the supported notations
//!
//! Each notation plugin implements [`crate::core::TemplateEngine`]; the
//! generator drives the pipeline through whichever engine is selected.

mod builtin;
pub mod generator;
pub mod mermaid;
pub mod yuml;

pub use generator::*;
pub use mermaid::*;
pub use yuml::*;
