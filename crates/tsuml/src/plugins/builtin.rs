//! Built-in engine wiring
//!
//! Registers the notations shipped with this crate on an
//! [`EngineRegistry`].

use crate::core::{DiagramResult, EngineKind, EngineRegistry};

use super::mermaid::MermaidEngine;
use super::yuml::YumlEngine;

impl EngineRegistry {
    /// Create a registry with the Mermaid and yUML engines, Mermaid active
    pub fn with_builtin_engines() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MermaidEngine::new()));
        registry.register(Box::new(YumlEngine::new()));
        registry
    }

    /// Builtin registry with `kind` already selected
    pub fn for_engine(kind: EngineKind) -> DiagramResult<Self> {
        let mut registry = Self::with_builtin_engines();
        registry.select(kind.as_str())?;
        Ok(registry)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_builtin_engines()
    }
}
