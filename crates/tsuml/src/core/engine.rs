//! Template engine contract
//!
//! One implementation per diagram notation. Rendering is synchronous and
//! pure; only [`TemplateEngine::finalize`] performs I/O.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;

use super::error::{DiagramError, DiagramResult};
use super::types::{Member, NormalizedType};

/// Where a finalized diagram goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Destination file; engines that print fall back to stdout without one
    pub output: Option<PathBuf>,
    /// Open the result in the system viewer when the engine produces a URL
    pub open_viewer: bool,
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            open_viewer: false,
        }
    }

    pub fn with_viewer(mut self, open_viewer: bool) -> Self {
        self.open_viewer = open_viewer;
        self
    }
}

/// Core trait for diagram notations
///
/// Engines must keep members in the order they are given.
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Identifier the registry selects this engine by
    fn name(&self) -> &'static str;

    /// `child` derives from or implements `parent`
    fn render_inheritance(&self, parent: &str, child: &str) -> String;

    /// A class node listing properties, then methods
    fn render_class(&self, name: &str, properties: &[Member], methods: &[Member]) -> String;

    /// An interface node listing properties, then methods
    fn render_interface(&self, name: &str, properties: &[Member], methods: &[Member]) -> String;

    /// Joiner placed between rendered fragments
    fn separator(&self) -> &'static str;

    /// Deliver the joined diagram body to the engine's sink
    async fn finalize(&self, body: &str, options: &OutputOptions) -> DiagramResult<()>;

    /// Render a normalized type with the class or interface template
    fn render_type(&self, ty: &NormalizedType) -> String {
        if ty.is_interface() {
            self.render_interface(&ty.name, &ty.properties, &ty.methods)
        } else {
            self.render_class(&ty.name, &ty.properties, &ty.methods)
        }
    }
}

/// Built-in notations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EngineKind {
    /// Mermaid `classDiagram` blocks
    #[default]
    Mermaid,
    /// yUML bracket notation
    Yuml,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Mermaid => "mermaid",
            EngineKind::Yuml => "yuml",
        }
    }

    /// Get all valid engine names
    pub fn variants() -> &'static [&'static str] {
        &["mermaid", "yuml"]
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid" => Ok(EngineKind::Mermaid),
            "yuml" => Ok(EngineKind::Yuml),
            _ => Err(DiagramError::unknown_engine(
                s,
                Self::variants().iter().map(|v| v.to_string()).collect(),
            )),
        }
    }
}
