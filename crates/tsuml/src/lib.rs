//! tsuml - Class diagrams from class and interface declarations
//!
//! Declarations produced by a source analyzer are normalized into a
//! notation-agnostic model and rendered by a pluggable template engine
//! (Mermaid `classDiagram` or yUML).
//!
//! # Quick Start
//!
//! ```rust
//! use tsuml::prelude::*;
//! use tsuml::generate;
//!
//! let declarations = DeclarationSet::new().with_file(SourceFile {
//!     path: Some("dog.ts".into()),
//!     classes: vec![ClassDeclaration::new("Dog")
//!         .with_property(MemberDeclaration::new("name"))
//!         .extending(HeritageReference::new("Animal"))],
//!     interfaces: vec![],
//! });
//!
//! let dsl = generate(&declarations, EngineKind::Mermaid).unwrap();
//! assert_eq!(dsl, "class Dog {\n\t+name\n}\nAnimal <|-- Dog\n");
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use tsuml::prelude::*;
//!
//! let mut registry = EngineRegistry::with_builtin_engines();
//! registry.select("yuml").unwrap();
//!
//! let generator = Generator::new(registry).with_policy(UnresolvedPolicy::Reject);
//! let model = generator.build_model(&DeclarationSet::new()).unwrap();
//! assert!(model.is_empty());
//! ```

pub mod core;
pub mod plugins;

pub use self::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ClassDeclaration, DeclarationSet, DiagramError, DiagramModel, EngineKind,
        EngineRegistry, HeritageReference, InheritanceEdge, InterfaceDeclaration, Member,
        MemberDeclaration, Modifier, NormalizedType, Normalizer, OutputOptions, SourceFile,
        TemplateEngine, UnresolvedPolicy, Visibility,
    };
    pub use crate::plugins::{Generator, MermaidEngine, YumlEngine};
}

/// Render declarations with one of the builtin engines
///
/// Returns the diagram body; nothing is written or uploaded.
pub fn generate(declarations: &DeclarationSet, engine: EngineKind) -> anyhow::Result<String> {
    plugins::Generator::with_engine(engine)?.generate_dsl(declarations)
}

/// Parse a JSON declaration dump
///
/// # Example
/// ```rust
/// let set = tsuml::parse_declarations(r#"{ "files": [{ "classes": [{ "symbol": "A" }] }] }"#).unwrap();
/// assert_eq!(set.declaration_count(), 1);
/// ```
pub fn parse_declarations(json: &str) -> Result<DeclarationSet, DiagramError> {
    serde_json::from_str(json).map_err(|e| DiagramError::invalid_input(e.to_string()))
}
