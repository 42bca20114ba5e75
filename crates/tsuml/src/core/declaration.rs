//! Raw declarations handed over by the source analyzer
//!
//! These shapes mirror what a type-checker knows about a class or interface
//! before normalization: symbols may be missing and modifiers are unfiltered.
//! They deserialize from the JSON dumps the CLI consumes.

use serde::{Deserialize, Serialize};

/// A modifier keyword attached to a member declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Readonly,
    Abstract,
    #[serde(untagged)]
    Other(String),
}

/// A property or method declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDeclaration {
    /// `None` when the analyzer could not resolve a symbol
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl MemberDeclaration {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            modifiers: Vec::new(),
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// The type referenced by an `extends` or `implements` clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeritageReference {
    /// `None` for computed or otherwise unresolvable expressions
    #[serde(default)]
    pub identifier: Option<String>,
}

impl HeritageReference {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// A class declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub properties: Vec<MemberDeclaration>,
    #[serde(default)]
    pub methods: Vec<MemberDeclaration>,
    #[serde(default)]
    pub extends: Option<HeritageReference>,
    #[serde(default)]
    pub implements: Vec<HeritageReference>,
}

impl ClassDeclaration {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, property: MemberDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MemberDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn extending(mut self, parent: HeritageReference) -> Self {
        self.extends = Some(parent);
        self
    }

    pub fn implementing(mut self, interface: HeritageReference) -> Self {
        self.implements.push(interface);
        self
    }
}

/// An interface declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub properties: Vec<MemberDeclaration>,
    #[serde(default)]
    pub methods: Vec<MemberDeclaration>,
}

impl InterfaceDeclaration {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, property: MemberDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MemberDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// Declarations found in one source file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDeclaration>,
}

/// Everything one diagram run consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn declaration_count(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.classes.len() + f.interfaces.len())
            .sum()
    }
}
