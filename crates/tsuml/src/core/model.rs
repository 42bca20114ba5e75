//! Diagram model
//!
//! The intermediate, notation-independent form of one diagram run: every
//! normalized type and inheritance edge in source order.

use tracing::{debug, span, Level};

use super::declaration::{DeclarationSet, SourceFile};
use super::error::DiagramResult;
use super::normalizer::Normalizer;
use super::types::{InheritanceEdge, NormalizedType};

/// One renderable entry of the model, in the order it will be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEntry<'a> {
    Type(&'a NormalizedType),
    Edge(&'a InheritanceEdge),
}

/// Types and edges collected from a declaration set
///
/// Duplicate names are kept; each one becomes its own diagram node.
#[derive(Debug, Clone, Default)]
pub struct DiagramModel {
    types: Vec<NormalizedType>,
    edges: Vec<InheritanceEdge>,
    /// Emission order, indexes into `types` or `edges`
    order: Vec<EntryRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryRef {
    Type(usize),
    Edge(usize),
}

impl DiagramModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a whole declaration set
    ///
    /// Per source file: classes, then interfaces, then the heritage edges
    /// of that file's classes.
    pub fn from_declarations(
        declarations: &DeclarationSet,
        normalizer: &Normalizer,
    ) -> DiagramResult<Self> {
        let span = span!(
            Level::INFO,
            "build_model",
            files = declarations.files.len(),
            declarations = declarations.declaration_count()
        );
        let _enter = span.enter();

        let mut model = Self::new();
        for file in &declarations.files {
            model.extend_from_file(file, normalizer)?;
        }

        debug!(
            types = model.types.len(),
            edges = model.edges.len(),
            "Model built"
        );
        Ok(model)
    }

    fn extend_from_file(&mut self, file: &SourceFile, normalizer: &Normalizer) -> DiagramResult<()> {
        let span = span!(Level::DEBUG, "source_file", path = file.path.as_deref().unwrap_or("-"));
        let _enter = span.enter();

        for class in &file.classes {
            self.push_type(normalizer.normalize_class(class)?);
        }
        for interface in &file.interfaces {
            self.push_type(normalizer.normalize_interface(interface)?);
        }
        for class in &file.classes {
            for edge in normalizer.extract_heritage(class)? {
                self.push_edge(edge);
            }
        }
        Ok(())
    }

    pub fn push_type(&mut self, ty: NormalizedType) {
        self.order.push(EntryRef::Type(self.types.len()));
        self.types.push(ty);
    }

    pub fn push_edge(&mut self, edge: InheritanceEdge) {
        self.order.push(EntryRef::Edge(self.edges.len()));
        self.edges.push(edge);
    }

    pub fn types(&self) -> &[NormalizedType] {
        &self.types
    }

    pub fn inheritance(&self) -> &[InheritanceEdge] {
        &self.edges
    }

    /// Entries in emission order
    pub fn entries(&self) -> impl Iterator<Item = ModelEntry<'_>> {
        self.order.iter().map(|entry| match *entry {
            EntryRef::Type(i) => ModelEntry::Type(&self.types[i]),
            EntryRef::Edge(i) => ModelEntry::Edge(&self.edges[i]),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::declaration::{
        ClassDeclaration, HeritageReference, InterfaceDeclaration, MemberDeclaration,
    };

    fn sample() -> DeclarationSet {
        DeclarationSet::new()
            .with_file(SourceFile {
                path: Some("animals.ts".into()),
                classes: vec![
                    ClassDeclaration::new("Dog").extending(HeritageReference::new("Animal")),
                    ClassDeclaration::new("Animal"),
                ],
                interfaces: vec![
                    InterfaceDeclaration::new("Pet").with_method(MemberDeclaration::new("play"))
                ],
            })
            .with_file(SourceFile {
                path: Some("cat.ts".into()),
                classes: vec![ClassDeclaration::new("Cat")
                    .extending(HeritageReference::new("Animal"))
                    .implementing(HeritageReference::new("Pet"))],
                interfaces: vec![],
            })
    }

    #[test]
    fn test_from_declarations_counts() {
        let model = DiagramModel::from_declarations(&sample(), &Normalizer::new()).unwrap();
        assert_eq!(model.types().len(), 4);
        assert_eq!(model.inheritance().len(), 3);
        assert!(model
            .types()
            .iter()
            .find(|t| t.name == "Pet")
            .unwrap()
            .is_interface());
    }

    #[test]
    fn test_entries_follow_file_order() {
        let model = DiagramModel::from_declarations(&sample(), &Normalizer::new()).unwrap();
        let labels: Vec<String> = model
            .entries()
            .map(|entry| match entry {
                ModelEntry::Type(t) => t.name.clone(),
                ModelEntry::Edge(e) => e.to_string(),
            })
            .collect();

        assert_eq!(
            labels,
            vec![
                "Dog",
                "Animal",
                "Pet",
                "Dog -> Animal",
                "Cat",
                "Cat -> Animal",
                "Cat -> Pet",
            ]
        );
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut model = DiagramModel::new();
        model.push_type(NormalizedType::class("A"));
        model.push_type(NormalizedType::class("A"));
        assert_eq!(model.types().len(), 2);
        assert_eq!(model.entries().count(), 2);
    }
}
