//! Declaration normalization
//!
//! Turns raw analyzer declarations into [`NormalizedType`]s and
//! [`InheritanceEdge`]s.
//!
//! Unresolvable member symbols and heritage identifiers are handled by an
//! explicit [`UnresolvedPolicy`]. The default, [`UnresolvedPolicy::Drop`],
//! leaves them out of the result without failing the run.

use tracing::{debug, span, trace, Level};

use super::declaration::{
    ClassDeclaration, HeritageReference, InterfaceDeclaration, MemberDeclaration, Modifier,
};
use super::error::{DiagramError, DiagramResult, SymbolKind};
use super::types::{InheritanceEdge, Member, NormalizedType, Visibility};

/// What to do with members and heritage clauses that have no resolvable symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Leave them out of the result
    #[default]
    Drop,
    /// Fail with [`DiagramError::UnresolvedSymbol`]
    Reject,
}

/// Resolve a member's visibility from its modifiers
///
/// Modifiers are scanned in order and the last `private` or `protected`
/// wins. Everything else, including an explicit `public`, leaves the
/// visibility untouched.
pub fn resolve_visibility(modifiers: &[Modifier]) -> Visibility {
    modifiers
        .iter()
        .fold(Visibility::Public, |visibility, modifier| match modifier {
            Modifier::Private => Visibility::Private,
            Modifier::Protected => Visibility::Protected,
            _ => visibility,
        })
}

/// Converts analyzer declarations into the notation-agnostic model
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: UnresolvedPolicy,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UnresolvedPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    /// Normalize a class declaration (members only, see [`Self::extract_heritage`])
    pub fn normalize_class(&self, decl: &ClassDeclaration) -> DiagramResult<NormalizedType> {
        let name = declaration_name(decl.symbol.as_deref())?;
        let span = span!(Level::DEBUG, "normalize_class", class = name);
        let _enter = span.enter();

        let mut ty = NormalizedType::class(name);
        ty.properties = self.members(name, &decl.properties, SymbolKind::Property)?;
        ty.methods = self.members(name, &decl.methods, SymbolKind::Method)?;

        debug!(
            properties = ty.properties.len(),
            methods = ty.methods.len(),
            "Normalized class"
        );
        Ok(ty)
    }

    /// Normalize an interface declaration
    pub fn normalize_interface(
        &self,
        decl: &InterfaceDeclaration,
    ) -> DiagramResult<NormalizedType> {
        let name = declaration_name(decl.symbol.as_deref())?;
        let span = span!(Level::DEBUG, "normalize_interface", interface = name);
        let _enter = span.enter();

        let mut ty = NormalizedType::interface(name);
        ty.properties = self.members(name, &decl.properties, SymbolKind::Property)?;
        ty.methods = self.members(name, &decl.methods, SymbolKind::Method)?;

        debug!(
            properties = ty.properties.len(),
            methods = ty.methods.len(),
            "Normalized interface"
        );
        Ok(ty)
    }

    /// Inheritance edges of a class: the `extends` edge first, then one edge
    /// per `implements` entry in declaration order. No de-duplication.
    pub fn extract_heritage(
        &self,
        decl: &ClassDeclaration,
    ) -> DiagramResult<Vec<InheritanceEdge>> {
        let child = declaration_name(decl.symbol.as_deref())?;

        let mut edges = Vec::with_capacity(decl.implements.len() + 1);
        for reference in decl.extends.iter().chain(decl.implements.iter()) {
            if let Some(parent) = self.heritage_identifier(child, reference)? {
                trace!(parent, child, "Heritage edge");
                edges.push(InheritanceEdge::new(parent, child));
            }
        }

        Ok(edges)
    }

    fn members(
        &self,
        owner: &str,
        declarations: &[MemberDeclaration],
        kind: SymbolKind,
    ) -> DiagramResult<Vec<Member>> {
        let mut members = Vec::with_capacity(declarations.len());
        for decl in declarations {
            match decl.symbol.as_deref() {
                Some(name) => members
                    .push(Member::new(name).with_visibility(resolve_visibility(&decl.modifiers))),
                None => self.unresolved(owner, kind)?,
            }
        }
        Ok(members)
    }

    fn heritage_identifier<'a>(
        &self,
        owner: &str,
        reference: &'a HeritageReference,
    ) -> DiagramResult<Option<&'a str>> {
        match reference.identifier.as_deref() {
            Some(identifier) => Ok(Some(identifier)),
            None => self.unresolved(owner, SymbolKind::Heritage).map(|_| None),
        }
    }

    fn unresolved(&self, owner: &str, kind: SymbolKind) -> DiagramResult<()> {
        match self.policy {
            UnresolvedPolicy::Drop => {
                debug!(owner, %kind, "Dropping unresolved symbol");
                Ok(())
            }
            UnresolvedPolicy::Reject => Err(DiagramError::unresolved(owner, kind)),
        }
    }
}

fn declaration_name(symbol: Option<&str>) -> DiagramResult<&str> {
    symbol.ok_or_else(|| DiagramError::unresolved("<anonymous>", SymbolKind::Declaration))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog() -> ClassDeclaration {
        ClassDeclaration::new("Dog")
            .with_property(MemberDeclaration::new("name"))
            .with_method(MemberDeclaration::new("bark").with_modifier(Modifier::Private))
            .extending(HeritageReference::new("Animal"))
    }

    #[test]
    fn test_resolve_visibility() {
        assert_eq!(resolve_visibility(&[]), Visibility::Public);
        assert_eq!(resolve_visibility(&[Modifier::Private]), Visibility::Private);
        assert_eq!(
            resolve_visibility(&[Modifier::Static, Modifier::Protected]),
            Visibility::Protected
        );
        assert_eq!(
            resolve_visibility(&[Modifier::Readonly, Modifier::Other("declare".into())]),
            Visibility::Public
        );
    }

    #[test]
    fn test_last_access_modifier_wins() {
        assert_eq!(
            resolve_visibility(&[Modifier::Private, Modifier::Protected]),
            Visibility::Protected
        );
        assert_eq!(
            resolve_visibility(&[Modifier::Protected, Modifier::Private]),
            Visibility::Private
        );
    }

    #[test]
    fn test_normalize_class() {
        let ty = Normalizer::new().normalize_class(&dog()).unwrap();
        assert_eq!(ty.name, "Dog");
        assert_eq!(ty.properties, vec![Member::new("name")]);
        assert_eq!(
            ty.methods,
            vec![Member::new("bark").with_visibility(Visibility::Private)]
        );
    }

    #[test]
    fn test_unresolved_members_are_dropped() {
        let decl = ClassDeclaration::new("Ghost")
            .with_property(MemberDeclaration::unresolved())
            .with_method(MemberDeclaration::unresolved());

        let ty = Normalizer::new().normalize_class(&decl).unwrap();
        assert!(ty.properties.is_empty());
        assert!(ty.methods.is_empty());
    }

    #[test]
    fn test_unresolved_members_rejected_under_strict_policy() {
        let decl = InterfaceDeclaration::new("Shape").with_method(MemberDeclaration::unresolved());

        let err = Normalizer::with_policy(UnresolvedPolicy::Reject)
            .normalize_interface(&decl)
            .unwrap_err();
        assert!(matches!(
            err,
            DiagramError::UnresolvedSymbol {
                kind: SymbolKind::Method,
                ..
            }
        ));
    }

    #[test]
    fn test_anonymous_declaration_is_an_error() {
        let err = Normalizer::new()
            .normalize_class(&ClassDeclaration::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DiagramError::UnresolvedSymbol {
                kind: SymbolKind::Declaration,
                ..
            }
        ));
    }

    #[test]
    fn test_heritage_order() {
        let decl = dog()
            .implementing(HeritageReference::new("Pet"))
            .implementing(HeritageReference::new("Serializable"));

        let edges = Normalizer::new().extract_heritage(&decl).unwrap();
        assert_eq!(
            edges,
            vec![
                InheritanceEdge::new("Animal", "Dog"),
                InheritanceEdge::new("Pet", "Dog"),
                InheritanceEdge::new("Serializable", "Dog"),
            ]
        );
    }

    #[test]
    fn test_unresolved_heritage_contributes_no_edge() {
        let decl = ClassDeclaration::new("Mixed")
            .extending(HeritageReference::unresolved())
            .implementing(HeritageReference::new("Pet"));

        let edges = Normalizer::new().extract_heritage(&decl).unwrap();
        assert_eq!(edges, vec![InheritanceEdge::new("Pet", "Mixed")]);
    }

    #[test]
    fn test_self_and_repeated_edges_pass_through() {
        let decl = ClassDeclaration::new("Loop")
            .extending(HeritageReference::new("Loop"))
            .implementing(HeritageReference::new("Pet"))
            .implementing(HeritageReference::new("Pet"));

        let edges = Normalizer::new().extract_heritage(&decl).unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], InheritanceEdge::new("Loop", "Loop"));
        assert_eq!(edges[1], edges[2]);
    }
}
