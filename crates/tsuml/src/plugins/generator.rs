//! Diagram generator coordinating the whole pipeline
//!
//! Declarations → Normalizer → DiagramModel → TemplateEngine → finalize

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{
    DeclarationSet, DiagramModel, EngineKind, EngineRegistry, ModelEntry, Normalizer,
    OutputOptions, UnresolvedPolicy,
};

/// Runs one diagram generation
///
/// The generator owns its engine registry, so concurrent generators never
/// share an engine selection.
pub struct Generator {
    registry: EngineRegistry,
    normalizer: Normalizer,
}

impl Generator {
    /// Create a generator around a configured registry
    pub fn new(registry: EngineRegistry) -> Self {
        Self {
            registry,
            normalizer: Normalizer::new(),
        }
    }

    /// Create a generator with the builtin engines and `kind` selected
    pub fn with_engine(kind: EngineKind) -> Result<Self> {
        Ok(Self::new(EngineRegistry::for_engine(kind)?))
    }

    /// Set how unresolved symbols are treated
    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.normalizer = Normalizer::with_policy(policy);
        self
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalize declarations into the intermediate model
    pub fn build_model(&self, declarations: &DeclarationSet) -> Result<DiagramModel> {
        Ok(DiagramModel::from_declarations(declarations, &self.normalizer)?)
    }

    /// Render every model entry with the active engine and join the fragments
    pub fn render_model(&self, model: &DiagramModel) -> Result<String> {
        let engine = self.registry.active()?;
        let render_span = span!(Level::INFO, "render_model", engine = engine.name());
        let _enter = render_span.enter();

        let fragments: Vec<String> = model
            .entries()
            .map(|entry| match entry {
                ModelEntry::Type(ty) => engine.render_type(ty),
                ModelEntry::Edge(edge) => engine.render_inheritance(&edge.parent, &edge.child),
            })
            .collect();

        debug!(fragments = fragments.len(), "Rendered fragments");
        Ok(fragments.join(engine.separator()))
    }

    /// Produce the diagram body without delivering it
    pub fn generate_dsl(&self, declarations: &DeclarationSet) -> Result<String> {
        let model = self.build_model(declarations)?;
        self.render_model(&model)
    }

    /// Render the declarations and hand the result to the engine's sink
    ///
    /// Consumes the generator; a finalized run cannot be reused.
    pub async fn run(self, declarations: &DeclarationSet, options: &OutputOptions) -> Result<()> {
        info!("Starting diagram generation");

        let body = {
            let span = span!(Level::INFO, "generate", engine = self.engine_name());
            let _enter = span.enter();
            self.generate_dsl(declarations)?
        };

        self.registry.finalize(&body, options).await?;

        info!("Diagram generation completed");
        Ok(())
    }

    fn engine_name(&self) -> &str {
        self.registry
            .selection()
            .map(|selection| selection.name())
            .unwrap_or("<none>")
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(EngineRegistry::with_builtin_engines())
    }
}
