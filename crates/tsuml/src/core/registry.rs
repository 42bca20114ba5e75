//! Engine registry
//!
//! Holds the registered notations and the one selected for a run. Each run
//! owns its own registry, so selections never leak between runs.
//!
//! ```text
//! Default(engine) --select--> Selected(engine) --render*--> finalize (consumes)
//! ```

use std::collections::HashMap;

use tracing::{debug, info, span, Instrument, Level};

use super::engine::{OutputOptions, TemplateEngine};
use super::error::{DiagramError, DiagramResult};
use super::types::{Member, NormalizedType};

/// How the active engine was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSelection {
    /// Nothing selected yet; the default engine is active
    Default(String),
    /// Explicitly selected
    Selected(String),
}

impl EngineSelection {
    pub fn name(&self) -> &str {
        match self {
            EngineSelection::Default(name) | EngineSelection::Selected(name) => name,
        }
    }
}

/// Registered template engines plus the active selection
pub struct EngineRegistry {
    engines: HashMap<String, Box<dyn TemplateEngine>>,
    selection: Option<EngineSelection>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            selection: None,
        }
    }

    /// Register an engine under its own name, replacing any previous one
    ///
    /// The first engine registered becomes the default.
    pub fn register(&mut self, engine: Box<dyn TemplateEngine>) {
        let name = engine.name().to_string();
        debug!(engine = %name, "Registering template engine");
        if self.selection.is_none() {
            self.selection = Some(EngineSelection::Default(name.clone()));
        }
        self.engines.insert(name, engine);
    }

    /// Switch the active engine, validating the name up front
    pub fn select(&mut self, name: &str) -> DiagramResult<()> {
        if !self.engines.contains_key(name) {
            return Err(DiagramError::unknown_engine(name, self.engines()));
        }
        info!(engine = name, "Selected template engine");
        self.selection = Some(EngineSelection::Selected(name.to_string()));
        Ok(())
    }

    /// Current selection, `None` only for an empty registry
    pub fn selection(&self) -> Option<&EngineSelection> {
        self.selection.as_ref()
    }

    /// Registered engine names, sorted
    pub fn engines(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.keys().cloned().collect();
        names.sort();
        names
    }

    /// The engine every dispatch goes to
    pub fn active(&self) -> DiagramResult<&dyn TemplateEngine> {
        self.selection
            .as_ref()
            .and_then(|selection| self.engines.get(selection.name()))
            .map(|engine| engine.as_ref())
            .ok_or_else(|| DiagramError::unknown_engine("<none>", self.engines()))
    }

    pub fn render_inheritance(&self, parent: &str, child: &str) -> DiagramResult<String> {
        Ok(self.active()?.render_inheritance(parent, child))
    }

    pub fn render_class(
        &self,
        name: &str,
        properties: &[Member],
        methods: &[Member],
    ) -> DiagramResult<String> {
        Ok(self.active()?.render_class(name, properties, methods))
    }

    pub fn render_interface(
        &self,
        name: &str,
        properties: &[Member],
        methods: &[Member],
    ) -> DiagramResult<String> {
        Ok(self.active()?.render_interface(name, properties, methods))
    }

    pub fn render_type(&self, ty: &NormalizedType) -> DiagramResult<String> {
        Ok(self.active()?.render_type(ty))
    }

    pub fn separator(&self) -> DiagramResult<&'static str> {
        Ok(self.active()?.separator())
    }

    /// Hand the diagram body to the active engine's sink
    ///
    /// Consumes the registry: a finalized run cannot render again.
    pub async fn finalize(self, body: &str, options: &OutputOptions) -> DiagramResult<()> {
        let engine = self.active()?;
        let span = span!(Level::INFO, "finalize", engine = engine.name(), body_len = body.len());
        engine.finalize(body, options).instrument(span).await
    }
}
