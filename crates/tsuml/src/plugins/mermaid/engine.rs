//! Mermaid class diagram engine
//!
//! ```text
//! classDiagram
//! class Dog {
//!     +name
//!     -bark()
//! }
//! Animal <|-- Dog
//! ```

use std::fmt::Write as _;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::{DiagramError, DiagramResult, Member, OutputOptions, TemplateEngine};

/// Header line every Mermaid class diagram starts with
pub const MERMAID_HEADER: &str = "classDiagram\n";

/// Renders Mermaid `classDiagram` blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidEngine;

impl MermaidEngine {
    pub fn new() -> Self {
        Self
    }

    /// The complete document: header plus body
    pub fn document(&self, body: &str) -> String {
        format!("{MERMAID_HEADER}{body}")
    }

    fn block(
        &self,
        name: &str,
        stereotype: Option<&str>,
        properties: &[Member],
        methods: &[Member],
    ) -> String {
        let mut out = format!("class {name} {{\n");
        if let Some(stereotype) = stereotype {
            let _ = writeln!(out, "\t<<{stereotype}>>");
        }
        for property in properties {
            let _ = writeln!(out, "\t{}{}", property.visibility.to_char(), property.name);
        }
        for method in methods {
            let _ = writeln!(out, "\t{}{}()", method.visibility.to_char(), method.name);
        }
        out.push_str("}\n");
        out
    }
}

#[async_trait]
impl TemplateEngine for MermaidEngine {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn render_inheritance(&self, parent: &str, child: &str) -> String {
        format!("{parent} <|-- {child}\n")
    }

    fn render_class(&self, name: &str, properties: &[Member], methods: &[Member]) -> String {
        self.block(name, None, properties, methods)
    }

    fn render_interface(&self, name: &str, properties: &[Member], methods: &[Member]) -> String {
        self.block(name, Some("interface"), properties, methods)
    }

    fn separator(&self) -> &'static str {
        ""
    }

    async fn finalize(&self, body: &str, options: &OutputOptions) -> DiagramResult<()> {
        let document = self.document(body);

        match &options.output {
            Some(path) => {
                tokio::fs::write(path, &document).await.map_err(|e| {
                    DiagramError::sink_failure(
                        "file",
                        format!("failed to write '{}': {}", path.display(), e),
                    )
                })?;
                info!(path = %path.display(), bytes = document.len(), "Wrote Mermaid diagram");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(document.as_bytes())
                    .await
                    .map_err(|e| DiagramError::sink_failure("stdout", e.to_string()))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| DiagramError::sink_failure("stdout", e.to_string()))?;
                debug!(bytes = document.len(), "Printed Mermaid diagram");
            }
        }

        Ok(())
    }
}
