//! yUML class diagram engine
//!
//! Every type becomes a colored name box followed by a member box, edges
//! use the `^-` connector, and fragments are comma-joined:
//!
//! ```text
//! [Cat{bg:skyblue}][Cat|age;|meow();],[Animal]^-[Cat]
//! ```

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::upload::YumlClient;
use crate::core::{DiagramError, DiagramResult, Member, OutputOptions, TemplateEngine};

pub const CLASS_BACKGROUND: &str = "skyblue";
pub const INTERFACE_BACKGROUND: &str = "palegreen";

/// Renders yUML bracket notation and publishes it through a yUML service
#[derive(Debug, Clone, Default)]
pub struct YumlEngine {
    client: YumlClient,
}

impl YumlEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different yUML service
    pub fn with_service(base_url: impl Into<String>) -> Self {
        Self {
            client: YumlClient::new(base_url),
        }
    }

    pub fn client(&self) -> &YumlClient {
        &self.client
    }

    fn node(
        &self,
        name: &str,
        background: &str,
        properties: &[Member],
        methods: &[Member],
    ) -> String {
        let properties: String = properties.iter().map(|p| format!("{};", p.name)).collect();
        let methods: String = methods.iter().map(|m| format!("{}();", m.name)).collect();
        format!("[{name}{{bg:{background}}}][{name}|{properties}|{methods}]")
    }
}

#[async_trait]
impl TemplateEngine for YumlEngine {
    fn name(&self) -> &'static str {
        "yuml"
    }

    fn render_inheritance(&self, parent: &str, child: &str) -> String {
        format!("[{parent}]^-[{child}]")
    }

    fn render_class(&self, name: &str, properties: &[Member], methods: &[Member]) -> String {
        self.node(name, CLASS_BACKGROUND, properties, methods)
    }

    fn render_interface(&self, name: &str, properties: &[Member], methods: &[Member]) -> String {
        self.node(name, INTERFACE_BACKGROUND, properties, methods)
    }

    fn separator(&self) -> &'static str {
        ","
    }

    /// Upload the body, then deliver the image URL
    ///
    /// The URL goes to `options.output` when set and to stdout otherwise;
    /// the viewer is opened on top of that when `open_viewer` is set.
    async fn finalize(&self, body: &str, options: &OutputOptions) -> DiagramResult<()> {
        let url = self.client.upload(body).await?;
        info!(url = %url, "yUML diagram published");

        let line = format!("{url}\n");
        match &options.output {
            Some(path) => {
                tokio::fs::write(path, &line).await.map_err(|e| {
                    DiagramError::sink_failure(
                        "file",
                        format!("failed to write '{}': {}", path.display(), e),
                    )
                })?;
                debug!(path = %path.display(), "Wrote yUML diagram URL");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(line.as_bytes())
                    .await
                    .map_err(|e| DiagramError::sink_failure("stdout", e.to_string()))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| DiagramError::sink_failure("stdout", e.to_string()))?;
            }
        }

        if options.open_viewer {
            open::that(&url).map_err(|e| {
                DiagramError::sink_failure("viewer", format!("failed to open {url}: {e}"))
            })?;
        }

        Ok(())
    }
}
