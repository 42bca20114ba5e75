//! yUML service client
//!
//! The service takes the diagram text as the `dsl_text` form field and
//! answers with the file name of the rendered image.

use tracing::{debug, warn};

use crate::core::{DiagramError, DiagramResult};

/// Public yUML service
pub const DEFAULT_YUML_URL: &str = "https://yuml.me";

const CLASS_DIAGRAM_PATH: &str = "/diagram/plain/class/";

/// Uploads yUML text and turns the answer into a viewable URL
#[derive(Debug, Clone)]
pub struct YumlClient {
    base_url: String,
}

impl YumlClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Class diagram endpoint, also the prefix of returned image URLs
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CLASS_DIAGRAM_PATH)
    }

    /// Upload the diagram and return the URL of its SVG rendering
    pub async fn upload(&self, dsl: &str) -> DiagramResult<String> {
        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, dsl_len = dsl.len(), "Uploading yUML diagram");

        let client = reqwest::Client::builder()
            .user_agent(concat!("tsuml/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DiagramError::sink_failure("yuml", e.to_string()))?;

        let response = client
            .post(&endpoint)
            .form(&[("dsl_text", dsl)])
            .send()
            .await
            .map_err(|e| DiagramError::sink_failure("yuml", format!("upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "yUML service rejected the diagram");
            return Err(DiagramError::sink_failure(
                "yuml",
                format!("service answered {status}"),
            ));
        }

        let file_name = response
            .text()
            .await
            .map_err(|e| DiagramError::sink_failure("yuml", e.to_string()))?;
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(DiagramError::sink_failure("yuml", "empty response"));
        }

        Ok(format!("{}{}", endpoint, file_name.replace(".png", ".svg")))
    }
}

impl Default for YumlClient {
    fn default() -> Self {
        Self::new(DEFAULT_YUML_URL)
    }
}
