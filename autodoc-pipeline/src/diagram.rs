//! Saving the step graph as an image, or as Mermaid text when rendering fails.

use crate::artifacts::ArtifactWriter;
use crate::config::{DIAGRAM_MERMAID_FILE, DIAGRAM_PNG_FILE, MERMAID_INK_BASE};
use crate::error::{PipelineError, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use reqwest::Client;
use std::path::PathBuf;

/// Renders Mermaid text to PNG through a mermaid.ink compatible service.
#[derive(Debug, Clone)]
pub struct DiagramRenderer {
    client: Client,
    base_url: String,
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramRenderer {
    pub fn new() -> Self {
        Self { client: Client::new(), base_url: MERMAID_INK_BASE.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn image_url(&self, mermaid: &str) -> String {
        format!(
            "{}/img/{}?type=png",
            self.base_url.trim_end_matches('/'),
            URL_SAFE.encode(mermaid.as_bytes())
        )
    }

    pub async fn render_png(&self, mermaid: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.image_url(mermaid))
            .send()
            .await
            .map_err(|e| PipelineError::Diagram(format!("renderer unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Diagram(format!("renderer returned {}", status)));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Diagram(format!("reading image failed: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// Write the PNG, falling back to the Mermaid text. `None` when neither could be saved.
    pub async fn save(&self, mermaid: &str, writer: &ArtifactWriter) -> Option<PathBuf> {
        match self.render_png(mermaid).await {
            Ok(png) => match writer.save(DIAGRAM_PNG_FILE, png).await {
                Ok(path) => return Some(path),
                Err(e) => tracing::warn!(error = %e, "could not save diagram image"),
            },
            Err(e) => tracing::warn!(error = %e, "could not render diagram image"),
        }

        match writer.save(DIAGRAM_MERMAID_FILE, mermaid).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "diagram visualization failed");
                None
            }
        }
    }
}
