//! Gemini REST client.

use super::config::{GEMINI_API_BASE, GeminiConfig};
use super::convert::{self, GenerateContentResponse};
use autodoc_core::{AutodocError, Llm, LlmRequest, LlmResponseStream, Result};
use async_stream::try_stream;
use async_trait::async_trait;
use reqwest::Client;

/// Client for the Gemini `generateContent` API with function calling.
///
/// # Example
///
/// ```rust,ignore
/// use autodoc_model::gemini::GeminiModel;
///
/// let model = GeminiModel::new(std::env::var("GOOGLE_API_KEY")?, "gemini-2.5-flash")?;
/// ```
pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::from_config(GeminiConfig::new(api_key, model))
    }

    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AutodocError::Config("Gemini API key is empty".to_string()));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| AutodocError::Model(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_url(&self, model: &str) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        format!("{}/models/{}:generateContent", base.trim_end_matches('/'), model)
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    // generateContent is always used; the whole reply arrives as one item.
    async fn generate_content(
        &self,
        request: LlmRequest,
        _stream: bool,
    ) -> Result<LlmResponseStream> {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };
        let api_url = self.api_url(&model);
        let api_key = self.config.api_key.clone();
        let body = convert::build_request(&request, self.config.temperature);
        let client = self.client.clone();

        tracing::debug!(
            model = %model,
            contents = request.contents.len(),
            tools = request.tools.len(),
            "sending Gemini request"
        );

        let response_stream = try_stream! {
            let response = client
                .post(&api_url)
                .header("x-goog-api-key", api_key)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| AutodocError::Model(format!("Gemini request failed: {}", e)))?;

            let status = response.status();
            let parsed: GenerateContentResponse = if status.is_success() {
                response
                    .json()
                    .await
                    .map_err(|e| AutodocError::Model(format!("Invalid Gemini response: {}", e)))?
            } else {
                let error_text = response.text().await.unwrap_or_default();
                let message = format!("Gemini API error ({}): {}", status, error_text);
                Err::<GenerateContentResponse, _>(AutodocError::Model(message))?
            };

            let llm_response = convert::convert_response(parsed)?;
            if let Some(usage) = &llm_response.usage_metadata {
                tracing::debug!(
                    prompt_tokens = usage.prompt_token_count,
                    output_tokens = usage.candidates_token_count,
                    "Gemini response received"
                );
            }
            yield llm_response;
        };

        Ok(Box::pin(response_stream))
    }
}
