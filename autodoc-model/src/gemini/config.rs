//! Configuration types for the Gemini provider.

use serde::{Deserialize, Serialize};

/// Default Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Google AI Studio API key.
    pub api_key: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature applied when the request carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: None,
            temperature: None,
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), ..Default::default() }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

// Keys never end up in logs.
impl std::fmt::Display for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = self.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        write!(f, "gemini(model={}, base_url={})", self.model, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_display_hides_key() {
        let config = GeminiConfig::new("secret-key", "gemini-2.5-pro").with_temperature(0.3);
        let shown = config.to_string();
        assert!(shown.contains("gemini-2.5-pro"));
        assert!(!shown.contains("secret-key"));
    }
}
