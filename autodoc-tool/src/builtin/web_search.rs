//! Library documentation search backed by the Tavily search API.

use autodoc_core::{AutodocError, Result, Tool, ToolContext};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Default Tavily API base URL.
pub const TAVILY_API_BASE: &str = "https://api.tavily.com";

const DEFAULT_MAX_RESULTS: usize = 2;
const SNIPPET_CHARS: usize = 200;

/// Searches the web for documentation and examples of a Python library.
///
/// # Input
///
/// ```json
/// { "library_name": "requests" }
/// ```
///
/// # Output
///
/// A single string, one block per result separated by `\n---\n`:
///
/// ```text
/// Source: https://requests.readthedocs.io
/// Content: Requests is an elegant and simple HTTP library...
/// ```
pub struct WebSearchTool {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AutodocError::Config("search API key is empty".to_string()));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| AutodocError::Tool(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: TAVILY_API_BASE.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Query sent to the search service for a library.
    pub fn query_for(library_name: &str) -> String {
        format!("{} python library documentation examples", library_name)
    }

    /// Run a raw query and return at most `max_results` hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let body = TavilyRequest { query, max_results: self.max_results, search_depth: "basic" };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AutodocError::Tool(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("Search API error ({}): {}", status, error_text);
            return Err(AutodocError::Tool(message));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AutodocError::Tool(format!("Invalid search response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .take(self.max_results)
            .map(|r| SearchResult::new(r.title, r.url, r.content))
            .collect())
    }
}

impl std::fmt::Debug for WebSearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchTool")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .finish()
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "search_library_info"
    }

    fn description(&self) -> &str {
        "Search for information about a Python library including documentation and usage examples."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "library_name": {
                    "type": "string",
                    "description": "Name of the Python library or module to look up"
                }
            },
            "required": ["library_name"]
        }))
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Args {
            library_name: String,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| AutodocError::Tool(format!("Invalid arguments: {}", e)))?;

        let query = Self::query_for(&args.library_name);
        tracing::info!(
            library = %args.library_name,
            max_results = self.max_results,
            "library search requested"
        );

        let results = self.search(&query).await?;
        tracing::debug!(hits = results.len(), "library search complete");

        Ok(Value::String(format_results(&results)))
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self { title: title.into(), url: url.into(), snippet: snippet.into() }
    }

    /// `Source: <url>\nContent: <first 200 chars>...`
    pub fn render(&self) -> String {
        let snippet: String = self.snippet.chars().take(SNIPPET_CHARS).collect();
        format!("Source: {}\nContent: {}...", self.url, snippet)
    }
}

pub fn format_results(results: &[SearchResult]) -> String {
    results.iter().map(SearchResult::render).collect::<Vec<_>>().join("\n---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = WebSearchTool::new("tvly-key").unwrap();
        assert_eq!(tool.name(), "search_library_info");
        assert_eq!(tool.max_results(), 2);
        let schema = tool.parameters_schema().unwrap();
        assert_eq!(schema["required"][0], "library_name");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(WebSearchTool::new(""), Err(AutodocError::Config(_))));
    }

    #[test]
    fn test_query_for_library() {
        assert_eq!(
            WebSearchTool::query_for("numpy"),
            "numpy python library documentation examples"
        );
    }

    #[test]
    fn test_render_truncates_snippet() {
        let long = "x".repeat(500);
        let rendered = SearchResult::new("t", "https://example.com", long).render();
        let expected = format!("Source: https://example.com\nContent: {}...", "x".repeat(200));
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_multibyte_snippet() {
        let rendered = SearchResult::new("t", "u", "é".repeat(250)).render();
        assert!(rendered.ends_with(&format!("{}...", "é".repeat(200))));
    }

    #[test]
    fn test_format_results_joins_with_separator() {
        let results = vec![
            SearchResult::new("a", "https://a.dev", "alpha"),
            SearchResult::new("b", "https://b.dev", "beta"),
        ];
        assert_eq!(
            format_results(&results),
            "Source: https://a.dev\nContent: alpha...\n---\nSource: https://b.dev\nContent: beta..."
        );
        assert_eq!(format_results(&[]), "");
    }
}
