//! Optional web-search collaborator (Serper).
//!
//! Construction is guarded: without a `SERPER_API_KEY` in the environment
//! the tool simply does not exist, and the rest of the system keeps working.
//! Absence is "capability unavailable", never a startup failure.
//!
//! No role currently binds [`crate::agents::Capability::WebSearch`], so the
//! tool is constructed and reported but not consulted by the live pipeline.

use crate::error::AnalyzerError;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

/// A configured Serper web-search client.
pub struct SearchTool {
    client: reqwest::Client,
    api_key: String,
}

impl SearchTool {
    /// Construct the tool from the environment, if a key is available.
    ///
    /// Returns `None` when `SERPER_API_KEY` is unset or empty, or when the
    /// HTTP client cannot be built.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SERPER_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .ok()?;

        Some(Self { client, api_key })
    }

    /// Run a search and return a compact text digest of the organic results.
    pub async fn search(&self, query: &str) -> Result<String, AnalyzerError> {
        debug!("Web search: {query}");

        let response = self
            .client
            .post(SERPER_ENDPOINT)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": query }))
            .send()
            .await
            .map_err(|e| AnalyzerError::Internal(format!("search request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AnalyzerError::Internal(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Internal(format!("search response unreadable: {e}")))?;

        let mut digest = String::new();
        if let Some(results) = body.get("organic").and_then(|v| v.as_array()) {
            for result in results.iter().take(5) {
                let title = result.get("title").and_then(|v| v.as_str()).unwrap_or("");
                let snippet = result.get("snippet").and_then(|v| v.as_str()).unwrap_or("");
                let link = result.get("link").and_then(|v| v.as_str()).unwrap_or("");
                digest.push_str(&format!("- {title}: {snippet} ({link})\n"));
            }
        }

        Ok(digest)
    }
}
