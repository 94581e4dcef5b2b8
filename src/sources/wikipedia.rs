//! Wikipedia research source using the REST page-summary endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// Wikipedia REST API base URL
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/api/rest_v1";

/// Text contributed when the summary cannot be fetched
pub const WIKIPEDIA_FALLBACK: &str = "Wikipedia data not available.\n\n";

/// Wikipedia summary source
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    client: Arc<HttpClient>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
}

impl WikipediaSource {
    /// Create a source against the public Wikipedia API
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, WIKIPEDIA_API_URL)
    }

    /// Create a source against a custom base URL (mirrors, tests)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the page-summary URL for a topic
    fn build_summary_url(&self, topic: &str) -> String {
        format!(
            "{}/page/summary/{}",
            self.base_url,
            urlencoding::encode(topic)
        )
    }

    /// Pull the `extract` field out of a page-summary response
    fn parse_summary(json: &str) -> Result<String, SourceError> {
        let summary: PageSummary = serde_json::from_str(json)?;
        summary
            .extract
            .ok_or_else(|| SourceError::Api("Wikipedia summary has no extract".to_string()))
    }
}

#[async_trait]
impl Source for WikipediaSource {
    fn id(&self) -> &str {
        "wikipedia"
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }

    fn fallback_text(&self) -> &str {
        WIKIPEDIA_FALLBACK
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        let url = self.build_summary_url(topic);
        let body = self.client.get_text(&url).await?;
        let extract = Self::parse_summary(&body)?;

        Ok(format!("Wikipedia Summary: {}\n\n", extract))
    }
}
