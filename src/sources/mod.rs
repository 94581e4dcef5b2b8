//! Research source plugins.
//!
//! A [`Source`] turns a topic into one fragment of research text. Sources
//! never decide how a failure is shown to the caller: they return a
//! [`SourceError`] and the research client downgrades it to the source's
//! fixed [`Source::fallback_text`], producing a [`SourceOutcome`].
//!
//! Two sources back the seminar pipeline:
//!
//! - [`WikipediaSource`] - encyclopedia summary by title
//! - [`PubMedSource`] - E-utilities search followed by per-article fetches
//!
//! [`MockSource`] returns canned fragments or errors for tests.

pub mod mock;
mod pubmed;
mod wikipedia;

pub use mock::MockSource;
pub use pubmed::{ArticleSummary, PubMedSource, PUBMED_EUTILS_URL, PUBMED_FALLBACK};
pub use wikipedia::{WikipediaSource, WIKIPEDIA_API_URL, WIKIPEDIA_FALLBACK};

use async_trait::async_trait;

/// The Source trait defines the interface for all research source plugins.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "wikipedia", "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fixed text substituted when [`Source::fetch`] fails
    fn fallback_text(&self) -> &str;

    /// Fetch the research fragment for a topic
    async fn fetch(&self, topic: &str) -> Result<String, SourceError>;
}

/// Result of consulting one source: the fragment it produced, or the
/// fallback text that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source answered; the fragment may be empty
    Found(String),

    /// The source failed and was replaced by fixed text
    Fallback {
        /// Fallback text contributed to the research string
        text: String,
        /// Why the source failed (logged, never shown to the caller)
        reason: String,
    },
}

impl SourceOutcome {
    /// Build an outcome from a fetch result
    pub fn from_result(source: &dyn Source, result: Result<String, SourceError>) -> Self {
        match result {
            Ok(fragment) => SourceOutcome::Found(fragment),
            Err(err) => SourceOutcome::Fallback {
                text: source.fallback_text().to_string(),
                reason: err.to_string(),
            },
        }
    }

    /// Text this outcome contributes to the research string
    pub fn text(&self) -> &str {
        match self {
            SourceOutcome::Found(fragment) => fragment,
            SourceOutcome::Fallback { text, .. } => text,
        }
    }

    /// Whether the source was replaced by its fallback text
    pub fn is_fallback(&self) -> bool {
        matches!(self, SourceOutcome::Fallback { .. })
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// API error from the source (non-success status, missing fields)
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<quick_xml::DeError> for SourceError {
    fn from(err: quick_xml::DeError) -> Self {
        SourceError::Parse(format!("XML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_ok() {
        let source = MockSource::new("mock", "Mock fallback.\n");
        let outcome = SourceOutcome::from_result(&source, Ok("fragment".to_string()));

        assert_eq!(outcome, SourceOutcome::Found("fragment".to_string()));
        assert_eq!(outcome.text(), "fragment");
        assert!(!outcome.is_fallback());
    }

    #[test]
    fn test_outcome_from_err_uses_fallback_text() {
        let source = MockSource::new("mock", "Mock fallback.\n");
        let outcome = SourceOutcome::from_result(
            &source,
            Err(SourceError::Network("connection refused".to_string())),
        );

        assert!(outcome.is_fallback());
        assert_eq!(outcome.text(), "Mock fallback.\n");
        match outcome {
            SourceOutcome::Fallback { reason, .. } => assert!(reason.contains("connection refused")),
            SourceOutcome::Found(_) => panic!("expected fallback"),
        }
    }
}
