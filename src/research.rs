//! Topic research: consults each source in order and concatenates the results.

use std::sync::Arc;

use crate::config::ResearchConfig;
use crate::sources::{PubMedSource, Source, SourceError, SourceOutcome, WikipediaSource};
use crate::utils::HttpClient;

/// Outcome of every source consulted for one topic, in consultation order.
#[derive(Debug, Clone, Default)]
pub struct ResearchReport {
    outcomes: Vec<(String, SourceOutcome)>,
}

impl ResearchReport {
    /// Per-source outcomes keyed by source id
    pub fn outcomes(&self) -> &[(String, SourceOutcome)] {
        &self.outcomes
    }

    /// Number of sources that fell back to placeholder text
    pub fn fallback_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_fallback())
            .count()
    }

    /// The research string: every fragment concatenated in order
    pub fn text(&self) -> String {
        self.outcomes
            .iter()
            .map(|(_, outcome)| outcome.text())
            .collect()
    }
}

/// Sequential, failure-tolerant research over a fixed list of sources.
///
/// Sources are awaited one after another; a failing source is replaced by
/// its fallback text, so [`ResearchClient::research`] cannot fail.
#[derive(Debug, Clone)]
pub struct ResearchClient {
    sources: Vec<Arc<dyn Source>>,
}

impl ResearchClient {
    /// Create a client over an explicit, ordered list of sources
    pub fn new(sources: Vec<Arc<dyn Source>>) -> Self {
        Self { sources }
    }

    /// Create the standard client: Wikipedia first, PubMed second
    pub fn from_config(config: &ResearchConfig) -> Result<Self, SourceError> {
        let client = Arc::new(HttpClient::with_settings(
            &config.user_agent,
            config.timeout(),
        )?);

        let wikipedia = WikipediaSource::with_base_url(client.clone(), &config.wikipedia_base_url);
        let pubmed = PubMedSource::with_base_url(client, &config.pubmed_base_url)
            .search_max_results(config.search_max_results)
            .max_articles(config.max_articles);

        Ok(Self::new(vec![Arc::new(wikipedia), Arc::new(pubmed)]))
    }

    /// The sources in consultation order
    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    /// Research a topic
    pub async fn research(&self, topic: &str) -> ResearchReport {
        let mut report = ResearchReport::default();

        for source in &self.sources {
            let result = source.fetch(topic).await;
            let outcome = SourceOutcome::from_result(source.as_ref(), result);

            if let SourceOutcome::Fallback { reason, .. } = &outcome {
                tracing::warn!("{} data not available for '{}': {}", source.name(), topic, reason);
            } else {
                tracing::debug!("{} answered for '{}'", source.name(), topic);
            }

            report.outcomes.push((source.id().to_string(), outcome));
        }

        report
    }
}
