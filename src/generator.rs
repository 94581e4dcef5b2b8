//! Seminar generation pipeline: research, slide text, deck, visuals.

use std::sync::Arc;

use crate::config::Config;
use crate::content::assemble_slides;
use crate::deck::{DeckError, DeckWriter};
use crate::models::{GenerationRequest, GenerationResult};
use crate::research::ResearchClient;
use crate::sources::SourceError;
use crate::visuals::plan_visuals;

/// Errors that abort a generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Deck(#[from] DeckError),

    #[error("Failed to initialize research client: {0}")]
    Setup(#[from] SourceError),
}

/// Runs one request end to end.
///
/// Research never fails (sources fall back to fixed text), so the only
/// aborting step is writing the deck.
#[derive(Debug, Clone)]
pub struct SeminarGenerator {
    research: ResearchClient,
    deck: Arc<DeckWriter>,
}

impl SeminarGenerator {
    pub fn new(research: ResearchClient, deck: DeckWriter) -> Self {
        Self {
            research,
            deck: Arc::new(deck),
        }
    }

    /// Build the standard generator from configuration
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let research = ResearchClient::from_config(&config.research)?;
        let deck = DeckWriter::new(config.output.directory.clone());
        Ok(Self::new(research, deck))
    }

    pub fn research_client(&self) -> &ResearchClient {
        &self.research
    }

    pub fn deck_writer(&self) -> &DeckWriter {
        &self.deck
    }

    /// Generate seminar materials for a validated request
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        tracing::info!(
            "Generating seminar on '{}' ({} slides, visuals: {})",
            request.topic,
            request.slides,
            request.include_visuals
        );

        let report = self.research.research(&request.topic).await;
        if report.fallback_count() > 0 {
            tracing::info!(
                "{} of {} sources fell back for '{}'",
                report.fallback_count(),
                report.outcomes().len(),
                request.topic
            );
        }

        let content = assemble_slides(&request.topic, &report.text(), request.slides);

        let deck = self.deck.clone();
        let topic = request.topic.clone();
        let slides = request.slides;
        let (path, slides_written) =
            tokio::task::spawn_blocking(move || deck.write(&topic, &content, slides))
                .await
                .map_err(|e| DeckError::Task(e.to_string()))?
                .inspect_err(|e| tracing::error!("Failed to write deck: {}", e))?;

        let visuals = plan_visuals(&request.topic, request.include_visuals);

        tracing::info!("Wrote {} ({} slides)", path.display(), slides_written);

        Ok(GenerationResult {
            deck_file_path: path.display().to_string(),
            visuals,
            slides_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisualsDescriptor;
    use crate::sources::{MockSource, Source};
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn generator(dir: &std::path::Path) -> (SeminarGenerator, Arc<MockSource>, Arc<MockSource>) {
        let wiki = Arc::new(MockSource::new("wikipedia", "Wikipedia data not available.\n\n"));
        let pubmed = Arc::new(MockSource::new("pubmed", "PubMed data not available.\n\n"));
        let sources: Vec<Arc<dyn Source>> = vec![wiki.clone(), pubmed.clone()];
        let generator = SeminarGenerator::new(
            ResearchClient::new(sources),
            DeckWriter::new(Some(dir.to_path_buf())),
        );
        (generator, wiki, pubmed)
    }

    #[tokio::test]
    async fn test_generate_writes_deck() {
        let dir = tempdir().unwrap();
        let (generator, wiki, _) = generator(dir.path());
        wiki.set_fragment("Wikipedia Summary: Insulin.\n\n");

        let request = GenerationRequest::new("Diabetes").slides(12);
        let result = generator.generate(&request).await.unwrap();

        let expected = dir.path().join("seminar_Diabetes.pptx");
        assert_eq!(result.deck_file_path, expected.display().to_string());
        assert_eq!(result.slides_written, 12);
        assert_eq!(
            result.visuals,
            VisualsDescriptor::NotImplemented {
                placeholder: "visualization_Diabetes.png".to_string()
            }
        );
        assert!(!dir.path().join("visualization_Diabetes.png").exists());

        let mut archive = ZipArchive::new(std::fs::File::open(&expected).unwrap()).unwrap();
        let mut slide = String::new();
        archive
            .by_name("ppt/slides/slide4.xml")
            .unwrap()
            .read_to_string(&mut slide)
            .unwrap();
        assert!(slide.contains("Insulin."));
        assert_eq!(wiki.topics(), vec!["Diabetes".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_survives_source_failures() {
        let dir = tempdir().unwrap();
        let (generator, wiki, pubmed) = generator(dir.path());
        wiki.set_failure("connection refused");
        pubmed.set_failure("connection refused");

        let request = GenerationRequest::new("Asthma").include_visuals(false);
        let result = generator.generate(&request).await.unwrap();

        assert_eq!(result.visuals, VisualsDescriptor::NotRequested);
        assert!(result.status_message().ends_with("Visuals: not requested"));
        assert!(dir.path().join("seminar_Asthma.pptx").exists());
    }

    #[tokio::test]
    async fn test_generate_fails_when_deck_cannot_be_written() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let (generator, _, _) = generator(&blocker);

        let err = generator
            .generate(&GenerationRequest::new("Diabetes"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Deck(DeckError::Io(_))));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.output.directory = Some("decks".into());
        let generator = SeminarGenerator::from_config(&config).unwrap();
        assert_eq!(generator.research_client().sources().len(), 2);
        assert_eq!(
            generator.deck_writer().output_dir(),
            Some(std::path::Path::new("decks"))
        );
    }
}
