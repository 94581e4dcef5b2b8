//! PubMed research source implementation using E-utilities API.

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::sync::Arc;

use crate::sources::{Source, SourceError};
use crate::utils::{truncate_chars, HttpClient};

/// PubMed E-utilities API base URL
pub const PUBMED_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Text contributed when the search itself fails
pub const PUBMED_FALLBACK: &str = "PubMed data not available.\n\n";

/// Heading placed before the article list
const ARTICLES_HEADING: &str = "Key PubMed Articles:\n";

/// Characters of each abstract kept in the research text
const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// PubMed research source
///
/// Searches E-utilities for identifiers, then fetches each of the first
/// few articles one at a time. A failed article fetch only replaces that
/// article's line; a failed search fails the whole source.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    base_url: String,
    search_max_results: usize,
    max_articles: usize,
}

/// Title and abstract of one fetched article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub title: String,
    pub abstract_text: String,
}

impl PubMedSource {
    /// Create a source against the public E-utilities API
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, PUBMED_EUTILS_URL)
    }

    /// Create a source against a custom base URL (mirrors, tests)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_max_results: 5,
            max_articles: 3,
        }
    }

    /// Number of identifiers requested from the search endpoint (`retmax`)
    pub fn search_max_results(mut self, search_max_results: usize) -> Self {
        self.search_max_results = search_max_results;
        self
    }

    /// Number of identifiers whose articles are fetched
    pub fn max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, topic: &str) -> String {
        format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}",
            self.base_url,
            urlencoding::encode(topic),
            self.search_max_results
        )
    }

    /// Build E-utilities fetch URL for one PubMed ID
    fn build_fetch_url(&self, id: &str) -> String {
        format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    /// Parse E-utilities search response XML
    fn parse_search_response(xml: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct ESearchResult {
            #[serde(default)]
            IdList: Option<IdList>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct IdList {
            #[serde(rename = "Id", default)]
            ids: Vec<String>,
        }

        let result: ESearchResult = from_str(xml)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search XML: {}", e)))?;

        Ok(result.IdList.map(|list| list.ids).unwrap_or_default())
    }

    /// Parse E-utilities fetch response XML for the first article
    fn parse_fetch_response(xml: &str) -> Result<ArticleSummary, SourceError> {
        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct PubmedArticleSet {
            #[serde(rename = "PubmedArticle", default)]
            articles: Vec<PubmedArticle>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct PubmedArticle {
            MedlineCitation: Option<MedlineCitation>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct MedlineCitation {
            Article: Option<Article>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct Article {
            ArticleTitle: Option<ArticleTitle>,
            Abstract: Option<Abstract>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct ArticleTitle {
            #[serde(rename = "$text", default)]
            title: String,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct Abstract {
            #[serde(rename = "AbstractText", default)]
            abstract_texts: Vec<AbstractText>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct AbstractText {
            #[serde(rename = "$text", default)]
            text: String,
        }

        let result: PubmedArticleSet = from_str(xml)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed fetch XML: {}", e)))?;

        let article = result
            .articles
            .into_iter()
            .next()
            .and_then(|a| a.MedlineCitation)
            .and_then(|m| m.Article);

        let title = article
            .as_ref()
            .and_then(|a| a.ArticleTitle.as_ref())
            .map(|t| t.title.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No title".to_string());

        let abstract_text = article
            .as_ref()
            .and_then(|a| a.Abstract.as_ref())
            .map(|ab| {
                ab.abstract_texts
                    .iter()
                    .map(|at| at.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No abstract".to_string());

        Ok(ArticleSummary {
            title,
            abstract_text,
        })
    }

    /// Search for identifiers matching the topic
    async fn search_ids(&self, topic: &str) -> Result<Vec<String>, SourceError> {
        let xml = self.client.get_text(&self.build_search_url(topic)).await?;
        Self::parse_search_response(&xml)
    }

    /// Fetch and parse a single article
    async fn fetch_article(&self, id: &str) -> Result<ArticleSummary, SourceError> {
        let xml = self.client.get_text(&self.build_fetch_url(id)).await?;
        Self::parse_fetch_response(&xml)
    }
}

#[async_trait]
impl Source for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    fn fallback_text(&self) -> &str {
        PUBMED_FALLBACK
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        let ids = self.search_ids(topic).await?;

        if ids.is_empty() {
            tracing::debug!("PubMed returned no articles for '{}'", topic);
            return Ok(String::new());
        }

        let mut fragment = String::from(ARTICLES_HEADING);

        for id in ids.iter().take(self.max_articles) {
            match self.fetch_article(id).await {
                Ok(article) => {
                    fragment.push_str(&format!(
                        "- {}: {}...\n",
                        article.title,
                        truncate_chars(&article.abstract_text, ABSTRACT_PREVIEW_CHARS)
                    ));
                }
                Err(e) => {
                    tracing::warn!("PubMed article {} unavailable: {}", id, e);
                    fragment.push_str(&format!("- Article {}: Abstract not available.\n", id));
                }
            }
        }

        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEARCH_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult>
    <Count>2</Count>
    <RetMax>2</RetMax>
    <RetStart>0</RetStart>
    <IdList>
        <Id>111</Id>
        <Id>222</Id>
    </IdList>
</eSearchResult>"#;

    const FETCH_XML: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation Status="MEDLINE" Owner="NLM">
            <PMID Version="1">111</PMID>
            <Article PubModel="Print">
                <ArticleTitle>Insulin resistance in adolescents.</ArticleTitle>
                <Abstract>
                    <AbstractText Label="BACKGROUND">Background text.</AbstractText>
                    <AbstractText Label="RESULTS">Results text.</AbstractText>
                </Abstract>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

    fn source(base_url: &str) -> PubMedSource {
        PubMedSource::with_base_url(Arc::new(HttpClient::new().unwrap()), base_url)
    }

    #[test]
    fn test_build_search_url() {
        let url = source("https://example.org/eutils").build_search_url("machine learning");

        assert!(url.starts_with("https://example.org/eutils/esearch.fcgi?"));
        assert!(url.contains("db=pubmed"));
        assert!(url.contains("term=machine%20learning"));
        assert!(url.contains("retmax=5"));
    }

    #[test]
    fn test_build_search_url_custom_retmax() {
        let url = source("https://example.org/eutils")
            .search_max_results(10)
            .build_search_url("cancer");
        assert!(url.contains("retmax=10"));
    }

    #[test]
    fn test_build_fetch_url() {
        let url = source("https://example.org/eutils/").build_fetch_url("12345");
        assert_eq!(
            url,
            "https://example.org/eutils/efetch.fcgi?db=pubmed&id=12345&retmode=xml"
        );
    }

    #[test]
    fn test_parse_search_response() {
        let ids = PubMedSource::parse_search_response(SEARCH_XML).unwrap();
        assert_eq!(ids, vec!["111".to_string(), "222".to_string()]);
    }

    #[test]
    fn test_parse_search_response_empty() {
        let xml = "<eSearchResult><Count>0</Count><IdList></IdList></eSearchResult>";
        assert!(PubMedSource::parse_search_response(xml).unwrap().is_empty());

        let xml = "<eSearchResult><ERROR>Empty term and query_key - nothing todo</ERROR></eSearchResult>";
        assert!(PubMedSource::parse_search_response(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_fetch_response() {
        let article = PubMedSource::parse_fetch_response(FETCH_XML).unwrap();
        assert_eq!(article.title, "Insulin resistance in adolescents.");
        assert_eq!(article.abstract_text, "Background text. Results text.");
    }

    #[test]
    fn test_parse_fetch_response_missing_fields() {
        let xml = "<PubmedArticleSet></PubmedArticleSet>";
        let article = PubMedSource::parse_fetch_response(xml).unwrap();
        assert_eq!(article.title, "No title");
        assert_eq!(article.abstract_text, "No abstract");
    }

    #[tokio::test]
    async fn test_fetch_builds_article_list() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("db".into(), "pubmed".into()),
                Matcher::UrlEncoded("term".into(), "Diabetes".into()),
                Matcher::UrlEncoded("retmax".into(), "5".into()),
            ]))
            .with_body(SEARCH_XML)
            .create_async()
            .await;
        let first = server
            .mock("GET", "/efetch.fcgi")
            .match_query(Matcher::UrlEncoded("id".into(), "111".into()))
            .with_body(FETCH_XML)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/efetch.fcgi")
            .match_query(Matcher::UrlEncoded("id".into(), "222".into()))
            .with_status(500)
            .create_async()
            .await;

        let fragment = source(&server.url()).fetch("Diabetes").await.unwrap();

        search.assert_async().await;
        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(
            fragment,
            "Key PubMed Articles:\n\
             - Insulin resistance in adolescents.: Background text. Results text....\n\
             - Article 222: Abstract not available.\n"
        );
    }

    #[tokio::test]
    async fn test_fetch_limits_article_count() {
        let ids: String = (1..=5).map(|i| format!("<Id>{}</Id>", i)).collect();
        let search_xml = format!("<eSearchResult><IdList>{}</IdList></eSearchResult>", ids);

        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_body(search_xml)
            .create_async()
            .await;
        let fetch = server
            .mock("GET", "/efetch.fcgi")
            .match_query(Matcher::Any)
            .with_body(FETCH_XML)
            .expect(3)
            .create_async()
            .await;

        let fragment = source(&server.url()).fetch("Diabetes").await.unwrap();

        fetch.assert_async().await;
        assert_eq!(fragment.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_fetch_no_ids_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_body("<eSearchResult><IdList/></eSearchResult>")
            .create_async()
            .await;

        let fragment = source(&server.url()).fetch("Obscure").await.unwrap();
        assert!(fragment.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_search_failure_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = source(&server.url()).fetch("Diabetes").await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }
}
