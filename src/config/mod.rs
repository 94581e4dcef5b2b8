//! Configuration management.
//!
//! Configuration is read from an optional TOML file and overridden by
//! environment variables prefixed with `SEMINAR_GENERATOR_`, using `__` to
//! separate sections from keys.
//!
//! # Configuration File Format
//!
//! ```toml
//! [research]
//! wikipedia_base_url = "https://en.wikipedia.org/api/rest_v1"
//! pubmed_base_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils"
//! timeout_seconds = 10
//! search_max_results = 5
//! max_articles = 3
//!
//! [output]
//! directory = "./decks"
//! ```
//!
//! ```bash
//! export SEMINAR_GENERATOR_RESEARCH__TIMEOUT_SECONDS=5
//! export SEMINAR_GENERATOR_OUTPUT__DIRECTORY=/tmp/decks
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::{PUBMED_EUTILS_URL, WIKIPEDIA_API_URL};
use crate::utils::default_user_agent;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SEMINAR_GENERATOR";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "seminar-generator.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream research settings
    #[serde(default)]
    pub research: ResearchConfig,

    /// Deck output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream research configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Wikipedia REST API base URL
    #[serde(default = "default_wikipedia_base_url")]
    pub wikipedia_base_url: String,

    /// PubMed E-utilities base URL
    #[serde(default = "default_pubmed_base_url")]
    pub pubmed_base_url: String,

    /// Timeout for every upstream request, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Identifiers requested from the PubMed search (`retmax`)
    #[serde(default = "default_search_max_results")]
    pub search_max_results: usize,

    /// Articles fetched from the search results
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    /// User agent sent upstream
    #[serde(default = "default_user_agent_string")]
    pub user_agent: String,
}

impl ResearchConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            wikipedia_base_url: default_wikipedia_base_url(),
            pubmed_base_url: default_pubmed_base_url(),
            timeout_seconds: default_timeout_seconds(),
            search_max_results: default_search_max_results(),
            max_articles: default_max_articles(),
            user_agent: default_user_agent_string(),
        }
    }
}

fn default_wikipedia_base_url() -> String {
    WIKIPEDIA_API_URL.to_string()
}

fn default_pubmed_base_url() -> String {
    PUBMED_EUTILS_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_search_max_results() -> usize {
    5
}

fn default_max_articles() -> usize {
    3
}

fn default_user_agent_string() -> String {
    default_user_agent().to_string()
}

/// Deck output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory decks are written to (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Load configuration from an optional file, layered under environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the default locations
///
/// Checks `./seminar-generator.toml`, then
/// `<config dir>/seminar-generator/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("seminar-generator").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Write the default configuration as TOML
pub fn save_default_config(path: &Path, force: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::Exists(path.to_path_buf()));
    }

    let content = toml::to_string_pretty(&Config::default())
        .map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Config file already exists: {} (use --force to overwrite)", .0.display())]
    Exists(PathBuf),
}
