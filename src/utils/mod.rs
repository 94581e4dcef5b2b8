//! Utility modules shared across the pipeline.
//!
//! - [`HttpClient`]: reqwest client with a fixed per-request timeout and user agent
//! - [`truncate_chars`]: character-safe prefix of a string
//! - [`sanitize_topic`]: file-name fragment derived from a topic

mod http;
mod text;

pub use http::{default_user_agent, HttpClient, DEFAULT_TIMEOUT};
pub use text::{sanitize_topic, truncate_chars};
