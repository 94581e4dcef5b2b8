//! # Seminar Generator
//!
//! A Model Context Protocol (MCP) server exposing one tool,
//! `generate_seminar_materials`, which researches a topic on Wikipedia and PubMed and
//! writes a PowerPoint deck built from the findings.
//!
//! ## Architecture
//!
//! - [`sources`]: Upstream research sources behind the [`Source`] trait
//! - [`research`]: Sequential, failure-tolerant research over the sources
//! - [`content`]: Slide text assembly
//! - [`deck`]: Presentation packaging
//! - [`visuals`]: Visualization descriptors
//! - [`generator`]: The end-to-end pipeline
//! - [`mcp`]: Tool registry and the stdio MCP server
//! - [`models`]: Request and result types
//! - [`config`]: Configuration management
//! - [`utils`]: HTTP client and text helpers

pub mod config;
pub mod content;
pub mod deck;
pub mod generator;
pub mod mcp;
pub mod models;
pub mod research;
pub mod sources;
pub mod utils;
pub mod visuals;

// Re-export commonly used types
pub use generator::{GenerationError, SeminarGenerator};
pub use models::{GenerationRequest, GenerationResult, VisualsDescriptor};
pub use sources::Source;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
