//! Outcome of a successful generation.

use serde::Serialize;
use std::fmt;

/// What happened to the visualization assets of a request.
///
/// Rendering is not implemented; a requested visualization only carries the
/// file name it would have used, and no file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VisualsDescriptor {
    /// The caller turned visuals off
    NotRequested,

    /// Visuals were requested but rendering is not implemented
    NotImplemented {
        /// File name a rendered visualization would use
        placeholder: String,
    },
}

impl VisualsDescriptor {
    /// Whether an actual file backs this descriptor (never, for now)
    pub fn has_artifact(&self) -> bool {
        false
    }
}

impl fmt::Display for VisualsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualsDescriptor::NotRequested => write!(f, "not requested"),
            VisualsDescriptor::NotImplemented { placeholder } => write!(
                f,
                "{} (not generated: visualization rendering is not implemented)",
                placeholder
            ),
        }
    }
}

/// Files produced for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Path of the written deck
    pub deck_file_path: String,

    /// Visualization status
    pub visuals: VisualsDescriptor,

    /// Number of slides written to the deck
    pub slides_written: usize,
}

impl GenerationResult {
    /// Status text returned to the caller
    pub fn status_message(&self) -> String {
        format!(
            "Seminar materials generated successfully.\nPPTX: {}\nVisuals: {}",
            self.deck_file_path, self.visuals
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let result = GenerationResult {
            deck_file_path: "seminar_Diabetes.pptx".to_string(),
            visuals: VisualsDescriptor::NotImplemented {
                placeholder: "visualization_Diabetes.png".to_string(),
            },
            slides_written: 10,
        };

        assert_eq!(
            result.status_message(),
            "Seminar materials generated successfully.\n\
             PPTX: seminar_Diabetes.pptx\n\
             Visuals: visualization_Diabetes.png (not generated: visualization rendering is not implemented)"
        );
    }

    #[test]
    fn test_visuals_not_requested() {
        let visuals = VisualsDescriptor::NotRequested;
        assert_eq!(visuals.to_string(), "not requested");
        assert!(!visuals.has_artifact());
    }
}
