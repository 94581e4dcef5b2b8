//! Visualization assets.
//!
//! Rendering charts is not implemented. [`plan_visuals`] only names the file
//! a rendered chart would use, so callers can see the gap instead of being
//! pointed at an image that does not exist.

use crate::models::VisualsDescriptor;
use crate::utils::sanitize_topic;

/// File name a rendered visualization for `topic` would use
pub fn visualization_file_name(topic: &str) -> String {
    format!("visualization_{}.png", sanitize_topic(topic))
}

/// Describe the visualization outcome for a request; never writes a file
pub fn plan_visuals(topic: &str, include_visuals: bool) -> VisualsDescriptor {
    if !include_visuals {
        return VisualsDescriptor::NotRequested;
    }

    tracing::debug!("Visualization rendering not implemented for '{}'", topic);
    VisualsDescriptor::NotImplemented {
        placeholder: visualization_file_name(topic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_visuals_requested() {
        assert_eq!(
            plan_visuals("Heart Failure", true),
            VisualsDescriptor::NotImplemented {
                placeholder: "visualization_Heart_Failure.png".to_string()
            }
        );
        assert!(!std::path::Path::new("visualization_Heart_Failure.png").exists());
    }

    #[test]
    fn test_plan_visuals_not_requested() {
        assert_eq!(plan_visuals("Heart Failure", false), VisualsDescriptor::NotRequested);
    }
}
