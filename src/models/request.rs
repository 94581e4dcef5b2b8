//! Tool-call arguments for seminar generation.

use serde::Serialize;
use serde_json::Value;

/// Slide count used when the caller gives none (or a falsy one)
pub const DEFAULT_SLIDES: i64 = 20;

/// Advertised lower bound for `slides` (schema metadata, not enforced)
pub const ADVERTISED_MIN_SLIDES: i64 = 10;

/// Advertised upper bound for `slides` (schema metadata, not enforced)
pub const ADVERTISED_MAX_SLIDES: i64 = 50;

/// Largest slide count accepted. Larger requests are rejected before any
/// slide text is allocated.
pub const MAX_SLIDES: i64 = 500;

/// A validated request to generate seminar materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Seminar topic
    pub topic: String,

    /// Requested slide count; drives the filler-slide range
    pub slides: i64,

    /// Whether visualization assets were requested
    pub include_visuals: bool,
}

/// Why a tool-call payload was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("arguments must be an object")]
    NotAnObject,

    #[error("'topic' is required")]
    MissingTopic,

    #[error("'topic' must be a string")]
    TopicNotString,

    #[error("'slides' must be a number")]
    SlidesNotNumber,

    #[error("'slides' must not exceed {}", MAX_SLIDES)]
    TooManySlides,

    #[error("'includeVisuals' must be a boolean")]
    IncludeVisualsNotBoolean,
}

impl GenerationRequest {
    /// Create a request with default slide count and visuals enabled
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            slides: DEFAULT_SLIDES,
            include_visuals: true,
        }
    }

    /// Set the slide count
    pub fn slides(mut self, slides: i64) -> Self {
        self.slides = slides;
        self
    }

    /// Set whether visuals are requested
    pub fn include_visuals(mut self, include_visuals: bool) -> Self {
        self.include_visuals = include_visuals;
        self
    }

    /// Validate a raw argument payload and apply defaults.
    ///
    /// Types are checked. `slides` outside the advertised 10-50 range is
    /// accepted as given up to [`MAX_SLIDES`]; `0` falls back to the default.
    /// Fractional counts round up, matching how the slide ranges treat them.
    pub fn from_arguments(args: &Value) -> Result<Self, RequestError> {
        let args = args.as_object().ok_or(RequestError::NotAnObject)?;

        let topic = match args.get("topic") {
            None => return Err(RequestError::MissingTopic),
            Some(Value::String(topic)) => topic.clone(),
            Some(_) => return Err(RequestError::TopicNotString),
        };

        let slides = match args.get("slides") {
            None => DEFAULT_SLIDES,
            Some(Value::Number(n)) => normalize_slides(n.as_f64().unwrap_or(0.0))?,
            Some(_) => return Err(RequestError::SlidesNotNumber),
        };

        let include_visuals = match args.get("includeVisuals") {
            None => true,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(RequestError::IncludeVisualsNotBoolean),
        };

        Ok(Self {
            topic,
            slides,
            include_visuals,
        })
    }
}

fn normalize_slides(raw: f64) -> Result<i64, RequestError> {
    if raw == 0.0 || raw.is_nan() {
        Ok(DEFAULT_SLIDES)
    } else if raw > MAX_SLIDES as f64 {
        Err(RequestError::TooManySlides)
    } else {
        Ok(raw.ceil() as i64)
    }
}
