//! Request and result models for seminar generation.

mod request;
mod result;

pub use request::{
    GenerationRequest, RequestError, ADVERTISED_MAX_SLIDES, ADVERTISED_MIN_SLIDES, DEFAULT_SLIDES,
    MAX_SLIDES,
};
pub use result::{GenerationResult, VisualsDescriptor};
