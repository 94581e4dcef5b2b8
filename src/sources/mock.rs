//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::sources::{Source, SourceError};

/// A mock source for testing that returns a predefined fragment or failure.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    fallback: String,
    response: Mutex<Result<String, String>>,
    topics: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source that answers with an empty fragment.
    pub fn new(id: &str, fallback: &str) -> Self {
        Self {
            id: id.to_string(),
            fallback: fallback.to_string(),
            response: Mutex::new(Ok(String::new())),
            topics: Mutex::new(Vec::new()),
        }
    }

    /// Set the fragment to return.
    pub fn set_fragment(&self, fragment: &str) {
        *lock(&self.response) = Ok(fragment.to_string());
    }

    /// Make every fetch fail with a network error carrying `message`.
    pub fn set_failure(&self, message: &str) {
        *lock(&self.response) = Err(message.to_string());
    }

    /// Topics this source has been asked about, in call order.
    pub fn topics(&self) -> Vec<String> {
        lock(&self.topics).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn fallback_text(&self) -> &str {
        &self.fallback
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        lock(&self.topics).push(topic.to_string());
        lock(&self.response)
            .clone()
            .map_err(SourceError::Network)
    }
}
