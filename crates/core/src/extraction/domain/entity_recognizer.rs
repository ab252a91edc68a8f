use thiserror::Error;

use super::entity_category::EntityCategory;

/// A span of text the recognizer tagged with a category.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedEntity {
    pub text: String,
    pub category: EntityCategory,
}

impl RecognizedEntity {
    pub fn new(text: impl Into<String>, category: EntityCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("entity recognizer timed out")]
    Timeout,
    #[error("entity recognizer request failed: {0}")]
    Service(String),
    #[error("entity recognizer returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Domain interface for named-entity recognition.
///
/// Implementations return entities in the order they occur in `text`.
/// Recognizers are shared read-only across runs, hence `&self` and `Sync`.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, RecognizeError>;
}
