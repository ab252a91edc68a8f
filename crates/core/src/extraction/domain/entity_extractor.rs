use super::entity_category::EntityCategory;
use super::entity_recognizer::{EntityRecognizer, RecognizeError};

/// A place name found in a transcript segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationMention {
    pub text: String,
    pub category: EntityCategory,
}

/// Narrows recognizer output to place mentions.
///
/// Order of appearance is preserved and repeated mentions within the same
/// text are kept.
pub struct EntityExtractor {
    recognizer: Box<dyn EntityRecognizer>,
}

impl EntityExtractor {
    pub fn new(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    pub fn extract(&self, text: &str) -> Result<Vec<LocationMention>, RecognizeError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mentions = self
            .recognizer
            .recognize(text)?
            .into_iter()
            .filter(|e| e.category.is_place())
            .filter_map(|e| {
                let trimmed = e.text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(LocationMention {
                        text: trimmed.to_string(),
                        category: e.category,
                    })
                }
            })
            .collect();
        Ok(mentions)
    }
}
