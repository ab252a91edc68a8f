pub mod entity_category;
pub mod entity_extractor;
pub mod entity_recognizer;
