pub mod http_entity_recognizer;
