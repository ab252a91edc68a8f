use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::extraction::domain::entity_category::EntityCategory;
use crate::extraction::domain::entity_recognizer::{
    EntityRecognizer, RecognizeError, RecognizedEntity,
};
use crate::shared::constants::USER_AGENT;

#[derive(Serialize)]
struct EntRequest<'a> {
    text: &'a str,
    model: &'a str,
}

/// Entity span with character (not byte) offsets into the submitted text.
#[derive(Deserialize, Debug)]
struct EntSpan {
    start: usize,
    end: usize,
    #[serde(rename = "type")]
    label: String,
}

/// Named-entity recognizer backed by a spaCy-style HTTP service.
///
/// Posts `{"text", "model"}` to `<base_url>/ent` and expects
/// `[{"start", "end", "type"}]` back.
#[derive(Debug)]
pub struct HttpEntityRecognizer {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpEntityRecognizer {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, RecognizeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RecognizeError::Service(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/ent", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EntityRecognizer for HttpEntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, RecognizeError> {
        let spans: Vec<EntSpan> = self
            .client
            .post(&self.endpoint)
            .json(&EntRequest {
                text,
                model: &self.model,
            })
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(request_error)?
            .json()
            .map_err(|e| RecognizeError::InvalidResponse(e.to_string()))?;

        spans_to_entities(text, spans)
    }
}

fn request_error(e: reqwest::Error) -> RecognizeError {
    if e.is_timeout() {
        RecognizeError::Timeout
    } else {
        RecognizeError::Service(e.to_string())
    }
}

fn spans_to_entities(text: &str, spans: Vec<EntSpan>) -> Result<Vec<RecognizedEntity>, RecognizeError> {
    let chars: Vec<char> = text.chars().collect();
    spans
        .into_iter()
        .map(|span| {
            if span.start > span.end || span.end > chars.len() {
                return Err(RecognizeError::InvalidResponse(format!(
                    "span {}..{} out of bounds for text of {} chars",
                    span.start,
                    span.end,
                    chars.len()
                )));
            }
            let surface: String = chars[span.start..span.end].iter().collect();
            Ok(RecognizedEntity::new(
                surface,
                EntityCategory::from_label(&span.label),
            ))
        })
        .collect()
}
