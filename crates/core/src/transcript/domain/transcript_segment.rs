use serde::{Deserialize, Serialize};

/// One captioned span of speech. `start` is in seconds from the beginning
/// of the video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration: 0.0,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}
