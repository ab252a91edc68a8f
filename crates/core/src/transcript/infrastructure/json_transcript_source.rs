use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::shared::video_id::VideoId;
use crate::transcript::domain::transcript_segment::TranscriptSegment;
use crate::transcript::domain::transcript_source::{TranscriptError, TranscriptSource};

/// Reads caption dumps stored as `<dir>/<video_id>.json`.
///
/// Each file holds a JSON array of `{"text", "start", "duration"}` objects,
/// the format most caption download tools emit.
#[derive(Debug)]
pub struct JsonTranscriptSource {
    dir: PathBuf,
}

impl JsonTranscriptSource {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        self.dir.join(format!("{video_id}.json"))
    }
}

impl TranscriptSource for JsonTranscriptSource {
    fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let path = self.path_for(video_id);
        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TranscriptError::NotFound(video_id.clone()),
            _ => TranscriptError::Read {
                video_id: video_id.clone(),
                source: e,
            },
        })?;

        let segments: Vec<TranscriptSegment> =
            serde_json::from_str(&json).map_err(|e| TranscriptError::Malformed {
                video_id: video_id.clone(),
                source: e,
            })?;

        if segments.is_empty() {
            return Err(TranscriptError::Empty(video_id.clone()));
        }
        log::debug!(
            "Loaded {} transcript segments from {}",
            segments.len(),
            path.display()
        );
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn video_id() -> VideoId {
        VideoId::from_url("https://youtu.be/dQw4w9WgXcQ").unwrap()
    }

    fn write(dir: &TempDir, body: &str) {
        fs::write(dir.path().join("dQw4w9WgXcQ.json"), body).unwrap();
    }

    #[test]
    fn test_reads_segments_in_file_order() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp,
            r#"[
                {"text": "I was at the Eiffel Tower", "start": 0.0, "duration": 1.8},
                {"text": "in Paris", "start": 2.0, "duration": 1.1}
            ]"#,
        );
        let source = JsonTranscriptSource::new(tmp.path());

        let segments = source.fetch(&video_id()).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "I was at the Eiffel Tower");
        assert_eq!(segments[1].start, 2.0);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = JsonTranscriptSource::new(tmp.path());

        let err = source.fetch(&video_id()).unwrap_err();

        assert!(matches!(err, TranscriptError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, r#"{"text": "not an array"}"#);
        let source = JsonTranscriptSource::new(tmp.path());

        let err = source.fetch(&video_id()).unwrap_err();

        assert!(matches!(err, TranscriptError::Malformed { .. }));
    }

    #[test]
    fn test_empty_transcript() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "[]");
        let source = JsonTranscriptSource::new(tmp.path());

        let err = source.fetch(&video_id()).unwrap_err();

        assert!(matches!(err, TranscriptError::Empty(_)));
    }
}
