use thiserror::Error;

use super::transcript_segment::TranscriptSegment;
use crate::shared::video_id::VideoId;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("no transcript available for video {0}")]
    NotFound(VideoId),
    #[error("transcript for video {0} is empty")]
    Empty(VideoId),
    #[error("failed to read transcript for video {video_id}: {source}")]
    Read {
        video_id: VideoId,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed transcript for video {video_id}: {source}")]
    Malformed {
        video_id: VideoId,
        #[source]
        source: serde_json::Error,
    },
}

/// Domain interface for retrieving the time-stamped captions of a video.
///
/// Segments are returned in source order.
pub trait TranscriptSource: Send {
    fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}
