use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid")
});

/// An 11-character hosted-video identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts the id from a watch URL, short link or embed URL.
    ///
    /// Returns `None` when no `v=` or `/` prefixed 11-character token exists.
    pub fn from_url(url: &str) -> Option<Self> {
        VIDEO_ID_RE
            .captures(url.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::VIDEO_ID_LEN;
    use rstest::rstest;

    #[rstest]
    #[case::watch_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ")]
    #[case::watch_url_extra_params("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s", "dQw4w9WgXcQ")]
    #[case::short_link("https://youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ")]
    #[case::embed("https://www.youtube.com/embed/a-B_c1D2e3F", "a-B_c1D2e3F")]
    #[case::padded("  https://youtu.be/dQw4w9WgXcQ \n", "dQw4w9WgXcQ")]
    fn test_extracts_id(#[case] url: &str, #[case] expected: &str) {
        let id = VideoId::from_url(url).unwrap();
        assert_eq!(id.as_str(), expected);
        assert_eq!(id.as_str().len(), VIDEO_ID_LEN);
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_prefix("dQw4w9WgXcQ")]
    #[case::too_short("https://youtu.be/abc")]
    #[case::not_a_url("hello world")]
    fn test_rejects(#[case] url: &str) {
        assert!(VideoId::from_url(url).is_none());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = VideoId::from_url("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dQw4w9WgXcQ\"");
    }
}
