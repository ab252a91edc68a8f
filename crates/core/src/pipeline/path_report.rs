use serde::{Deserialize, Serialize};

use crate::shared::video_id::VideoId;
use crate::shared::waypoint::Waypoint;

/// The artifact handed to the web layer: `{"video_id", "path": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    pub video_id: VideoId,
    pub path: Vec<Waypoint>,
}

impl PathReport {
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
