use serde::{Deserialize, Serialize};

use super::geo_coordinate::GeoCoordinate;

/// A geocoded place tagged with the transcript time it was mentioned at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub place: String,
}

impl Waypoint {
    pub fn new(timestamp: f64, coordinate: GeoCoordinate, place: impl Into<String>) -> Self {
        Self {
            timestamp,
            lat: coordinate.lat,
            lon: coordinate.lon,
            place: place.into(),
        }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lon)
    }

    /// Seconds from this waypoint to `later`. Negative if `later` is earlier.
    pub fn gap_to(&self, later: &Waypoint) -> f64 {
        later.timestamp - self.timestamp
    }
}

/// Stable ascending sort by timestamp; ties keep their original order.
pub fn sort_by_timestamp(waypoints: &mut [Waypoint]) {
    waypoints.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
}

/// True if timestamps never decrease along the sequence.
pub fn is_time_ordered(waypoints: &[Waypoint]) -> bool {
    waypoints
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp)
}
