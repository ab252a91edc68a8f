use std::time::Duration;

use thiserror::Error;

use crate::shared::geo_coordinate::GeoCoordinate;

/// Why a lookup produced no usable answer. Never fatal to a pipeline run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("no match")]
    NoMatch,
    #[error("geocoding service timed out")]
    Timeout,
    #[error("geocoding request failed: {0}")]
    Service(String),
    #[error("geocoding service returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl GeocodeError {
    /// Stable short name, used as a counter key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::Timeout => "timeout",
            Self::Service(_) => "service",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    /// Whether a retry of the same lookup could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Service(_))
    }
}

/// Domain interface for forward and reverse geocoding.
pub trait Geocoder: Send + Sync {
    fn forward(&self, name: &str) -> Result<GeoCoordinate, GeocodeError>;

    /// Maps a coordinate to a human-readable address in `language`.
    ///
    /// `timeout` bounds this single call.
    fn reverse(
        &self,
        coordinate: GeoCoordinate,
        language: &str,
        timeout: Duration,
    ) -> Result<String, GeocodeError>;
}

/// A non-fatal lookup failure attributed to the mention it concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupFailure {
    pub place: String,
    pub timestamp: f64,
    pub error: GeocodeError,
}
