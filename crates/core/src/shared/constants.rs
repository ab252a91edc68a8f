use std::time::Duration;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const NER_SERVICE_URL: &str = "http://localhost:8080";
pub const NER_MODEL: &str = "en_core_web_sm";

pub const USER_AGENT: &str = concat!("saunter/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_LANGUAGE: &str = "en";

/// Upper bound on any single external call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim's public instance allows one request per second.
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Inclusive gap within which adjacent waypoints may be merged.
pub const RECONCILE_WINDOW_SECS: f64 = 3.0;

pub const VIDEO_ID_LEN: usize = 11;
