use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::geocoding::domain::geocoder::{GeocodeError, Geocoder};
use crate::shared::geo_coordinate::GeoCoordinate;

#[derive(Deserialize, Debug)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Reverse lookups answer either an address or `{"error": "..."}`.
#[derive(Deserialize, Debug)]
struct ReverseHit {
    display_name: Option<String>,
    error: Option<String>,
}

/// Connection settings for a Nominatim-compatible service.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum spacing between consecutive requests.
    pub min_interval: Duration,
}

/// Geocoder backed by the Nominatim HTTP API.
///
/// Calls are blocking and serialized; consecutive requests are spaced by at
/// least `min_interval` to respect the service's usage policy.
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        if config.user_agent.trim().is_empty() {
            return Err(GeocodeError::Service(
                "Nominatim requires a non-empty User-Agent".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| GeocodeError::Service(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            min_interval: config.min_interval,
            last_request: Mutex::new(None),
        })
    }

    fn throttle(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl Geocoder for NominatimGeocoder {
    fn forward(&self, name: &str) -> Result<GeoCoordinate, GeocodeError> {
        if name.trim().is_empty() {
            return Err(GeocodeError::NoMatch);
        }
        self.throttle();

        let hits: Vec<SearchHit> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(request_error)?
            .json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let hit = hits.into_iter().next().ok_or(GeocodeError::NoMatch)?;
        GeoCoordinate::parse(&hit.lat, &hit.lon).ok_or_else(|| {
            GeocodeError::InvalidResponse(format!("bad coordinate ({}, {})", hit.lat, hit.lon))
        })
    }

    fn reverse(
        &self,
        coordinate: GeoCoordinate,
        language: &str,
        timeout: Duration,
    ) -> Result<String, GeocodeError> {
        self.throttle();

        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let hit: ReverseHit = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("accept-language", language),
            ])
            .timeout(timeout)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(request_error)?
            .json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        match (hit.display_name, hit.error) {
            (Some(address), _) if !address.trim().is_empty() => Ok(address),
            (_, Some(reason)) => {
                log::debug!("Reverse lookup of {coordinate} found nothing: {reason}");
                Err(GeocodeError::NoMatch)
            }
            _ => Err(GeocodeError::NoMatch),
        }
    }
}

fn request_error(e: reqwest::Error) -> GeocodeError {
    if e.is_timeout() {
        GeocodeError::Timeout
    } else {
        GeocodeError::Service(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_http::{closed_port_url, serve_once};
    use approx::assert_relative_eq;

    fn geocoder(base_url: &str) -> NominatimGeocoder {
        NominatimGeocoder::new(NominatimConfig {
            base_url: base_url.to_string(),
            user_agent: "saunter-tests".to_string(),
            timeout: Duration::from_secs(5),
            min_interval: Duration::ZERO,
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_user_agent() {
        let result = NominatimGeocoder::new(NominatimConfig {
            base_url: "http://localhost".to_string(),
            user_agent: "  ".to_string(),
            timeout: Duration::from_secs(1),
            min_interval: Duration::ZERO,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_forward_parses_first_hit() {
        let (url, rx) = serve_once(
            200,
            r#"[{"lat": "48.8582599", "lon": "2.2945006", "display_name": "Tour Eiffel, Paris"}]"#,
        );

        let coord = geocoder(&url).forward("Eiffel Tower").unwrap();

        assert_relative_eq!(coord.lat, 48.8582599);
        assert_relative_eq!(coord.lon, 2.2945006);
        let request = rx.recv().unwrap();
        assert!(request.request_line.starts_with("GET /search?"));
        assert!(request.request_line.contains("q=Eiffel+Tower"));
        assert!(request.request_line.contains("limit=1"));
        assert!(request
            .headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case("user-agent: saunter-tests")));
    }

    #[test]
    fn test_forward_empty_result_is_no_match() {
        let (url, _rx) = serve_once(200, "[]");
        assert_eq!(
            geocoder(&url).forward("Atlantis"),
            Err(GeocodeError::NoMatch)
        );
    }

    #[test]
    fn test_forward_blank_name_is_no_match_without_request() {
        let g = geocoder(&closed_port_url());
        assert_eq!(g.forward("   "), Err(GeocodeError::NoMatch));
    }

    #[test]
    fn test_forward_garbage_body_is_invalid_response() {
        let (url, _rx) = serve_once(200, "<html>nope</html>");
        assert!(matches!(
            geocoder(&url).forward("Paris"),
            Err(GeocodeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_forward_unreachable_is_service_error() {
        assert!(matches!(
            geocoder(&closed_port_url()).forward("Paris"),
            Err(GeocodeError::Service(_))
        ));
    }

    #[test]
    fn test_reverse_returns_display_name() {
        let (url, rx) = serve_once(
            200,
            r#"{"display_name": "Tour Eiffel, Avenue Gustave Eiffel, Paris, France"}"#,
        );

        let address = geocoder(&url)
            .reverse(
                GeoCoordinate::new(48.8584, 2.2945),
                "en",
                Duration::from_secs(5),
            )
            .unwrap();

        assert_eq!(address, "Tour Eiffel, Avenue Gustave Eiffel, Paris, France");
        let request = rx.recv().unwrap();
        assert!(request.request_line.starts_with("GET /reverse?"));
        assert!(request.request_line.contains("accept-language=en"));
        assert!(request.request_line.contains("lat=48.8584"));
    }

    #[test]
    fn test_reverse_error_body_is_no_match() {
        let (url, _rx) = serve_once(200, r#"{"error": "Unable to geocode"}"#);
        assert_eq!(
            geocoder(&url).reverse(GeoCoordinate::new(0.0, 0.0), "en", Duration::from_secs(5)),
            Err(GeocodeError::NoMatch)
        );
    }

    #[test]
    fn test_reverse_server_error_is_service_error() {
        let (url, _rx) = serve_once(503, "{}");
        assert!(matches!(
            geocoder(&url).reverse(GeoCoordinate::new(0.0, 0.0), "en", Duration::from_secs(5)),
            Err(GeocodeError::Service(_))
        ));
    }

    #[test]
    fn test_throttle_spaces_requests() {
        let g = NominatimGeocoder::new(NominatimConfig {
            base_url: closed_port_url(),
            user_agent: "saunter-tests".to_string(),
            timeout: Duration::from_secs(1),
            min_interval: Duration::from_millis(50),
        })
        .unwrap();

        let start = Instant::now();
        g.throttle();
        g.throttle();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
