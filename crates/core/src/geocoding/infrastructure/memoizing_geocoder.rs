use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::geocoding::domain::geocoder::{GeocodeError, Geocoder};
use crate::shared::geo_coordinate::GeoCoordinate;

type ReverseKey = (u64, u64, String);

/// Decorator that remembers lookup answers for the lifetime of the wrapper.
///
/// Successes and `NoMatch` are cached; transient failures (timeouts, service
/// errors) are not, so a later identical lookup retries the inner geocoder.
pub struct MemoizingGeocoder {
    inner: Box<dyn Geocoder>,
    forward_cache: Mutex<HashMap<String, Result<GeoCoordinate, GeocodeError>>>,
    reverse_cache: Mutex<HashMap<ReverseKey, Result<String, GeocodeError>>>,
}

impl MemoizingGeocoder {
    pub fn new(inner: Box<dyn Geocoder>) -> Self {
        Self {
            inner,
            forward_cache: Mutex::new(HashMap::new()),
            reverse_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_lookups(&self) -> usize {
        let forward = self
            .forward_cache
            .lock()
            .map(|c| c.len())
            .unwrap_or_default();
        let reverse = self
            .reverse_cache
            .lock()
            .map(|c| c.len())
            .unwrap_or_default();
        forward + reverse
    }
}

fn cacheable<T>(result: &Result<T, GeocodeError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => !e.is_transient(),
    }
}

impl Geocoder for MemoizingGeocoder {
    fn forward(&self, name: &str) -> Result<GeoCoordinate, GeocodeError> {
        let key = name.trim().to_lowercase();
        if let Some(hit) = self
            .forward_cache
            .lock()
            .ok()
            .and_then(|c| c.get(&key).cloned())
        {
            log::debug!("Forward cache hit for '{name}'");
            return hit;
        }

        let result = self.inner.forward(name);
        if cacheable(&result) {
            if let Ok(mut cache) = self.forward_cache.lock() {
                cache.insert(key, result.clone());
            }
        }
        result
    }

    fn reverse(
        &self,
        coordinate: GeoCoordinate,
        language: &str,
        timeout: Duration,
    ) -> Result<String, GeocodeError> {
        let key = (
            coordinate.lat.to_bits(),
            coordinate.lon.to_bits(),
            language.to_string(),
        );
        if let Some(hit) = self
            .reverse_cache
            .lock()
            .ok()
            .and_then(|c| c.get(&key).cloned())
        {
            log::debug!("Reverse cache hit for {coordinate}");
            return hit;
        }

        let result = self.inner.reverse(coordinate, language, timeout);
        if cacheable(&result) {
            if let Ok(mut cache) = self.reverse_cache.lock() {
                cache.insert(key, result.clone());
            }
        }
        result
    }
}
