pub mod memoizing_geocoder;
pub mod nominatim_geocoder;
