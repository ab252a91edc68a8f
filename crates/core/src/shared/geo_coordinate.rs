use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses the string-encoded latitude/longitude pair that geocoding
    /// services commonly return.
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        let coord = Self::new(lat, lon);
        coord.is_valid().then_some(coord)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_string_pair() {
        let c = GeoCoordinate::parse("48.8584", " 2.2945").unwrap();
        assert_relative_eq!(c.lat, 48.8584);
        assert_relative_eq!(c.lon, 2.2945);
    }

    #[rstest]
    #[case::not_a_number("north", "2.0")]
    #[case::empty_lon("48.0", "")]
    #[case::lat_out_of_range("91.0", "0.0")]
    #[case::lon_out_of_range("0.0", "-180.5")]
    fn test_parse_rejects(#[case] lat: &str, #[case] lon: &str) {
        assert!(GeoCoordinate::parse(lat, lon).is_none());
    }

    #[test]
    fn test_display_rounds_to_four_places() {
        let c = GeoCoordinate::new(48.858_44, 2.294_51);
        assert_eq!(c.to_string(), "(48.8584, 2.2945)");
    }
}
