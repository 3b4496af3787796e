//! Static city-name to coordinate resolution.

use itinera_contract::Coordinates;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Resolves a display name to map coordinates.
///
/// Directive validation depends on this seam: a `zoom` whose city does not
/// resolve is dropped entirely.
pub trait CityResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Coordinates>;
}

static CITY_TABLE: LazyLock<HashMap<&'static str, Coordinates>> = LazyLock::new(|| {
    let entries: &[(&str, f64, f64)] = &[
        ("amsterdam", 52.3676, 4.9041),
        ("athens", 37.9838, 23.7275),
        ("bangkok", 13.7563, 100.5018),
        ("barcelona", 41.3874, 2.1686),
        ("berlin", 52.5200, 13.4050),
        ("buenos aires", -34.6037, -58.3816),
        ("cape town", -33.9249, 18.4241),
        ("dubai", 25.2048, 55.2708),
        ("hanoi", 21.0285, 105.8542),
        ("istanbul", 41.0082, 28.9784),
        ("kyoto", 35.0116, 135.7681),
        ("lisbon", 38.7223, -9.1393),
        ("london", 51.5074, -0.1278),
        ("los angeles", 34.0522, -118.2437),
        ("madrid", 40.4168, -3.7038),
        ("marrakech", 31.6295, -7.9811),
        ("mexico city", 19.4326, -99.1332),
        ("montreal", 45.5017, -73.5673),
        ("new york", 40.7128, -74.0060),
        ("osaka", 34.6937, 135.5023),
        ("paris", 48.8566, 2.3522),
        ("porto", 41.1579, -8.6291),
        ("prague", 50.0755, 14.4378),
        ("reykjavik", 64.1466, -21.9426),
        ("rome", 41.9028, 12.4964),
        ("seoul", 37.5665, 126.9780),
        ("singapore", 1.3521, 103.8198),
        ("sydney", -33.8688, 151.2093),
        ("tokyo", 35.6762, 139.6503),
        ("vienna", 48.2082, 16.3738),
    ];
    entries
        .iter()
        .map(|&(name, lat, lng)| (name, Coordinates::new(lat, lng)))
        .collect()
});

/// The built-in lookup over a fixed destination table, keyed by display
/// name, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGeoLookup;

impl CityResolver for StaticGeoLookup {
    fn resolve(&self, name: &str) -> Option<Coordinates> {
        CITY_TABLE
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let geo = StaticGeoLookup;
        let tokyo = geo.resolve("Tokyo").unwrap();
        assert_eq!(geo.resolve("  TOKYO "), Some(tokyo));
        assert!((tokyo.lat - 35.6762).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_city_does_not_resolve() {
        assert!(StaticGeoLookup.resolve("Atlantis").is_none());
    }
}
