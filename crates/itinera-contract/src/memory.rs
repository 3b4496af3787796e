//! Trip memory: the slot-filling state of one planning session.
//!
//! These are plain data types. The canonical mutable store, with its
//! serialized all-or-nothing merge path, lives in `itinera-state`.

use serde::{Deserialize, Serialize};

/// Round-trip is the default and the only shape requiring a return date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    Roundtrip,
    Oneway,
    Multi,
}

/// Destination slot. A bare country (city unset) is an unresolved
/// destination that scopes the city selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Travel dates. ISO `YYYY-MM-DD` strings once resolved; month-only or
/// vague phrasing stays out of these fields and lands in the hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    /// Trip length hint ("two weeks") captured before exact dates exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    /// Month hint ("sometime in July") used to pre-seed date widgets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_month: Option<String>,
}

/// Traveler counts. `ambiguous` marks group/family phrasing without
/// numbers; explicit counts clear it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travelers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infants: Option<u8>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ambiguous: bool,
}

/// Soft preferences; never gate the widget flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_haves: Vec<String>,
}

/// The full slot-filling state of one planning session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMemory {
    #[serde(default)]
    pub destination: Destination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub travelers: Travelers,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub preferences: Preferences,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_memory_is_all_unset_roundtrip() {
        let memory = TripMemory::default();
        assert_eq!(memory.trip_type, TripType::Roundtrip);
        assert!(memory.destination.city.is_none());
        assert!(!memory.travelers.ambiguous);
    }

    #[test]
    fn return_date_uses_wire_name() {
        let range = DateRange {
            departure: Some("2026-09-01".into()),
            return_date: Some("2026-09-14".into()),
            ..DateRange::default()
        };
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["return"], "2026-09-14");
        assert_eq!(json["departure"], "2026-09-01");
    }

    #[test]
    fn memory_round_trips_through_json() {
        let memory: TripMemory = serde_json::from_value(json!({
            "destination": { "city": "Tokyo", "country": "Japan", "countryCode": "JP" },
            "tripType": "oneway",
            "travelers": { "adults": 2, "ambiguous": false }
        }))
        .unwrap();
        assert_eq!(memory.destination.city.as_deref(), Some("Tokyo"));
        assert_eq!(memory.trip_type, TripType::Oneway);
        assert_eq!(memory.travelers.adults, Some(2));
    }
}
