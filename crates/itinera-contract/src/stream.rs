//! Wire contract for the model's event stream.
//!
//! Each SSE frame carries one JSON object with a `type` discriminator.
//! The decoder in `itinera-protocol` maps unknown or malformed frames to
//! `None`; this enum only represents frames it recognizes.

use crate::memory::TripType;
use crate::quick_reply::QuickReplyCandidate;
use serde::{Deserialize, Serialize};

/// Flight-search tool payload. Everything is optional: the model fills in
/// whatever it extracted from the user's utterance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depart_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<TripType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infants: Option<u8>,
    /// Group/family phrasing without explicit counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travelers_ambiguous: Option<bool>,
    /// Backend widget hints. The flow controller validates these against
    /// its own computed slot order and wins every conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_date_widget: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_travelers_widget: Option<bool>,
}

/// Accommodation tool payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Preference-extraction tool payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesData {
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

/// Query for the external destination-suggestion fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

/// One decoded frame of the model's event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    /// Incremental assistant text.
    #[serde(rename = "content")]
    Content { delta: String },

    /// Structured flight extraction; merges into trip memory.
    #[serde(rename = "flightData")]
    Flight {
        #[serde(rename = "flightData")]
        flight_data: FlightData,
    },

    /// Structured accommodation extraction; merges into trip memory.
    #[serde(rename = "accommodationData")]
    Accommodation {
        #[serde(rename = "accommodationData")]
        accommodation_data: AccommodationData,
    },

    /// Structured preference extraction; merges into trip memory.
    #[serde(rename = "preferencesData")]
    Preferences {
        #[serde(rename = "preferencesData")]
        preferences_data: PreferencesData,
    },

    /// Suggested quick replies, pre-validation.
    #[serde(rename = "quickReplies")]
    QuickReplies {
        #[serde(rename = "quickReplies")]
        quick_replies: Vec<QuickReplyCandidate>,
    },

    /// Forward to the external suggestion-fetch side effect.
    #[serde(rename = "destinationSuggestionRequest")]
    DestinationSuggestionRequest {
        #[serde(default)]
        query: DestinationQuery,
    },
}

impl StreamEvent {
    /// Create a content delta event.
    pub fn content(delta: impl Into<String>) -> Self {
        Self::Content {
            delta: delta.into(),
        }
    }

    /// Create a flight-data event.
    pub fn flight(flight_data: FlightData) -> Self {
        Self::Flight { flight_data }
    }

    /// Create an accommodation-data event.
    pub fn accommodation(accommodation_data: AccommodationData) -> Self {
        Self::Accommodation { accommodation_data }
    }

    /// Create a preferences-data event.
    pub fn preferences(preferences_data: PreferencesData) -> Self {
        Self::Preferences { preferences_data }
    }

    /// Create a quick-replies event.
    pub fn quick_replies(quick_replies: Vec<QuickReplyCandidate>) -> Self {
        Self::QuickReplies { quick_replies }
    }

    /// Wire name of this event's `type` discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            StreamEvent::Content { .. } => "content",
            StreamEvent::Flight { .. } => "flightData",
            StreamEvent::Accommodation { .. } => "accommodationData",
            StreamEvent::Preferences { .. } => "preferencesData",
            StreamEvent::QuickReplies { .. } => "quickReplies",
            StreamEvent::DestinationSuggestionRequest { .. } => "destinationSuggestionRequest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_event_decodes_from_wire() {
        let ev: StreamEvent =
            serde_json::from_value(json!({ "type": "content", "delta": "Tokyo, " })).unwrap();
        assert_eq!(ev, StreamEvent::content("Tokyo, "));
    }

    #[test]
    fn flight_event_decodes_nested_payload() {
        let ev: StreamEvent = serde_json::from_value(json!({
            "type": "flightData",
            "flightData": { "to": "Tokyo", "needsDateWidget": true }
        }))
        .unwrap();
        match ev {
            StreamEvent::Flight { flight_data } => {
                assert_eq!(flight_data.to.as_deref(), Some("Tokyo"));
                assert_eq!(flight_data.needs_date_widget, Some(true));
            }
            other => panic!("expected flight event, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_a_decode_error() {
        let result = serde_json::from_value::<StreamEvent>(json!({ "type": "telemetry" }));
        assert!(result.is_err(), "unknown discriminators must not decode");
    }

    #[test]
    fn suggestion_request_tolerates_missing_query() {
        let ev: StreamEvent =
            serde_json::from_value(json!({ "type": "destinationSuggestionRequest" })).unwrap();
        assert_eq!(
            ev,
            StreamEvent::DestinationSuggestionRequest {
                query: DestinationQuery::default()
            }
        );
    }
}
