//! Interactive widget references and completion payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The interactive controls the flow controller may surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetType {
    CitySelector,
    DatePicker,
    DateRangePicker,
    TravelersSelector,
}

impl WidgetType {
    /// Wire name, matching the camelCase serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::CitySelector => "citySelector",
            WidgetType::DatePicker => "datePicker",
            WidgetType::DateRangePicker => "dateRangePicker",
            WidgetType::TravelersSelector => "travelersSelector",
        }
    }

    /// Parse a wire name back into a widget type.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "citySelector" => Some(WidgetType::CitySelector),
            "datePicker" => Some(WidgetType::DatePicker),
            "dateRangePicker" => Some(WidgetType::DateRangePicker),
            "travelersSelector" => Some(WidgetType::TravelersSelector),
            _ => None,
        }
    }
}

/// A widget attached to an assistant message: type plus seed data used to
/// pre-fill the control (scoped country, preferred month, duration hint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetRef {
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl WidgetRef {
    pub fn new(widget_type: WidgetType, data: Value) -> Self {
        Self { widget_type, data }
    }
}

/// The user's decision reported by an open widget.
///
/// Routed back by `(message_id, widget_type)` identity, never by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetOutcome {
    /// City picked inside a country-scoped selector.
    #[serde(rename_all = "camelCase")]
    CityChosen {
        city: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        country_code: Option<String>,
    },
    /// A single date picked (departure or return, per the widget seed).
    #[serde(rename_all = "camelCase")]
    DateChosen { date: String },
    /// A departure/return pair picked in one range control.
    #[serde(rename_all = "camelCase")]
    DateRangeChosen {
        departure: String,
        return_date: String,
    },
    /// Explicit traveler counts.
    #[serde(rename_all = "camelCase")]
    TravelersChosen {
        adults: u8,
        #[serde(default)]
        children: u8,
        #[serde(default)]
        infants: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn widget_type_round_trips_through_wire_name() {
        for wt in [
            WidgetType::CitySelector,
            WidgetType::DatePicker,
            WidgetType::DateRangePicker,
            WidgetType::TravelersSelector,
        ] {
            assert_eq!(WidgetType::parse(wt.as_str()), Some(wt));
        }
        assert_eq!(WidgetType::parse("flightSelector"), None);
    }

    #[test]
    fn outcome_decodes_from_camel_case_payload() {
        let outcome: WidgetOutcome = serde_json::from_value(json!({
            "type": "dateRangeChosen",
            "departure": "2026-09-01",
            "returnDate": "2026-09-14"
        }))
        .unwrap();
        assert_eq!(
            outcome,
            WidgetOutcome::DateRangeChosen {
                departure: "2026-09-01".into(),
                return_date: "2026-09-14".into()
            }
        );
    }
}
