//! Action directives embedded by the model inside assistant text.
//!
//! The micro-format is `<action>{json}</action>` with a `type` discriminator.
//! The parser lives in `itinera-protocol`; this module only defines the
//! validated result it produces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zoom level applied when a directive names a city without one.
pub const DEFAULT_CITY_ZOOM: u8 = 12;

/// A geographic point, resolved from a display name by the static lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A validated view-change or auto-selection instruction.
///
/// Malformed or semantically unusable directives never reach this type;
/// they decode to `None` at the parser boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionDirective {
    /// Pan/zoom the map to a resolved city.
    Zoom { center: Coordinates, zoom: u8 },
    /// Switch to a tab. Unknown ids pass through as opaque strings;
    /// validating them is a UI concern.
    #[serde(rename_all = "camelCase")]
    Tab { tab_id: String },
    /// Switch tab and move the map in one step. Requires both halves to be
    /// usable; there is no partial form.
    #[serde(rename_all = "camelCase")]
    TabAndZoom {
        tab_id: String,
        center: Coordinates,
        zoom: u8,
    },
    /// The model selecting a widget option on the user's behalf
    /// ("choose for me").
    #[serde(rename_all = "camelCase")]
    ChooseWidget {
        widget_type: String,
        option: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        option_data: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}
