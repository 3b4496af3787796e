//! Priority-ordered slot resolution and the open-widget ledger.
//!
//! At most one widget awaits user input across the whole conversation.
//! That invariant is enforced here and nowhere else: callers ask
//! [`FlowController::next_prompt`] what to surface, register it through
//! [`FlowController::try_open`], and report completion through
//! [`FlowController::resolve`].

use crate::error::{FlowError, FlowResult};
use itinera_contract::{TripMemory, WidgetType};
use itinera_state::TripMemorySlots;
use serde_json::{json, Value};
use tracing::debug;

/// A plain-text follow-up that needs no widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPrompt {
    DepartureCity,
}

/// What to surface after a trip-memory mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowDecision {
    /// Open a widget seeded with pre-fill data. `return_step` marks the
    /// second date step of a round trip, which routes a date outcome to
    /// the return slot instead of departure.
    OpenWidget {
        widget_type: WidgetType,
        seed: Value,
        return_step: bool,
    },
    /// Ask in plain text; no widget involved.
    TextPrompt(TextPrompt),
    /// Every slot is filled; surface the search action.
    ReadyToSearch,
    /// Nothing to prompt for yet (destination still wholly unknown).
    Continue,
}

/// The one widget currently awaiting user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWidget {
    pub message_id: String,
    pub widget_type: WidgetType,
    pub return_step: bool,
}

/// Decides the next prompt and serializes widget openings.
#[derive(Debug, Default)]
pub struct FlowController {
    open: Option<OpenWidget>,
}

impl FlowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the slot priority order against `memory`.
    ///
    /// Pure with respect to the ledger: a decision is only binding once
    /// registered via [`try_open`](Self::try_open).
    pub fn next_prompt(&self, memory: &TripMemory) -> FlowDecision {
        if memory.country_only() {
            return FlowDecision::OpenWidget {
                widget_type: WidgetType::CitySelector,
                seed: json!({
                    "country": memory.destination.country,
                    "countryCode": memory.destination.country_code,
                }),
                return_step: false,
            };
        }
        if !memory.destination_resolved() {
            return FlowDecision::Continue;
        }
        if !memory.departure_date_known() {
            let widget_type = if memory.has_duration_hint() {
                WidgetType::DateRangePicker
            } else {
                WidgetType::DatePicker
            };
            return FlowDecision::OpenWidget {
                widget_type,
                seed: json!({
                    "mode": "departure",
                    "preferredMonth": memory.date_range.preferred_month,
                    "durationDays": memory.date_range.duration_days,
                }),
                return_step: false,
            };
        }
        if memory.return_required_and_missing() {
            // Same single/range choice as the departure step: a known
            // duration means the user thinks in ranges.
            let widget_type = if memory.has_duration_hint() {
                WidgetType::DateRangePicker
            } else {
                WidgetType::DatePicker
            };
            return FlowDecision::OpenWidget {
                widget_type,
                seed: json!({
                    "mode": "return",
                    "departure": memory.date_range.departure,
                    "durationDays": memory.date_range.duration_days,
                }),
                return_step: true,
            };
        }
        if memory.travelers_ambiguous() {
            return FlowDecision::OpenWidget {
                widget_type: WidgetType::TravelersSelector,
                seed: Value::Null,
                return_step: false,
            };
        }
        if !memory.departure_city_known() {
            return FlowDecision::TextPrompt(TextPrompt::DepartureCity);
        }
        FlowDecision::ReadyToSearch
    }

    /// Register a widget as open on `message_id`. Refused while another
    /// widget is still awaiting input.
    pub fn try_open(
        &mut self,
        message_id: impl Into<String>,
        widget_type: WidgetType,
        return_step: bool,
    ) -> FlowResult<()> {
        if let Some(open) = &self.open {
            return Err(FlowError::already_open(&open.message_id, open.widget_type));
        }
        let message_id = message_id.into();
        debug!(message_id = %message_id, widget = widget_type.as_str(), "widget opened");
        self.open = Some(OpenWidget {
            message_id,
            widget_type,
            return_step,
        });
        Ok(())
    }

    /// Close the open widget, but only for an exact identity match.
    /// Returns the closed record so callers know which step resolved.
    pub fn resolve(&mut self, message_id: &str, widget_type: WidgetType) -> FlowResult<OpenWidget> {
        let open = self.open.take().ok_or(FlowError::NoOpenWidget)?;
        if open.message_id != message_id || open.widget_type != widget_type {
            self.open = Some(open);
            return Err(FlowError::stale(message_id, widget_type));
        }
        debug!(message_id = %message_id, widget = widget_type.as_str(), "widget resolved");
        Ok(open)
    }

    /// Drop the open widget without resolving it. A newer turn makes any
    /// older widget stale.
    pub fn invalidate(&mut self) {
        if let Some(open) = self.open.take() {
            debug!(message_id = %open.message_id, widget = open.widget_type.as_str(), "open widget invalidated by newer turn");
        }
    }

    pub fn open_widget(&self) -> Option<&OpenWidget> {
        self.open.as_ref()
    }
}
