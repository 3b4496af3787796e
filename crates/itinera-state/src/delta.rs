//! Memory deltas: the only way trip memory changes.
//!
//! A delta is assembled from one structured-data event or one widget
//! outcome, then validated as a whole. Vague date phrasing never lands in
//! the date fields; it is demoted to the `preferred_month` hint so the
//! flow controller still sees the slot as unresolved.

use chrono::NaiveDate;
use itinera_contract::{
    AccommodationData, FlightData, PreferencesData, TripType, WidgetOutcome,
};
use crate::error::{StateError, StateResult};

/// A validated-as-a-whole set of slot updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDelta {
    pub destination_city: Option<String>,
    pub destination_country: Option<String>,
    pub destination_country_code: Option<String>,
    pub departure_city: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub duration_days: Option<u32>,
    pub preferred_month: Option<String>,
    pub trip_type: Option<TripType>,
    pub adults: Option<u8>,
    pub children: Option<u8>,
    pub infants: Option<u8>,
    pub travelers_ambiguous: Option<bool>,
    pub style: Option<String>,
    pub interests: Vec<String>,
    pub budget: Option<String>,
    pub dietary: Vec<String>,
    pub must_haves: Vec<String>,
}

/// True for exact `YYYY-MM-DD` calendar dates.
pub(crate) fn is_exact_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Route a raw date string: exact dates resolve the slot, anything else
/// (month names, "cet été") is kept only as a month hint.
fn split_date_field(
    raw: Option<&String>,
    date_slot: &mut Option<String>,
    month_hint: &mut Option<String>,
) {
    let Some(raw) = non_blank(raw) else {
        return;
    };
    if is_exact_date(&raw) {
        *date_slot = Some(raw);
    } else {
        *month_hint = Some(raw);
    }
}

impl MemoryDelta {
    /// Build a delta from a flight-data event.
    pub fn from_flight_data(data: &FlightData) -> Self {
        let mut delta = Self {
            destination_city: non_blank(data.to.as_ref()),
            destination_country: non_blank(data.to_country.as_ref()),
            destination_country_code: non_blank(data.to_country_code.as_ref()),
            departure_city: non_blank(data.from.as_ref()),
            duration_days: data.duration_days,
            preferred_month: non_blank(data.preferred_month.as_ref()),
            trip_type: data.trip_type,
            adults: data.adults,
            children: data.children,
            infants: data.infants,
            travelers_ambiguous: data.travelers_ambiguous,
            ..Self::default()
        };
        split_date_field(
            data.depart_date.as_ref(),
            &mut delta.departure_date,
            &mut delta.preferred_month,
        );
        if let Some(ret) = non_blank(data.return_date.as_ref()) {
            if is_exact_date(&ret) {
                delta.return_date = Some(ret);
            }
        }
        delta
    }

    /// Build a delta from an accommodation-data event.
    ///
    /// Check-in/check-out dates double as travel dates when flights have
    /// not pinned them yet; the merge only fills empty slots.
    pub fn from_accommodation(data: &AccommodationData) -> Self {
        let mut delta = Self {
            destination_city: non_blank(data.city.as_ref()),
            style: non_blank(data.style.as_ref()),
            ..Self::default()
        };
        split_date_field(
            data.checkin.as_ref(),
            &mut delta.departure_date,
            &mut delta.preferred_month,
        );
        if let Some(out) = non_blank(data.checkout.as_ref()) {
            if is_exact_date(&out) {
                delta.return_date = Some(out);
            }
        }
        delta
    }

    /// Build a delta from a preferences-data event.
    pub fn from_preferences(data: &PreferencesData) -> Self {
        Self {
            style: non_blank(data.style.as_ref()),
            interests: data.interests.clone(),
            budget: non_blank(data.budget.as_ref()),
            dietary: data.dietary.clone(),
            must_haves: data.must_haves.clone(),
            ..Self::default()
        }
    }

    /// Build a delta from a resolved widget outcome.
    ///
    /// `return_step` marks a single-date outcome as filling the return
    /// slot rather than the departure slot.
    pub fn from_widget_outcome(outcome: &WidgetOutcome, return_step: bool) -> Self {
        match outcome {
            WidgetOutcome::CityChosen {
                city,
                country,
                country_code,
            } => Self {
                destination_city: Some(city.clone()),
                destination_country: country.clone(),
                destination_country_code: country_code.clone(),
                ..Self::default()
            },
            WidgetOutcome::DateChosen { date } => {
                if return_step {
                    Self {
                        return_date: Some(date.clone()),
                        ..Self::default()
                    }
                } else {
                    Self {
                        departure_date: Some(date.clone()),
                        ..Self::default()
                    }
                }
            }
            WidgetOutcome::DateRangeChosen {
                departure,
                return_date,
            } => Self {
                departure_date: Some(departure.clone()),
                return_date: Some(return_date.clone()),
                ..Self::default()
            },
            WidgetOutcome::TravelersChosen {
                adults,
                children,
                infants,
            } => Self {
                adults: Some(*adults),
                children: Some(*children),
                infants: Some(*infants),
                travelers_ambiguous: Some(false),
                ..Self::default()
            },
        }
    }

    /// Whether the delta carries any update at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the whole delta. Nothing is applied if any check fails.
    pub fn validate(&self) -> StateResult<()> {
        let departure = self
            .departure_date
            .as_deref()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| StateError::invalid_date("departure", d))
            })
            .transpose()?;
        let return_date = self
            .return_date
            .as_deref()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| StateError::invalid_date("return", d))
            })
            .transpose()?;
        if let (Some(dep), Some(ret)) = (departure, return_date) {
            if ret < dep {
                return Err(StateError::ReturnBeforeDeparture {
                    departure: dep.to_string(),
                    return_date: ret.to_string(),
                });
            }
        }
        if let Some(code) = &self.destination_country_code {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(StateError::InvalidCountryCode {
                    value: code.clone(),
                });
            }
        }
        if let Some(0) = self.adults {
            return Err(StateError::invalid_travelers(
                "a party needs at least one adult",
            ));
        }
        if let Some(0) = self.duration_days {
            return Err(StateError::InvalidDuration { days: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_dates_resolve_vague_dates_become_hints() {
        let exact = MemoryDelta::from_flight_data(&FlightData {
            depart_date: Some("2026-09-01".into()),
            ..FlightData::default()
        });
        assert_eq!(exact.departure_date.as_deref(), Some("2026-09-01"));
        assert!(exact.preferred_month.is_none());

        let vague = MemoryDelta::from_flight_data(&FlightData {
            depart_date: Some("July".into()),
            ..FlightData::default()
        });
        assert!(vague.departure_date.is_none());
        assert_eq!(vague.preferred_month.as_deref(), Some("July"));
    }

    #[test]
    fn validate_rejects_return_before_departure() {
        let delta = MemoryDelta {
            departure_date: Some("2026-09-14".into()),
            return_date: Some("2026-09-01".into()),
            ..MemoryDelta::default()
        };
        assert!(matches!(
            delta.validate(),
            Err(StateError::ReturnBeforeDeparture { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_country_code() {
        let delta = MemoryDelta {
            destination_country_code: Some("JPN1".into()),
            ..MemoryDelta::default()
        };
        assert!(matches!(
            delta.validate(),
            Err(StateError::InvalidCountryCode { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_adults() {
        let delta = MemoryDelta {
            adults: Some(0),
            ..MemoryDelta::default()
        };
        assert!(delta.validate().is_err());
    }

    #[test]
    fn travelers_outcome_clears_ambiguity() {
        let delta = MemoryDelta::from_widget_outcome(
            &WidgetOutcome::TravelersChosen {
                adults: 2,
                children: 1,
                infants: 0,
            },
            false,
        );
        assert_eq!(delta.travelers_ambiguous, Some(false));
        assert_eq!(delta.adults, Some(2));
    }

    #[test]
    fn single_date_outcome_targets_the_requested_slot() {
        let outcome = WidgetOutcome::DateChosen {
            date: "2026-09-14".into(),
        };
        let dep = MemoryDelta::from_widget_outcome(&outcome, false);
        assert_eq!(dep.departure_date.as_deref(), Some("2026-09-14"));
        let ret = MemoryDelta::from_widget_outcome(&outcome, true);
        assert_eq!(ret.return_date.as_deref(), Some("2026-09-14"));
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        let delta = MemoryDelta::from_flight_data(&FlightData {
            to: Some("  ".into()),
            from: Some("".into()),
            ..FlightData::default()
        });
        assert!(delta.is_empty());
    }
}
