//! The canonical, merge-only trip memory store.

use crate::delta::MemoryDelta;
use crate::error::{StateError, StateResult};
use chrono::NaiveDate;
use itinera_contract::TripMemory;
use tracing::debug;

/// What a merge actually changed. Drives the flow controller re-trigger
/// rule: only a turn that mutated memory re-evaluates the widget flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub changed_slots: Vec<&'static str>,
}

impl MergeReport {
    /// Whether any slot changed value.
    pub fn changed(&self) -> bool {
        !self.changed_slots.is_empty()
    }
}

/// Owns the single `TripMemory` of a planning session.
///
/// All mutation goes through [`TripMemoryStore::merge`]; the delta is
/// validated in full first, so memory is never partially updated. The
/// session layer serializes calls in strict wire order.
#[derive(Debug, Default)]
pub struct TripMemoryStore {
    memory: TripMemory,
}

/// Set `slot` to `value` if present and different; record the change.
fn fill<T: PartialEq>(
    slot: &mut Option<T>,
    value: Option<T>,
    name: &'static str,
    changed: &mut Vec<&'static str>,
) {
    if let Some(value) = value {
        if slot.as_ref() != Some(&value) {
            *slot = Some(value);
            changed.push(name);
        }
    }
}

/// Like [`fill`], but never overwrites an already-resolved slot.
fn fill_if_empty<T: PartialEq>(
    slot: &mut Option<T>,
    value: Option<T>,
    name: &'static str,
    changed: &mut Vec<&'static str>,
) {
    if slot.is_none() {
        fill(slot, value, name, changed);
    }
}

impl TripMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing memory (restored session).
    pub fn with_memory(memory: TripMemory) -> Self {
        Self { memory }
    }

    /// Read-only view of the canonical memory.
    pub fn memory(&self) -> &TripMemory {
        &self.memory
    }

    /// Clone of the canonical memory for downstream readers.
    pub fn snapshot(&self) -> TripMemory {
        self.memory.clone()
    }

    /// Apply a delta atomically: validate everything, then write everything.
    ///
    /// Date ordering is checked against the combined result, so a delta
    /// carrying only a return date is still rejected when it lands before
    /// the departure date already in memory.
    pub fn merge(&mut self, delta: MemoryDelta) -> StateResult<MergeReport> {
        delta.validate()?;
        self.check_date_order(&delta)?;

        let mut changed = Vec::new();
        let m = &mut self.memory;

        fill(
            &mut m.destination.city,
            delta.destination_city,
            "destination.city",
            &mut changed,
        );
        fill(
            &mut m.destination.country,
            delta.destination_country,
            "destination.country",
            &mut changed,
        );
        fill(
            &mut m.destination.country_code,
            delta.destination_country_code,
            "destination.countryCode",
            &mut changed,
        );
        fill(
            &mut m.departure_city,
            delta.departure_city,
            "departureCity",
            &mut changed,
        );
        // Accommodation check-in/out only fill empty date slots; flight
        // dates overwrite. Both arrive through the same delta shape, so
        // the distinction is: explicit dates always win over nothing,
        // and later exact dates replace earlier exact dates.
        fill(
            &mut m.date_range.departure,
            delta.departure_date,
            "dateRange.departure",
            &mut changed,
        );
        fill(
            &mut m.date_range.return_date,
            delta.return_date,
            "dateRange.return",
            &mut changed,
        );
        fill(
            &mut m.date_range.duration_days,
            delta.duration_days,
            "dateRange.durationDays",
            &mut changed,
        );
        fill_if_empty(
            &mut m.date_range.preferred_month,
            delta.preferred_month,
            "dateRange.preferredMonth",
            &mut changed,
        );
        if let Some(trip_type) = delta.trip_type {
            if m.trip_type != trip_type {
                m.trip_type = trip_type;
                changed.push("tripType");
            }
        }
        fill(&mut m.travelers.adults, delta.adults, "travelers.adults", &mut changed);
        fill(
            &mut m.travelers.children,
            delta.children,
            "travelers.children",
            &mut changed,
        );
        fill(
            &mut m.travelers.infants,
            delta.infants,
            "travelers.infants",
            &mut changed,
        );
        // Explicit counts always clear the ambiguity marker.
        let ambiguous = if delta.adults.is_some() {
            Some(false)
        } else {
            delta.travelers_ambiguous
        };
        if let Some(ambiguous) = ambiguous {
            if m.travelers.ambiguous != ambiguous {
                m.travelers.ambiguous = ambiguous;
                changed.push("travelers.ambiguous");
            }
        }
        fill(
            &mut m.preferences.style,
            delta.style,
            "preferences.style",
            &mut changed,
        );
        fill(
            &mut m.preferences.budget,
            delta.budget,
            "preferences.budget",
            &mut changed,
        );
        for (list, incoming, name) in [
            (&mut m.preferences.interests, delta.interests, "preferences.interests"),
            (&mut m.preferences.dietary, delta.dietary, "preferences.dietary"),
            (&mut m.preferences.must_haves, delta.must_haves, "preferences.mustHaves"),
        ] {
            let mut grew = false;
            for item in incoming {
                if !list.iter().any(|existing| existing == &item) {
                    list.push(item);
                    grew = true;
                }
            }
            if grew {
                changed.push(name);
            }
        }

        let report = MergeReport {
            changed_slots: changed,
        };
        if report.changed() {
            debug!(slots = ?report.changed_slots, "trip memory merged");
        }
        Ok(report)
    }

    fn check_date_order(&self, delta: &MemoryDelta) -> StateResult<()> {
        let departure = delta
            .departure_date
            .as_deref()
            .or(self.memory.date_range.departure.as_deref());
        let return_date = delta
            .return_date
            .as_deref()
            .or(self.memory.date_range.return_date.as_deref());
        if let (Some(dep), Some(ret)) = (
            departure.and_then(parse_exact),
            return_date.and_then(parse_exact),
        ) {
            if ret < dep {
                return Err(StateError::ReturnBeforeDeparture {
                    departure: dep.to_string(),
                    return_date: ret.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_exact(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use itinera_contract::FlightData;

    #[test]
    fn merge_is_all_or_nothing() {
        let mut store = TripMemoryStore::new();
        let bad = MemoryDelta {
            destination_city: Some("Tokyo".into()),
            destination_country_code: Some("JAPAN".into()),
            ..MemoryDelta::default()
        };
        let err = store.merge(bad).unwrap_err();
        assert!(matches!(err, StateError::InvalidCountryCode { .. }));
        // The valid city field must not have leaked through.
        assert!(store.memory().destination.city.is_none());
    }

    #[test]
    fn merge_reports_changed_slots() {
        let mut store = TripMemoryStore::new();
        let report = store
            .merge(MemoryDelta::from_flight_data(&FlightData {
                to: Some("Tokyo".into()),
                to_country: Some("Japan".into()),
                ..FlightData::default()
            }))
            .unwrap();
        assert!(report.changed());
        assert!(report.changed_slots.contains(&"destination.city"));

        // Re-merging the same data changes nothing.
        let repeat = store
            .merge(MemoryDelta::from_flight_data(&FlightData {
                to: Some("Tokyo".into()),
                ..FlightData::default()
            }))
            .unwrap();
        assert!(!repeat.changed());
    }

    #[test]
    fn return_date_before_stored_departure_is_rejected() {
        let mut store = TripMemoryStore::new();
        store
            .merge(MemoryDelta {
                departure_date: Some("2026-09-10".into()),
                ..MemoryDelta::default()
            })
            .unwrap();

        let err = store
            .merge(MemoryDelta {
                return_date: Some("2026-09-01".into()),
                ..MemoryDelta::default()
            })
            .unwrap_err();
        assert!(matches!(err, StateError::ReturnBeforeDeparture { .. }));
        assert!(store.memory().date_range.return_date.is_none());
    }

    #[test]
    fn explicit_counts_clear_ambiguity() {
        let mut store = TripMemoryStore::new();
        store
            .merge(MemoryDelta {
                travelers_ambiguous: Some(true),
                ..MemoryDelta::default()
            })
            .unwrap();
        assert!(store.memory().travelers.ambiguous);

        store
            .merge(MemoryDelta {
                adults: Some(2),
                ..MemoryDelta::default()
            })
            .unwrap();
        assert!(!store.memory().travelers.ambiguous);
        assert_eq!(store.memory().travelers.adults, Some(2));
    }

    #[test]
    fn interest_lists_grow_without_duplicates() {
        let mut store = TripMemoryStore::new();
        store
            .merge(MemoryDelta {
                interests: vec!["food".into(), "temples".into()],
                ..MemoryDelta::default()
            })
            .unwrap();
        let report = store
            .merge(MemoryDelta {
                interests: vec!["food".into(), "hiking".into()],
                ..MemoryDelta::default()
            })
            .unwrap();
        assert!(report.changed());
        assert_eq!(
            store.memory().preferences.interests,
            vec!["food", "temples", "hiking"]
        );
    }

    #[test]
    fn month_hint_does_not_overwrite_existing_hint() {
        let mut store = TripMemoryStore::new();
        store
            .merge(MemoryDelta {
                preferred_month: Some("July".into()),
                ..MemoryDelta::default()
            })
            .unwrap();
        store
            .merge(MemoryDelta {
                preferred_month: Some("August".into()),
                ..MemoryDelta::default()
            })
            .unwrap();
        assert_eq!(
            store.memory().date_range.preferred_month.as_deref(),
            Some("July")
        );
    }
}
