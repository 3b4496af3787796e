//! Slot-status queries used by the widget flow controller.

use itinera_contract::{TripMemory, TripType};

/// Extension queries over [`TripMemory`] answering "is this slot resolved".
pub trait TripMemorySlots {
    /// A specific city is known.
    fn destination_resolved(&self) -> bool;
    /// A country was extracted but no city — the city selector case.
    fn country_only(&self) -> bool;
    /// An exact departure date exists.
    fn departure_date_known(&self) -> bool;
    /// Round trip with a departure date but no return date.
    fn return_required_and_missing(&self) -> bool;
    /// Group/family phrasing without explicit counts.
    fn travelers_ambiguous(&self) -> bool;
    /// Explicit traveler counts exist.
    fn travelers_known(&self) -> bool;
    /// The origin city is known.
    fn departure_city_known(&self) -> bool;
    /// A trip-length hint exists (drives range vs single date pickers).
    fn has_duration_hint(&self) -> bool;
}

impl TripMemorySlots for TripMemory {
    fn destination_resolved(&self) -> bool {
        self.destination.city.is_some()
    }

    fn country_only(&self) -> bool {
        self.destination.city.is_none() && self.destination.country.is_some()
    }

    fn departure_date_known(&self) -> bool {
        self.date_range.departure.is_some()
    }

    fn return_required_and_missing(&self) -> bool {
        self.trip_type == TripType::Roundtrip
            && self.date_range.departure.is_some()
            && self.date_range.return_date.is_none()
    }

    fn travelers_ambiguous(&self) -> bool {
        self.travelers.ambiguous && self.travelers.adults.is_none()
    }

    fn travelers_known(&self) -> bool {
        self.travelers.adults.is_some()
    }

    fn departure_city_known(&self) -> bool {
        self.departure_city.is_some()
    }

    fn has_duration_hint(&self) -> bool {
        self.date_range.duration_days.is_some()
    }
}
