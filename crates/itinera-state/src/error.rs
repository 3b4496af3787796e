//! Error types for trip memory merges.

use thiserror::Error;

/// Result type alias for trip memory operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that reject a whole delta before anything is applied.
#[derive(Debug, Error)]
pub enum StateError {
    /// A date field is present but not a calendar date.
    #[error("invalid date in field {field}: {value:?}")]
    InvalidDate {
        /// Which delta field carried the value.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// Return date precedes the departure date.
    #[error("return date {return_date} precedes departure {departure}")]
    ReturnBeforeDeparture {
        departure: String,
        return_date: String,
    },

    /// Country code is not a two-letter ISO alpha-2 code.
    #[error("invalid country code: {value:?}")]
    InvalidCountryCode { value: String },

    /// Traveler counts that cannot describe a real party.
    #[error("invalid traveler counts: {message}")]
    InvalidTravelers { message: String },

    /// Zero-length or otherwise impossible trip duration.
    #[error("invalid trip duration: {days} days")]
    InvalidDuration { days: u32 },
}

impl StateError {
    /// Create an invalid date error.
    #[inline]
    pub fn invalid_date(field: &'static str, value: impl Into<String>) -> Self {
        StateError::InvalidDate {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid traveler counts error.
    #[inline]
    pub fn invalid_travelers(message: impl Into<String>) -> Self {
        StateError::InvalidTravelers {
            message: message.into(),
        }
    }
}
