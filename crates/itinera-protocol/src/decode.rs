//! Frame payload to stream event dispatch.

use itinera_contract::StreamEvent;
use tracing::warn;

/// Decode one `data:` payload into a stream event.
///
/// A malformed frame is skipped and logged, never fatal: bad JSON, a
/// missing or unknown `type`, or payload fields of the wrong shape all
/// return `None`.
pub fn decode_frame(payload: &str) -> Option<StreamEvent> {
    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, payload_len = payload.len(), "skipping malformed stream frame");
            None
        }
    }
}
