use crate::transport::TransportError;
use itinera_flow::FlowError;
use itinera_state::StateError;
use std::time::Duration;
use thiserror::Error;

/// Turn-level failures surfaced to the caller.
///
/// Malformed frames and unusable directives are not here: those are
/// absorbed at the protocol boundary and only logged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("no frame received for {}s", .timeout.as_secs())]
    Stalled { timeout: Duration },

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    State(#[from] StateError),
}
