//! The chat orchestrator.
//!
//! [`ChatSession`] owns one conversation: it runs the turn lifecycle
//! (cancel the previous stream, boost intent confidence, consume the SSE
//! stream, finalize with directive parsing and the widget flow), applies
//! every trip-memory mutation on a single serialized path, and routes
//! widget completions back by identity.

pub mod config;
pub mod error;
pub mod session;
pub mod suggestion;
pub mod transport;

pub use config::SessionConfig;
pub use error::SessionError;
pub use session::{ChatSession, TurnOutcome, TurnStatus};
pub use suggestion::{NoopSuggestionSink, SuggestionSink};
pub use transport::{BoxByteStream, ChatTransport, TransportError};
