//! Widget flow: which control to surface next, and the single-open-widget
//! ledger that serializes them.
//!
//! [`controller`] turns the current trip memory into the next prompt via a
//! strict priority order and owns the open-widget ledger. [`quick_reply`]
//! validates model-emitted quick reply candidates.

pub mod controller;
pub mod error;
pub mod quick_reply;

pub use controller::{FlowController, FlowDecision, OpenWidget, TextPrompt};
pub use error::{FlowError, FlowResult};
pub use quick_reply::{sanitize_quick_replies, MAX_QUICK_REPLIES};
