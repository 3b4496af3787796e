//! Shared domain contracts for the itinera trip-planning dialogue engine.
//!
//! Everything that crosses a crate boundary lives here: chat messages and
//! widget references, action directives embedded in assistant text, intent
//! classification and boost results, the trip-memory data model, quick
//! replies, and the tagged-union stream event wire contract.
//!
//! One rule applies at every decoding boundary: unrecognized or malformed
//! input decodes to `None`, never to an error.

pub mod directive;
pub mod intent;
pub mod memory;
pub mod message;
pub mod quick_reply;
pub mod stream;
pub mod widget;

pub use directive::{ActionDirective, Coordinates, DEFAULT_CITY_ZOOM};
pub use intent::{BoostResult, FrontendSignals, IntentClassification, Language};
pub use memory::{
    DateRange, Destination, Preferences, Travelers, TripMemory, TripType,
};
pub use message::{gen_message_id, ChatMessage, Role};
pub use quick_reply::{QuickReply, QuickReplyAction, QuickReplyCandidate};
pub use stream::{
    AccommodationData, DestinationQuery, FlightData, PreferencesData, StreamEvent,
};
pub use widget::{WidgetOutcome, WidgetRef, WidgetType};
