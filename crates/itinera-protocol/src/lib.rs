//! Wire protocol for the model's event stream.
//!
//! Three concerns live here, all obeying the same boundary rule —
//! unrecognized or malformed input decodes to `None`, never to an error:
//!
//! - [`sse`]: byte-level SSE framing (`data: <json>\n\n`, terminated by a
//!   literal `data: [DONE]`), buffering partial lines across reads;
//! - [`decode`]: JSON frame to [`itinera_contract::StreamEvent`] dispatch;
//! - [`directive`]: the `<action>{json}</action>` micro-format embedded in
//!   assistant text, with semantic validation against the [`geo`] lookup.

pub mod decode;
pub mod directive;
pub mod geo;
pub mod sse;

pub use decode::decode_frame;
pub use directive::{parse_directive, ParsedContent};
pub use geo::{CityResolver, StaticGeoLookup};
pub use sse::{SseDecoder, SseFrame};
