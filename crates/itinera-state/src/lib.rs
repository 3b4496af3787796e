//! Canonical trip memory store.
//!
//! Trip memory is mutated only through [`TripMemoryStore::merge`]: a
//! [`MemoryDelta`] is built and validated in full before any field is
//! written, so a merge either lands completely or not at all. The session
//! layer guarantees merges run on a single serialized path in strict wire
//! order; this crate guarantees atomicity of each merge.

pub mod delta;
pub mod error;
pub mod slots;
pub mod store;

pub use delta::MemoryDelta;
pub use error::{StateError, StateResult};
pub use slots::TripMemorySlots;
pub use store::{MergeReport, TripMemoryStore};
