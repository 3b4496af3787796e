use async_trait::async_trait;
use itinera_contract::DestinationQuery;

/// Destination-suggestion side effect.
///
/// Fire-and-forget from the session's point of view: the sink owns retry
/// and error policy, and the stream loop never blocks on its outcome
/// beyond the dispatch itself. Retries are user-initiated only, so a
/// query is forwarded at most once per turn event.
#[async_trait]
pub trait SuggestionSink: Send + Sync {
    async fn request(&self, query: DestinationQuery);
}

/// Sink that drops every request. Useful when the host has no suggestion
/// surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSuggestionSink;

#[async_trait]
impl SuggestionSink for NoopSuggestionSink {
    async fn request(&self, _query: DestinationQuery) {}
}
