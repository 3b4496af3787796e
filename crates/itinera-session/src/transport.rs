//! The transport seam: something that opens one SSE byte stream per turn.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use itinera_contract::ChatMessage;
use std::pin::Pin;
use thiserror::Error;

/// Failures of the underlying stream.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open stream: {0}")]
    Connect(String),

    #[error("stream closed before the terminator frame")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TransportError {
    #[inline]
    pub fn connect(message: impl Into<String>) -> Self {
        TransportError::Connect(message.into())
    }
}

/// Raw bytes of one turn's response stream.
pub type BoxByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Opens the model's response stream for a turn. The conversation so far
/// (latest user message last) is the full request context; what the model
/// does with it is outside this crate.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn open(&self, history: &[ChatMessage]) -> Result<BoxByteStream, TransportError>;
}
