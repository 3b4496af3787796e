//! Incremental SSE frame decoder.
//!
//! Frames arrive as `data: <payload>` lines separated by blank lines and
//! the stream ends with a literal `data: [DONE]`. Chunk boundaries fall
//! anywhere, including inside a line or a UTF-8 sequence, so bytes are
//! buffered until a full line is available.

use tracing::trace;

/// Literal terminal payload.
pub const DONE_MARKER: &str = "[DONE]";

/// One framed unit from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// The JSON payload of one `data:` line.
    Data(String),
    /// The `data: [DONE]` terminator.
    Done,
}

/// Stateful decoder carrying the partial line between reads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes; return every frame completed by it.
    ///
    /// Non-`data:` lines (comments, `event:` fields, blank separators) are
    /// ignored. Frames after a `Done` are not suppressed here; the caller
    /// stops reading at `Done`.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(newline) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim();
            if payload.is_empty() {
                continue;
            }
            if payload == DONE_MARKER {
                trace!("stream terminator frame");
                frames.push(SseFrame::Done);
            } else {
                frames.push(SseFrame::Data(payload.to_string()));
            }
        }
        frames
    }

    /// Bytes still buffered (an incomplete trailing line).
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }
}
