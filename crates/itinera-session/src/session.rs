//! Turn lifecycle and the single serialized mutation path.
//!
//! A turn: cancel any in-flight stream, boost intent confidence, open the
//! transport stream, apply events in strict wire order, then finalize on
//! the `[DONE]` frame (directive parse, widget flow). The transcript and
//! trip memory live behind one lock, which is never held across an await
//! of the network or the suggestion sink.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::suggestion::SuggestionSink;
use crate::transport::{BoxByteStream, ChatTransport, TransportError};
use futures::StreamExt;
use itinera_contract::{
    BoostResult, ChatMessage, IntentClassification, Role, StreamEvent, TripMemory, WidgetOutcome,
    WidgetRef, WidgetType,
};
use itinera_flow::{sanitize_quick_replies, FlowController, FlowDecision, TextPrompt};
use itinera_intent::boost_confidence;
use itinera_protocol::{decode_frame, parse_directive, CityResolver, SseDecoder, SseFrame};
use itinera_state::{MemoryDelta, TripMemoryStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Terminal text shown when the stream never opens, dies, or stalls.
const CONNECTION_ERROR_TEXT: &str =
    "Sorry, the connection dropped. Please send your message again.";

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Completed,
    /// Superseded by a newer turn or an explicit abort; the partial
    /// assistant message was discarded.
    Cancelled,
}

/// What one completed `send` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Id of the assistant message for this turn.
    pub message_id: String,
    pub boost: BoostResult,
    /// Whether any structured event actually changed trip memory.
    pub memory_changed: bool,
    /// The flow controller's verdict after finalization.
    pub decision: FlowDecision,
    pub status: TurnStatus,
}

enum StreamEnd {
    Done,
    Cancelled,
}

struct SessionState {
    transcript: Vec<ChatMessage>,
    store: TripMemoryStore,
    flow: FlowController,
}

/// One conversation's orchestrator.
///
/// All methods take `&self`; internal state is mutex-guarded and every
/// trip-memory mutation runs on that single serialized path in wire order.
pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    suggestions: Arc<dyn SuggestionSink>,
    geo: Arc<dyn CityResolver>,
    config: SessionConfig,
    inner: Mutex<SessionState>,
    current_turn: Mutex<Option<CancellationToken>>,
}

impl ChatSession {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        suggestions: Arc<dyn SuggestionSink>,
        geo: Arc<dyn CityResolver>,
        config: SessionConfig,
    ) -> Self {
        Self {
            transport,
            suggestions,
            geo,
            config,
            inner: Mutex::new(SessionState {
                transcript: Vec::new(),
                store: TripMemoryStore::new(),
                flow: FlowController::new(),
            }),
            current_turn: Mutex::new(None),
        }
    }

    /// Run one turn: send `user_text`, stream the response into a new
    /// assistant message, finalize it.
    ///
    /// Starting a turn cancels any in-flight one and invalidates its open
    /// widget. `intent` is the backend's classification of `user_text`,
    /// when one exists.
    pub async fn send(
        &self,
        user_text: &str,
        intent: Option<IntentClassification>,
    ) -> Result<TurnOutcome, SessionError> {
        let token = CancellationToken::new();
        {
            let mut current = self.current_turn.lock().await;
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
        }

        let (assistant_id, boost, history) = {
            let mut inner = self.inner.lock().await;
            let last_assistant = inner
                .transcript
                .iter()
                .rev()
                .find(|m| m.role == Role::Assistant)
                .map(|m| m.text.clone());
            let boost = boost_confidence(intent.as_ref(), user_text, last_assistant.as_deref());

            // A newer turn makes any widget from an older one stale.
            inner.flow.invalidate();

            inner.transcript.push(ChatMessage::user(user_text));
            let assistant = ChatMessage::assistant_streaming();
            let assistant_id = assistant.id.clone();
            inner.transcript.push(assistant);

            // Request context excludes the empty streaming placeholder.
            let history = inner.transcript[..inner.transcript.len() - 1].to_vec();
            (assistant_id, boost, history)
        };
        // A recognizable backend hint forces flow evaluation at the end of
        // the turn; which widget opens is still the computed slot order's
        // call.
        let mut widget_hint = intent
            .as_ref()
            .and_then(|i| i.widget_to_show.as_deref())
            .and_then(WidgetType::parse)
            .is_some();
        debug!(
            turn_id = %assistant_id,
            confidence = boost.boosted_confidence,
            clarify = boost.should_clarify,
            "turn started"
        );

        let mut stream = match self.transport.open(&history).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(turn_id = %assistant_id, error = %err, "stream never opened");
                self.fail_turn(&assistant_id).await;
                self.clear_turn(&token).await;
                return Err(err.into());
            }
        };

        let mut memory_changed = false;
        match self
            .consume(
                &mut stream,
                &token,
                &assistant_id,
                &mut memory_changed,
                &mut widget_hint,
            )
            .await
        {
            Ok(StreamEnd::Done) => {
                let decision = self
                    .finalize_turn(&assistant_id, memory_changed || widget_hint)
                    .await;
                self.clear_turn(&token).await;
                debug!(turn_id = %assistant_id, memory_changed, "turn completed");
                Ok(TurnOutcome {
                    message_id: assistant_id,
                    boost,
                    memory_changed,
                    decision,
                    status: TurnStatus::Completed,
                })
            }
            Ok(StreamEnd::Cancelled) => {
                // Partial buffer is discarded, never merged.
                let mut inner = self.inner.lock().await;
                inner.transcript.retain(|m| m.id != assistant_id);
                debug!(turn_id = %assistant_id, "turn cancelled");
                Ok(TurnOutcome {
                    message_id: assistant_id,
                    boost,
                    memory_changed,
                    decision: FlowDecision::Continue,
                    status: TurnStatus::Cancelled,
                })
            }
            Err(err) => {
                warn!(turn_id = %assistant_id, error = %err, "turn failed");
                self.fail_turn(&assistant_id).await;
                self.clear_turn(&token).await;
                Err(err)
            }
        }
    }

    /// Cancel the in-flight turn, if any.
    pub async fn abort(&self) {
        let mut current = self.current_turn.lock().await;
        if let Some(token) = current.take() {
            token.cancel();
        }
    }

    /// Report an open widget's decision.
    ///
    /// Routed by `(message_id, widget_type)` identity; anything but the
    /// currently open pair is rejected. On success the outcome merges into
    /// trip memory and the flow controller issues the follow-up prompt.
    pub async fn resolve_widget(
        &self,
        message_id: &str,
        widget_type: WidgetType,
        outcome: WidgetOutcome,
    ) -> Result<FlowDecision, SessionError> {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;

        let closed = inner.flow.resolve(message_id, widget_type)?;
        let delta = MemoryDelta::from_widget_outcome(&outcome, closed.return_step);
        if let Err(err) = inner.store.merge(delta) {
            // Memory untouched; keep the widget open so a corrected pick
            // can still land.
            let _ = inner
                .flow
                .try_open(closed.message_id, closed.widget_type, closed.return_step);
            return Err(err.into());
        }

        let decision = inner.flow.next_prompt(inner.store.memory());
        let mut follow_up = ChatMessage::assistant(follow_up_text(&decision));
        if let FlowDecision::OpenWidget {
            widget_type,
            seed,
            return_step,
        } = &decision
        {
            inner
                .flow
                .try_open(follow_up.id.clone(), *widget_type, *return_step)?;
            follow_up = follow_up.with_widget(WidgetRef::new(*widget_type, seed.clone()));
        }
        debug!(
            message_id = %message_id,
            widget = widget_type.as_str(),
            "widget resolved, follow-up issued"
        );
        inner.transcript.push(follow_up);
        Ok(decision)
    }

    /// Snapshot of the transcript for rendering.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.inner.lock().await.transcript.clone()
    }

    /// Snapshot of the trip memory for downstream readers.
    pub async fn memory(&self) -> TripMemory {
        self.inner.lock().await.store.snapshot()
    }

    async fn consume(
        &self,
        stream: &mut BoxByteStream,
        token: &CancellationToken,
        assistant_id: &str,
        memory_changed: &mut bool,
        widget_hint: &mut bool,
    ) -> Result<StreamEnd, SessionError> {
        let mut decoder = SseDecoder::new();
        loop {
            let read = tokio::select! {
                _ = token.cancelled() => return Ok(StreamEnd::Cancelled),
                read = timeout(self.config.stall_timeout, stream.next()) => read,
            };
            let chunk = match read {
                Err(_) => {
                    return Err(SessionError::Stalled {
                        timeout: self.config.stall_timeout,
                    })
                }
                Ok(None) => return Err(TransportError::Interrupted.into()),
                Ok(Some(Err(err))) => return Err(err.into()),
                Ok(Some(Ok(chunk))) => chunk,
            };
            for frame in decoder.feed(&chunk) {
                match frame {
                    SseFrame::Done => return Ok(StreamEnd::Done),
                    SseFrame::Data(payload) => {
                        // Malformed frames are absorbed at the boundary.
                        let Some(event) = decode_frame(&payload) else {
                            continue;
                        };
                        self.apply_event(event, assistant_id, memory_changed, widget_hint)
                            .await;
                    }
                }
            }
        }
    }

    /// Apply one decoded event. Strict wire order is preserved by calling
    /// this from the single consume loop.
    async fn apply_event(
        &self,
        event: StreamEvent,
        assistant_id: &str,
        memory_changed: &mut bool,
        widget_hint: &mut bool,
    ) {
        trace!(turn_id = %assistant_id, event = event.type_name(), "stream event");
        match event {
            StreamEvent::Content { delta } => {
                let mut inner = self.inner.lock().await;
                if let Some(msg) = inner.transcript.iter_mut().find(|m| m.id == assistant_id) {
                    msg.is_typing = false;
                    msg.text.push_str(&delta);
                }
            }
            StreamEvent::Flight { flight_data } => {
                if flight_data.needs_date_widget == Some(true)
                    || flight_data.needs_travelers_widget == Some(true)
                {
                    *widget_hint = true;
                }
                self.merge_delta(MemoryDelta::from_flight_data(&flight_data), memory_changed)
                    .await;
            }
            StreamEvent::Accommodation { accommodation_data } => {
                self.merge_delta(
                    MemoryDelta::from_accommodation(&accommodation_data),
                    memory_changed,
                )
                .await;
            }
            StreamEvent::Preferences { preferences_data } => {
                self.merge_delta(
                    MemoryDelta::from_preferences(&preferences_data),
                    memory_changed,
                )
                .await;
            }
            StreamEvent::QuickReplies { quick_replies } => {
                let replies = sanitize_quick_replies(quick_replies, self.config.max_quick_replies);
                if replies.is_empty() {
                    return;
                }
                let mut inner = self.inner.lock().await;
                if let Some(msg) = inner.transcript.iter_mut().find(|m| m.id == assistant_id) {
                    msg.quick_replies = Some(replies);
                }
            }
            StreamEvent::DestinationSuggestionRequest { query } => {
                self.suggestions.request(query).await;
            }
        }
    }

    async fn merge_delta(&self, delta: MemoryDelta, memory_changed: &mut bool) {
        if delta.is_empty() {
            return;
        }
        let mut inner = self.inner.lock().await;
        match inner.store.merge(delta) {
            Ok(report) => *memory_changed |= report.changed(),
            // Invalid structured data is a degraded parse, not a turn
            // failure; memory stays untouched.
            Err(err) => warn!(error = %err, "structured event rejected"),
        }
    }

    /// Close out the assistant message on `[DONE]`: strip the directive,
    /// then let the flow controller attach at most one widget.
    ///
    /// `evaluate_flow` is set by a memory mutation or by a backend widget
    /// hint. The hint only triggers the evaluation; the computed slot
    /// order decides which widget opens, so a hint for an
    /// unresolved-prerequisite slot is never honored as-is.
    async fn finalize_turn(&self, assistant_id: &str, evaluate_flow: bool) -> FlowDecision {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;
        let Some(msg) = inner
            .transcript
            .iter_mut()
            .find(|m| m.id == assistant_id)
        else {
            return FlowDecision::Continue;
        };
        msg.is_streaming = false;
        msg.is_typing = false;

        let parsed = parse_directive(&msg.text, self.geo.as_ref());
        msg.text = parsed.clean_content;
        msg.action = parsed.action;

        if !evaluate_flow {
            return FlowDecision::Continue;
        }
        let decision = inner.flow.next_prompt(inner.store.memory());
        if let FlowDecision::OpenWidget {
            widget_type,
            seed,
            return_step,
        } = &decision
        {
            match inner.flow.try_open(assistant_id, *widget_type, *return_step) {
                Ok(()) => msg.widget = Some(WidgetRef::new(*widget_type, seed.clone())),
                Err(err) => warn!(error = %err, "widget not attached"),
            }
        }
        decision
    }

    async fn fail_turn(&self, assistant_id: &str) {
        let mut inner = self.inner.lock().await;
        if let Some(msg) = inner.transcript.iter_mut().find(|m| m.id == assistant_id) {
            msg.is_streaming = false;
            msg.is_typing = false;
            msg.text = CONNECTION_ERROR_TEXT.to_string();
        }
    }

    /// Release the turn slot unless a newer turn already took it over.
    async fn clear_turn(&self, token: &CancellationToken) {
        let mut current = self.current_turn.lock().await;
        if !token.is_cancelled() {
            *current = None;
        }
    }
}

fn follow_up_text(decision: &FlowDecision) -> &'static str {
    match decision {
        FlowDecision::OpenWidget {
            widget_type,
            return_step,
            ..
        } => match (widget_type, return_step) {
            (WidgetType::CitySelector, _) => "Which city would you like to visit?",
            (WidgetType::DatePicker, true) | (WidgetType::DateRangePicker, true) => {
                "And when would you like to come back?"
            }
            (WidgetType::DatePicker, false) => "When would you like to leave?",
            (WidgetType::DateRangePicker, false) => "Which dates work for you?",
            (WidgetType::TravelersSelector, _) => "Who's coming along?",
        },
        FlowDecision::TextPrompt(TextPrompt::DepartureCity) => {
            "Which city will you be flying from?"
        }
        FlowDecision::ReadyToSearch => "Perfect, I have everything I need. Ready to search?",
        FlowDecision::Continue => "Got it!",
    }
}
