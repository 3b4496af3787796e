//! Conversation transcript model.

use crate::directive::ActionDirective;
use crate::quick_reply::QuickReply;
use crate::widget::WidgetRef;
use serde::{Deserialize, Serialize};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Generate a time-ordered UUID v7 message identifier.
pub fn gen_message_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// One message in the planning conversation.
///
/// While a turn is streaming, `text` holds the partial accumulation and
/// `is_streaming` is set. A widget attached to a message is immutable once
/// set and is resolved exactly once, routed by `(id, widget type)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable message identifier (UUID v7, auto-generated).
    pub id: String,
    pub role: Role,
    /// Message text; partial while `is_streaming` is set.
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_streaming: bool,
    /// Typing indicator: the turn is open but no content has arrived yet.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_typing: bool,
    /// At most one interactive widget per message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
    /// Action directive extracted from the assistant text, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDirective>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: gen_message_id(),
            role: Role::User,
            text: text.into(),
            is_streaming: false,
            is_typing: false,
            widget: None,
            quick_replies: None,
            action: None,
        }
    }

    /// Create a completed assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: gen_message_id(),
            role: Role::Assistant,
            text: text.into(),
            is_streaming: false,
            is_typing: false,
            widget: None,
            quick_replies: None,
            action: None,
        }
    }

    /// Create an empty assistant message in the streaming state.
    pub fn assistant_streaming() -> Self {
        Self {
            id: gen_message_id(),
            role: Role::Assistant,
            text: String::new(),
            is_streaming: true,
            is_typing: true,
            widget: None,
            quick_replies: None,
            action: None,
        }
    }

    /// Attach a widget to this message.
    #[must_use]
    pub fn with_widget(mut self, widget: WidgetRef) -> Self {
        self.widget = Some(widget);
        self
    }
}
