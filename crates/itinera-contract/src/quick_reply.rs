//! Quick reply candidates and their validated form.

use serde::{Deserialize, Serialize};

/// What tapping a quick reply does.
///
/// There is deliberately no send action: a quick reply prepares a message
/// for user review, it never sends on the user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickReplyAction {
    #[default]
    FillInput,
    TriggerWidget,
    EmitEvent,
    Navigate,
}

/// A raw candidate as emitted by the model, before validation.
///
/// `action` is a free string here because the model also emits legacy
/// send-style actions that the engine downgrades.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplyCandidate {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A validated quick reply attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReply {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub message: String,
    pub action: QuickReplyAction,
}
