//! Quick reply validation.
//!
//! Trust rule: a quick reply prepares a message for review, it never
//! sends. Any send-style or unknown action downgrades to `fillInput`.

use itinera_contract::{QuickReply, QuickReplyAction, QuickReplyCandidate};
use std::collections::HashSet;
use tracing::debug;

pub const MAX_QUICK_REPLIES: usize = 4;

fn parse_action(raw: Option<&str>) -> QuickReplyAction {
    match raw {
        Some("triggerWidget") => QuickReplyAction::TriggerWidget,
        Some("emitEvent") => QuickReplyAction::EmitEvent,
        Some("navigate") => QuickReplyAction::Navigate,
        Some("fillInput") | None => QuickReplyAction::FillInput,
        Some(other) => {
            debug!(action = other, "unknown quick reply action downgraded to fillInput");
            QuickReplyAction::FillInput
        }
    }
}

/// Validate candidates: drop blank labels/messages, dedup by normalized
/// label, normalize blank emoji away, cap at `max`.
pub fn sanitize_quick_replies(
    candidates: Vec<QuickReplyCandidate>,
    max: usize,
) -> Vec<QuickReply> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for candidate in candidates {
        if out.len() >= max {
            break;
        }
        let label = candidate.label.trim();
        let message = candidate.message.trim();
        if label.is_empty() || message.is_empty() {
            continue;
        }
        if !seen.insert(label.to_lowercase()) {
            continue;
        }
        out.push(QuickReply {
            label: label.to_string(),
            emoji: candidate
                .emoji
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            message: message.to_string(),
            action: parse_action(candidate.action.as_deref()),
        });
    }
    out
}
