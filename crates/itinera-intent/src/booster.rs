//! Confidence boosting: reconcile the backend's intent label with local
//! keyword signals and the assistant's last question.

use crate::analyzer::{analyze_message, classify_assistant_topic, detect_language, AssistantTopic};
use itinera_contract::{BoostResult, FrontendSignals, IntentClassification};
use tracing::debug;

const ALIGNMENT_BOOST: i32 = 15;
const TOPIC_BOOST: i32 = 10;
const TRAVELERS_TOPIC_BOOST: i32 = 5;
const SENTIMENT_BOOST: i32 = 10;
const SENTIMENT_PENALTY: i32 = -20;
const CLARIFY_THRESHOLD: u8 = 40;
const DELEGATE_FLOOR: u8 = 50;
const DELEGATE_CUTOFF: u8 = 60;

/// Signal-to-intent alignment table. A firing signal adds
/// [`ALIGNMENT_BOOST`] when the backend intent is in its list.
const ALIGNMENTS: &[(fn(&FrontendSignals) -> bool, &[&str])] = &[
    (
        |s| s.wants_budget_info,
        &["budget_inquiry", "provide_budget"],
    ),
    (
        |s| s.wants_date_info,
        &["date_inquiry", "provide_dates", "date_selection"],
    ),
    (|s| s.wants_comparison, &["compare_options"]),
    (
        |s| s.wants_more_options,
        &["request_alternatives", "more_options"],
    ),
    (
        |s| s.wants_to_book,
        &["booking_request", "confirm_booking"],
    ),
];

const CONFIRM_INTENTS: &[&str] = &["confirm_booking", "confirm_selection", "accept_suggestion"];
const REJECT_INTENTS: &[&str] = &["reject_suggestion", "cancel_request", "decline_option"];

fn clamp_confidence(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Reconcile the backend classification with local signals from the user's
/// message and the assistant's preceding question.
///
/// Missing backend classification yields zero confidence plus a
/// clarification request. A clearly undecided user with a shaky backend
/// label short-circuits to "delegate the choice" before any signal
/// accumulation runs.
pub fn boost_confidence(
    backend: Option<&IntentClassification>,
    user_message: &str,
    last_assistant_message: Option<&str>,
) -> BoostResult {
    let signals = analyze_message(user_message);
    let language = detect_language(user_message);
    let topic = last_assistant_message
        .map(classify_assistant_topic)
        .unwrap_or(AssistantTopic::Other);

    let Some(backend) = backend else {
        return BoostResult {
            boosted_confidence: 0,
            should_clarify: true,
            suggested_intent: None,
            frontend_signals: signals,
            detected_language: language,
        };
    };

    if signals.is_undecided && backend.confidence < DELEGATE_CUTOFF {
        return BoostResult {
            boosted_confidence: backend.confidence.max(DELEGATE_FLOOR),
            should_clarify: false,
            suggested_intent: Some("delegate_choice".to_string()),
            frontend_signals: signals,
            detected_language: language,
        };
    }

    let intent = backend.primary_intent.as_str();
    let mut boost: i32 = 0;

    for (fires, intents) in ALIGNMENTS {
        if fires(&signals) && intents.contains(&intent) {
            boost += ALIGNMENT_BOOST;
        }
    }

    if CONFIRM_INTENTS.contains(&intent) {
        if signals.is_positive {
            boost += SENTIMENT_BOOST;
        }
        if signals.is_negative {
            boost += SENTIMENT_PENALTY;
        }
    }
    if REJECT_INTENTS.contains(&intent) {
        if signals.is_negative {
            boost += SENTIMENT_BOOST;
        }
        if signals.is_positive {
            boost += SENTIMENT_PENALTY;
        }
    }

    match topic {
        AssistantTopic::DatesQuestion if signals.wants_date_info => boost += TOPIC_BOOST,
        AssistantTopic::BudgetQuestion if signals.wants_budget_info || signals.mentioned_budget => {
            boost += TOPIC_BOOST
        }
        // A travelers question primes any answer; there is no travelers
        // signal to align against, so the bump is flat and small.
        AssistantTopic::TravelersQuestion => boost += TRAVELERS_TOPIC_BOOST,
        _ => {}
    }

    let boosted = clamp_confidence(i32::from(backend.confidence) + boost);
    debug!(
        intent,
        backend_confidence = backend.confidence,
        boost,
        boosted,
        "intent confidence boosted"
    );

    BoostResult {
        boosted_confidence: boosted,
        should_clarify: boosted < CLARIFY_THRESHOLD && !signals.is_undecided,
        suggested_intent: None,
        frontend_signals: signals,
        detected_language: language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_contract::Language;
    use serde_json::Value;

    fn backend(intent: &str, confidence: u8) -> IntentClassification {
        IntentClassification {
            primary_intent: intent.to_string(),
            confidence,
            entities: Value::Null,
            widget_to_show: None,
        }
    }

    #[test]
    fn no_backend_classification_requests_clarification() {
        let result = boost_confidence(None, "we want to go somewhere warm", None);
        assert_eq!(result.boosted_confidence, 0);
        assert!(result.should_clarify);
        assert!(result.suggested_intent.is_none());
    }

    #[test]
    fn aligned_signal_raises_confidence() {
        let b = backend("provide_dates", 55);
        let result = boost_confidence(Some(&b), "we'd leave in september", None);
        assert_eq!(result.boosted_confidence, 70);
        assert!(!result.should_clarify);
    }

    #[test]
    fn topic_alignment_stacks_with_signal_alignment() {
        let b = backend("provide_dates", 55);
        let result = boost_confidence(
            Some(&b),
            "we'd leave in september",
            Some("When would you like to travel?"),
        );
        assert_eq!(result.boosted_confidence, 80);
    }

    #[test]
    fn undecided_user_with_shaky_backend_delegates_instead_of_clarifying() {
        let b = backend("destination_inquiry", 35);
        let result = boost_confidence(Some(&b), "no idea, you choose!", None);
        assert_eq!(result.boosted_confidence, 50);
        assert!(!result.should_clarify);
        assert_eq!(result.suggested_intent.as_deref(), Some("delegate_choice"));
    }

    #[test]
    fn undecided_short_circuit_keeps_higher_backend_confidence() {
        let b = backend("destination_inquiry", 58);
        let result = boost_confidence(Some(&b), "je ne sais pas, choisis pour moi", None);
        assert_eq!(result.boosted_confidence, 58);
        assert_eq!(result.detected_language, Language::Fr);
    }

    #[test]
    fn confident_backend_ignores_undecided_short_circuit() {
        let b = backend("provide_dates", 75);
        let result = boost_confidence(Some(&b), "maybe around when the dates are cheap", None);
        assert!(result.suggested_intent.is_none());
        assert!(result.boosted_confidence >= 75);
    }

    #[test]
    fn negative_sentiment_penalizes_confirm_intent() {
        let b = backend("confirm_booking", 50);
        let neutral = boost_confidence(Some(&b), "hmm let me think about it", None);
        let negative = boost_confidence(Some(&b), "nope, I hate that one", None);
        let positive = boost_confidence(Some(&b), "perfect, let's book it", None);
        assert!(negative.boosted_confidence < neutral.boosted_confidence);
        assert!(neutral.boosted_confidence <= positive.boosted_confidence);
    }

    #[test]
    fn reject_intent_rewards_negative_sentiment() {
        let b = backend("reject_suggestion", 45);
        let result = boost_confidence(Some(&b), "no, not really my thing", None);
        assert_eq!(result.boosted_confidence, 55);
        assert!(!result.should_clarify);
    }

    #[test]
    fn boosted_confidence_stays_within_bounds() {
        let high = backend("confirm_booking", 98);
        let up = boost_confidence(Some(&high), "yes! book it, that price works", None);
        assert!(up.boosted_confidence <= 100);

        let low = backend("reject_suggestion", 5);
        let down = boost_confidence(Some(&low), "perfect, I love it", None);
        assert!(down.boosted_confidence <= 100);
        // Penalty floors at zero, never wraps.
        let floored = boost_confidence(Some(&backend("confirm_booking", 10)), "no, I hate it", None);
        assert_eq!(floored.boosted_confidence, 0);
    }

    #[test]
    fn low_boosted_confidence_requests_clarification() {
        let b = backend("unknown_intent", 20);
        let result = boost_confidence(Some(&b), "the thing with the stuff", None);
        assert!(result.boosted_confidence < 40);
        assert!(result.should_clarify);
    }

    #[test]
    fn travelers_question_gives_small_flat_bump() {
        let b = backend("provide_travelers", 50);
        let result = boost_confidence(
            Some(&b),
            "two of us",
            Some("How many travelers will be going?"),
        );
        assert_eq!(result.boosted_confidence, 55);
    }
}
