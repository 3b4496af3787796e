//! Intent classification inputs and confidence-boost outputs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend intent classification for the latest user message.
///
/// This is external input and treated as partially unreliable; the booster
/// in `itinera-intent` reconciles it with local heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentClassification {
    pub primary_intent: String,
    /// Confidence in [0, 100].
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub entities: Value,
    /// Backend widget hint; the flow controller may overrule it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_to_show: Option<String>,
}

/// Language detected in the user's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Es,
}

/// Local keyword/regex signals extracted from the latest user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendSignals {
    pub wants_budget_info: bool,
    pub wants_date_info: bool,
    pub wants_comparison: bool,
    pub wants_more_options: bool,
    pub wants_to_book: bool,
    pub is_positive: bool,
    pub is_negative: bool,
    pub is_undecided: bool,
    pub mentioned_budget: bool,
}

/// Result of reconciling a backend classification with frontend signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostResult {
    /// Always in [0, 100].
    pub boosted_confidence: u8,
    pub should_clarify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_intent: Option<String>,
    pub frontend_signals: FrontendSignals,
    pub detected_language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classification_decodes_without_optional_fields() {
        let c: IntentClassification = serde_json::from_value(json!({
            "primaryIntent": "provide_dates",
            "confidence": 72
        }))
        .unwrap();
        assert_eq!(c.primary_intent, "provide_dates");
        assert_eq!(c.confidence, 72);
        assert!(c.widget_to_show.is_none());
    }

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Language::Fr).unwrap(), json!("fr"));
    }
}
