//! Frontend intent heuristics.
//!
//! Two layers: [`analyzer`] extracts keyword/regex signals and a language
//! guess from raw utterances; [`booster`] reconciles those signals with the
//! backend's probabilistic intent label to decide whether clarification is
//! needed. Neither layer ever fails — absent signals simply degrade to low
//! confidence plus a clarification request.

pub mod analyzer;
pub mod booster;

pub use analyzer::{analyze_message, classify_assistant_topic, detect_language, AssistantTopic};
pub use booster::boost_confidence;
