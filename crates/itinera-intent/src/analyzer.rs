//! Keyword/regex classification of user and assistant utterances.
//!
//! The keyword tables cover English, French and Spanish; anything else
//! falls back to English with no signals, which the booster treats as
//! "nothing to add".

use itinera_contract::{FrontendSignals, Language};
use regex::Regex;
use std::sync::LazyLock;

macro_rules! signal_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new($pattern).expect(concat!("static pattern ", stringify!($name)))
        });
    };
}

signal_regex!(
    BUDGET_INFO,
    r"(?i)\b(budget|cost|price|how much|cheap|expensive|combien|co[uû]te|prix|pas cher|cu[aá]nto|precio|barato)\b"
);
signal_regex!(
    DATE_INFO,
    r"(?i)\b(when|dates?|depart|leave|leaving|quand|partir|d[eé]part|cu[aá]ndo|fechas?|salir)\b"
);
signal_regex!(
    COMPARISON,
    r"(?i)\b(compare|versus|vs|difference|better than|comparer|diff[eé]rence|mieux que|comparar|mejor que|diferencia)\b"
);
signal_regex!(
    MORE_OPTIONS,
    r"(?i)\b(more options|other options|alternatives?|something else|anything else|d'autres|autre chose|autres options|m[aá]s opciones|otras opciones|otra cosa)\b"
);
signal_regex!(
    BOOKING,
    r"(?i)\b(book|booking|reserve|buy|purchase|r[eé]server|r[eé]servation|acheter|reservar|comprar)\b"
);
signal_regex!(
    POSITIVE,
    r"(?i)\b(yes|yeah|yep|great|perfect|awesome|sounds good|love it|oui|parfait|super|g[eé]nial|d'accord|j'adore|s[ií]|perfecto|genial|me encanta)\b"
);
signal_regex!(
    NEGATIVE,
    r"(?i)\b(no|nope|not really|don't|dislike|hate|non|pas vraiment|jamais|je n'aime pas|no me gusta|nunca)\b"
);
signal_regex!(
    UNDECIDED,
    r"(?i)\b(not sure|maybe|whatever|no idea|you (choose|pick|decide)|choose for me|surprise me|je ne sais pas|aucune id[eé]e|peu importe|choisis pour moi|comme tu veux|surprends-moi|no s[eé]|no estoy segur[oa]|elige por m[ií]|sorpr[eé]ndeme)\b"
);
signal_regex!(
    BUDGET_MENTION,
    r"(?i)[€$£]\s?\d+|\d+\s?[€$£]|\b\d+\s?(euros?|dollars?|pounds?|bucks)\b"
);

signal_regex!(
    FRENCH_MARKERS,
    r"(?i)\b(je|tu|est|veux|voudrais|quand|o[uù]|tr[eè]s|oui|merci|pour|avec|partir|voyage)\b|[àâçèêëîôœù]"
);
signal_regex!(
    SPANISH_MARKERS,
    r"(?i)\b(quiero|quisiera|cu[aá]ndo|d[oó]nde|muy|gracias|para|con|viaje|salir|somos)\b|[¿¡ñ]|\bs[ií]\b"
);

signal_regex!(
    TOPIC_TRAVELERS,
    r"(?i)\b(how many (people|travelers|of you)|travel(l)?ers|adults|children|combien (de personnes|serez-vous|de voyageurs)|voyageurs|cu[aá]nt[oa]s (personas|viajeros)|qui[eé]nes viajan)\b"
);
signal_regex!(
    TOPIC_DATES,
    r"(?i)\b(when|what dates?|which dates?|quand|quelles? dates?|cu[aá]ndo|qu[eé] fechas?)\b"
);
signal_regex!(
    TOPIC_BUDGET,
    r"(?i)\b(budget|price range|how much|combien|quel budget|presupuesto|cu[aá]nto)\b"
);

/// Topic of the assistant's last question, matched against user signals
/// by the booster's topical-alignment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTopic {
    DatesQuestion,
    BudgetQuestion,
    TravelersQuestion,
    Other,
}

/// Extract keyword signals from one user utterance.
pub fn analyze_message(text: &str) -> FrontendSignals {
    FrontendSignals {
        wants_budget_info: BUDGET_INFO.is_match(text),
        wants_date_info: DATE_INFO.is_match(text),
        wants_comparison: COMPARISON.is_match(text),
        wants_more_options: MORE_OPTIONS.is_match(text),
        wants_to_book: BOOKING.is_match(text),
        is_positive: POSITIVE.is_match(text),
        is_negative: NEGATIVE.is_match(text),
        is_undecided: UNDECIDED.is_match(text),
        mentioned_budget: BUDGET_MENTION.is_match(text),
    }
}

/// Best-effort language guess; ties and silence default to English.
pub fn detect_language(text: &str) -> Language {
    let fr = FRENCH_MARKERS.find_iter(text).count();
    let es = SPANISH_MARKERS.find_iter(text).count();
    if fr == 0 && es == 0 {
        Language::En
    } else if fr >= es {
        Language::Fr
    } else {
        Language::Es
    }
}

/// Classify what the assistant's last message was asking about.
///
/// Travelers is checked first: "combien de personnes" must not be read as
/// a budget question just because it contains "combien".
pub fn classify_assistant_topic(text: &str) -> AssistantTopic {
    if TOPIC_TRAVELERS.is_match(text) {
        AssistantTopic::TravelersQuestion
    } else if TOPIC_DATES.is_match(text) {
        AssistantTopic::DatesQuestion
    } else if TOPIC_BUDGET.is_match(text) {
        AssistantTopic::BudgetQuestion
    } else {
        AssistantTopic::Other
    }
}
