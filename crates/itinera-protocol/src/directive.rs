//! Inline `<action>{json}</action>` directive parsing.
//!
//! Policy: the first well-formed tag wins; every tag is stripped from the
//! rendered text whether or not its payload is usable (fail open on
//! parsing, fail closed on semantics).

use crate::geo::CityResolver;
use itinera_contract::{ActionDirective, DEFAULT_CITY_ZOOM};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const OPEN_TAG: &str = "<action>";
const CLOSE_TAG: &str = "</action>";

/// Result of scanning assistant text for a directive.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedContent {
    /// The input with every well-formed tag removed, trimmed.
    pub clean_content: String,
    /// The validated directive from the first tag, if usable.
    pub action: Option<ActionDirective>,
}

/// Raw directive payload before semantic validation. Every field is
/// optional so a sloppy payload still deserializes and fails closed in
/// validation rather than loudly in serde.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WireDirective {
    #[serde(rename_all = "camelCase")]
    Zoom { city: Option<String>, zoom: Option<u8> },
    #[serde(rename_all = "camelCase")]
    Tab { tab_id: Option<String> },
    #[serde(rename_all = "camelCase")]
    TabAndZoom {
        tab_id: Option<String>,
        city: Option<String>,
        zoom: Option<u8>,
    },
    #[serde(rename_all = "camelCase")]
    ChooseWidget {
        widget_type: Option<String>,
        option: Option<String>,
        option_data: Option<Value>,
        reason: Option<String>,
    },
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Validate a raw payload against the lookup. `None` means the directive
/// is dropped while its tag is still stripped.
fn validate(wire: WireDirective, geo: &dyn CityResolver) -> Option<ActionDirective> {
    match wire {
        WireDirective::Zoom { city, zoom } => {
            let center = geo.resolve(&non_blank(city)?)?;
            Some(ActionDirective::Zoom {
                center,
                zoom: zoom.unwrap_or(DEFAULT_CITY_ZOOM),
            })
        }
        // Unknown tab ids are accepted as opaque strings; validating them
        // is a UI concern.
        WireDirective::Tab { tab_id } => Some(ActionDirective::Tab {
            tab_id: non_blank(tab_id)?,
        }),
        // Both halves or nothing; there is no partial directive.
        WireDirective::TabAndZoom { tab_id, city, zoom } => {
            let tab_id = non_blank(tab_id)?;
            let center = geo.resolve(&non_blank(city)?)?;
            Some(ActionDirective::TabAndZoom {
                tab_id,
                center,
                zoom: zoom.unwrap_or(DEFAULT_CITY_ZOOM),
            })
        }
        WireDirective::ChooseWidget {
            widget_type,
            option,
            option_data,
            reason,
        } => Some(ActionDirective::ChooseWidget {
            widget_type: non_blank(widget_type)?,
            option: non_blank(option)?,
            option_data,
            reason,
        }),
    }
}

/// Scan `text` for action tags; strip them all, keep the first usable
/// directive. Re-parsing the returned `clean_content` always yields
/// `action: None`.
pub fn parse_directive(text: &str, geo: &dyn CityResolver) -> ParsedContent {
    let mut clean = String::with_capacity(text.len());
    let mut action: Option<ActionDirective> = None;
    let mut first_payload_seen = false;
    let mut rest = text;

    loop {
        let Some(open) = rest.find(OPEN_TAG) else {
            clean.push_str(rest);
            break;
        };
        let after_open = &rest[open + OPEN_TAG.len()..];
        let Some(close) = after_open.find(CLOSE_TAG) else {
            // Unterminated tag: not a well-formed occurrence, keep as text.
            clean.push_str(rest);
            break;
        };

        clean.push_str(&rest[..open]);
        let payload = &after_open[..close];
        if !first_payload_seen {
            first_payload_seen = true;
            match serde_json::from_str::<WireDirective>(payload) {
                Ok(wire) => action = validate(wire, geo),
                Err(err) => {
                    debug!(error = %err, "unparseable action directive payload, tag stripped");
                }
            }
        }
        rest = &after_open[close + CLOSE_TAG.len()..];
    }

    ParsedContent {
        clean_content: clean.trim().to_string(),
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::StaticGeoLookup;
    use itinera_contract::Coordinates;

    fn parse(text: &str) -> ParsedContent {
        parse_directive(text, &StaticGeoLookup)
    }

    #[test]
    fn no_tag_trims_and_returns_no_action() {
        let parsed = parse("  Voilà quelques idées !  ");
        assert_eq!(parsed.clean_content, "Voilà quelques idées !");
        assert!(parsed.action.is_none());
    }

    #[test]
    fn zoom_with_resolvable_city_strips_tag_and_resolves_center() {
        let parsed = parse(r#"On y va ! <action>{"type":"zoom","city":"Tokyo"}</action>"#);
        assert_eq!(parsed.clean_content, "On y va !");
        assert_eq!(
            parsed.action,
            Some(ActionDirective::Zoom {
                center: Coordinates::new(35.6762, 139.6503),
                zoom: DEFAULT_CITY_ZOOM,
            })
        );
    }

    #[test]
    fn zoom_with_unknown_city_drops_action_but_still_strips() {
        let parsed = parse(r#"Hm. <action>{"type":"zoom","city":"Atlantis"}</action> Voilà."#);
        assert!(parsed.action.is_none());
        assert_eq!(parsed.clean_content, "Hm.  Voilà.");
    }

    #[test]
    fn malformed_json_never_errors_and_tag_is_stripped() {
        let parsed = parse("before <action>{oops</action> after");
        assert!(parsed.action.is_none());
        assert_eq!(parsed.clean_content, "before  after");
    }

    #[test]
    fn first_tag_wins() {
        let two = parse(concat!(
            r#"<action>{"type":"tab","tabId":"map"}</action>x"#,
            r#"<action>{"type":"tab","tabId":"list"}</action>"#
        ));
        let one = parse(r#"<action>{"type":"tab","tabId":"map"}</action>"#);
        assert_eq!(two.action, one.action);
        assert_eq!(two.clean_content, "x");
    }

    #[test]
    fn reparsing_clean_content_is_idempotent() {
        for text in [
            r#"a <action>{"type":"zoom","city":"Paris"}</action> b"#,
            r#"<action>{"type":"tab","tabId":"map"}</action><action>bad</action>"#,
            "plain text",
        ] {
            let first = parse(text);
            let second = parse(&first.clean_content);
            assert!(second.action.is_none(), "re-parse of {text:?} had action");
            assert_eq!(second.clean_content, first.clean_content);
        }
    }

    #[test]
    fn unknown_tab_id_passes_through_as_opaque_string() {
        let parsed = parse(r#"<action>{"type":"tab","tabId":"some-future-tab"}</action>"#);
        assert_eq!(
            parsed.action,
            Some(ActionDirective::Tab {
                tab_id: "some-future-tab".into()
            })
        );
    }

    #[test]
    fn tab_and_zoom_is_all_or_nothing() {
        let no_city =
            parse(r#"<action>{"type":"tabAndZoom","tabId":"map","city":"Atlantis"}</action>"#);
        assert!(no_city.action.is_none());

        let no_tab = parse(r#"<action>{"type":"tabAndZoom","city":"Paris"}</action>"#);
        assert!(no_tab.action.is_none());

        let both = parse(r#"<action>{"type":"tabAndZoom","tabId":"map","city":"Paris"}</action>"#);
        assert!(matches!(
            both.action,
            Some(ActionDirective::TabAndZoom { .. })
        ));
    }

    #[test]
    fn choose_widget_requires_type_and_option() {
        let missing = parse(r#"<action>{"type":"chooseWidget","widgetType":"datePicker"}</action>"#);
        assert!(missing.action.is_none());

        let full = parse(concat!(
            r#"<action>{"type":"chooseWidget","widgetType":"datePicker","#,
            r#""option":"2026-09-01","reason":"cheapest week"}</action>"#
        ));
        match full.action {
            Some(ActionDirective::ChooseWidget { option, reason, .. }) => {
                assert_eq!(option, "2026-09-01");
                assert_eq!(reason.as_deref(), Some("cheapest week"));
            }
            other => panic!("expected chooseWidget, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_tag_is_left_as_text() {
        let parsed = parse("look <action>{\"type\":\"tab\"");
        assert!(parsed.action.is_none());
        assert_eq!(parsed.clean_content, "look <action>{\"type\":\"tab\"");
    }

    #[test]
    fn explicit_zoom_level_is_respected() {
        let parsed = parse(r#"<action>{"type":"zoom","city":"Rome","zoom":8}</action>"#);
        assert!(matches!(
            parsed.action,
            Some(ActionDirective::Zoom { zoom: 8, .. })
        ));
    }
}
