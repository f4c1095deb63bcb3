//! Turning a free-form vision model response into an [`Analysis`].
//!
//! The response is untrusted: it may be absent, wrapped into Markdown code
//! fences, surrounded by prose, or contain values of unexpected types. Every
//! field is coerced separately and substituted with a default when it can't
//! be, so ingestion never fails.

use std::{str::FromStr as _, sync::LazyLock};

use common::Feet;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing as log;

use super::{Analysis, Condition, RoomEstimate};

/// Default [`RoomEstimate::room_type`].
pub const DEFAULT_ROOM_TYPE: &str = "Room";

/// Default [`RoomEstimate::length`] in feet.
pub const DEFAULT_LENGTH: i64 = 15;

/// Default [`RoomEstimate::width`] in feet.
pub const DEFAULT_WIDTH: i64 = 12;

/// Default [`RoomEstimate::current_floor_type`].
pub const DEFAULT_FLOOR_TYPE: &str = "Unknown";

/// Default [`RoomEstimate::condition`].
pub const DEFAULT_CONDITION: Condition = Condition::Fair;

/// Default [`RoomEstimate::notes`].
pub const DEFAULT_NOTES: &str = "AI analysis complete.";

/// Ingests the raw text returned by a vision model into an [`Analysis`].
///
/// Absent, blank or unparsable text results in [`Analysis::fallback()`].
#[must_use]
pub fn ingest(raw: Option<&str>) -> Analysis {
    let Some(text) = raw.filter(|t| !t.trim().is_empty()) else {
        log::debug!("no vision response to ingest, falling back");
        return Analysis::fallback();
    };

    match Extracted::from_text(text) {
        Extracted::Parsed(raw) => Analysis {
            estimate: raw.coerce(),
            is_fallback: false,
        },
        Extracted::Unparsable => {
            log::warn!("unparsable vision response, falling back: {text}");
            Analysis::fallback()
        }
    }
}

/// Result of extracting a JSON object out of a free-form text.
#[derive(Clone, Debug, PartialEq)]
pub enum Extracted {
    /// JSON object was found and parsed.
    Parsed(Raw),

    /// Text contains no parsable JSON object.
    Unparsable,
}

impl Extracted {
    /// Extracts the JSON object out of the provided `text`.
    ///
    /// The contents of the first Markdown code fence are preferred when
    /// present. Then the span from the first `{` to the last `}` is parsed.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        /// Regular expression capturing the contents of a Markdown code fence.
        static FENCE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex")
        });
        /// Regular expression matching the widest `{...}` span.
        static OBJECT: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?s)\{.*\}").expect("valid regex")
        });

        let text = FENCE
            .captures(text)
            .and_then(|c| c.get(1))
            .map_or(text, |m| m.as_str().trim());

        let Some(span) = OBJECT.find(text) else {
            return Self::Unparsable;
        };
        match serde_json::from_str::<Value>(span.as_str()) {
            Ok(obj @ Value::Object(_)) => serde_json::from_value(obj)
                .map_or(Self::Unparsable, Self::Parsed),
            Ok(_) | Err(_) => Self::Unparsable,
        }
    }
}

/// Partial record of a vision model response.
///
/// Every field is kept as an arbitrary JSON [`Value`] until it's coerced.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Raw {
    /// Reported type of the room.
    pub room_type: Option<Value>,

    /// Reported length of the room in feet.
    pub estimated_length: Option<Value>,

    /// Reported width of the room in feet.
    pub estimated_width: Option<Value>,

    /// Reported type of the current floor.
    pub current_floor_type: Option<Value>,

    /// Reported condition of the current floor.
    pub condition: Option<Value>,

    /// Reported observations.
    pub notes: Option<Value>,
}

impl Raw {
    /// Coerces this [`Raw`] record into a [`RoomEstimate`], substituting
    /// defaults for the missing or invalid fields.
    ///
    /// A reported area is never used: it's always derived from the
    /// dimensions.
    #[must_use]
    pub fn coerce(&self) -> RoomEstimate {
        RoomEstimate::new(
            text(self.room_type.as_ref()).unwrap_or(DEFAULT_ROOM_TYPE),
            dimension(self.estimated_length.as_ref())
                .unwrap_or_else(|| default_feet(DEFAULT_LENGTH)),
            dimension(self.estimated_width.as_ref())
                .unwrap_or_else(|| default_feet(DEFAULT_WIDTH)),
            text(self.current_floor_type.as_ref())
                .unwrap_or(DEFAULT_FLOOR_TYPE),
            condition(self.condition.as_ref()).unwrap_or(DEFAULT_CONDITION),
            text(self.notes.as_ref()).unwrap_or(DEFAULT_NOTES),
        )
    }
}

/// Coerces a JSON [`Value`] into a non-blank trimmed string.
fn text(val: Option<&Value>) -> Option<&str> {
    val?.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Coerces a JSON [`Value`] into a positive dimension.
///
/// Accepts JSON numbers and numeric strings (scientific notation included).
/// Booleans, `null`s, non-finite, zero, negative or above [`Feet::MAX`]
/// values are rejected.
fn dimension(val: Option<&Value>) -> Option<Feet> {
    let s = match val? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return None;
        }
    };
    if s.is_empty() {
        return None;
    }

    Decimal::from_str(&s)
        .or_else(|_| Decimal::from_scientific(&s))
        .ok()
        .and_then(Feet::new)
        .or_else(|| s.parse::<f64>().ok().and_then(Feet::from_f64))
}

/// Coerces a JSON [`Value`] into a [`Condition`], accepting only the exact
/// `good`, `fair` and `poor` strings.
fn condition(val: Option<&Value>) -> Option<Condition> {
    val?.as_str()?.parse().ok()
}

/// Creates a default positive dimension.
fn default_feet(val: i64) -> Feet {
    #[expect(unsafe_code, reason = "positive constants")]
    let feet = unsafe { Feet::new_unchecked(Decimal::from(val)) };
    feet
}

#[cfg(test)]
mod spec {
    use common::{Feet, SquareFeet};
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::domain::estimate::{Analysis, Condition};

    use super::{ingest, Extracted, Raw};

    fn feet(v: &str) -> Feet {
        v.parse().unwrap()
    }

    fn sqft(v: i64) -> SquareFeet {
        SquareFeet::new(Decimal::from(v)).unwrap()
    }

    #[test]
    fn falls_back_on_absent_input() {
        assert_eq!(ingest(None), Analysis::fallback());
        assert_eq!(ingest(Some("")), Analysis::fallback());
        assert_eq!(ingest(Some("   \n")), Analysis::fallback());
    }

    #[test]
    fn falls_back_on_non_json() {
        assert_eq!(ingest(Some("I'm sorry, I can't help.")), Analysis::fallback());
        assert_eq!(ingest(Some("{not json}")), Analysis::fallback());
        assert_eq!(ingest(Some("```json\n[1, 2]\n```")), Analysis::fallback());
    }

    #[test]
    fn coerces_numeric_strings() {
        let a = ingest(Some(
            r#"{"roomType":"Kitchen","estimatedLength":"12","estimatedWidth":10,"condition":"excellent"}"#,
        ));

        assert!(!a.is_fallback);
        assert_eq!(a.estimate.room_type, "Kitchen");
        assert_eq!(a.estimate.length(), feet("12"));
        assert_eq!(a.estimate.width(), feet("10"));
        assert_eq!(a.estimate.area(), sqft(120));
        assert_eq!(a.estimate.current_floor_type, "Unknown");
        assert_eq!(a.estimate.condition, Condition::Fair);
        assert_eq!(a.estimate.notes, "AI analysis complete.");
    }

    #[test]
    fn defaults_invalid_dimensions() {
        for invalid in [
            json!(0),
            json!(-5),
            json!("abc"),
            json!(""),
            json!(true),
            json!(null),
            json!([12]),
        ] {
            let raw = Raw {
                estimated_length: Some(invalid.clone()),
                estimated_width: Some(invalid.clone()),
                ..Raw::default()
            };
            let estimate = raw.coerce();
            assert_eq!(estimate.length(), feet("15"), "{invalid}");
            assert_eq!(estimate.width(), feet("12"), "{invalid}");
            assert_eq!(estimate.area(), sqft(180), "{invalid}");
        }
    }

    #[test]
    fn coerces_mixed_dimension_types() {
        let a = ingest(Some(
            r#"{"roomType":"Kitchen","estimatedLength":10,"estimatedWidth":"8"}"#,
        ));

        assert!(!a.is_fallback);
        assert_eq!(a.estimate.room_type, "Kitchen");
        assert_eq!(a.estimate.length(), feet("10"));
        assert_eq!(a.estimate.width(), feet("8"));
        assert_eq!(a.estimate.area(), sqft(80));
    }

    #[test]
    fn unknown_condition_is_fair() {
        let a = ingest(Some(r#"{"condition":"excellent"}"#));

        assert!(!a.is_fallback);
        assert_eq!(a.estimate.condition, Condition::Fair);
        assert_eq!(a.estimate.length(), feet("15"));
        assert_eq!(a.estimate.width(), feet("12"));
        assert_eq!(a.estimate.area(), sqft(180));
    }

    #[test]
    fn defaults_oversized_dimensions() {
        let a = ingest(Some(
            r#"{"estimatedLength":1e20,"estimatedWidth":1e20}"#,
        ));
        assert!(!a.is_fallback);
        assert_eq!(a.estimate.length(), feet("15"));
        assert_eq!(a.estimate.width(), feet("12"));
        assert_eq!(a.estimate.area(), sqft(180));

        let a = ingest(Some(
            r#"{"estimatedLength":"79228162514264337593543950335","estimatedWidth":10001}"#,
        ));
        assert_eq!(a.estimate.area(), sqft(180));

        let a = ingest(Some(
            r#"{"estimatedLength":10000,"estimatedWidth":10000}"#,
        ));
        assert_eq!(a.estimate.area(), SquareFeet::MAX);
    }

    #[test]
    fn accepts_fractional_and_scientific_dimensions() {
        let raw = Raw {
            estimated_length: Some(json!(12.5)),
            estimated_width: Some(json!("1.2e1")),
            ..Raw::default()
        };
        let estimate = raw.coerce();
        assert_eq!(estimate.length(), feet("12.5"));
        assert_eq!(estimate.width(), feet("12"));
        assert_eq!(estimate.area(), sqft(150));
    }

    #[test]
    fn ignores_reported_area() {
        let a = ingest(Some(
            r#"{"estimatedLength":10,"estimatedWidth":10,"estimatedSqFt":5000}"#,
        ));
        assert_eq!(a.estimate.area(), sqft(100));
    }

    #[test]
    fn strips_code_fences_and_prose() {
        let expected = ingest(Some(
            r#"{"roomType":"Bedroom","estimatedLength":14,"estimatedWidth":12,"currentFloorType":"Hardwood","condition":"good","notes":"Bright room."}"#,
        ));
        assert!(!expected.is_fallback);

        for wrapped in [
            "```json\n{\"roomType\":\"Bedroom\",\"estimatedLength\":14,\"estimatedWidth\":12,\"currentFloorType\":\"Hardwood\",\"condition\":\"good\",\"notes\":\"Bright room.\"}\n```",
            "```\n{\"roomType\":\"Bedroom\",\"estimatedLength\":14,\"estimatedWidth\":12,\"currentFloorType\":\"Hardwood\",\"condition\":\"good\",\"notes\":\"Bright room.\"}```",
            "Here you go: {\"roomType\":\"Bedroom\",\"estimatedLength\":14,\"estimatedWidth\":12,\"currentFloorType\":\"Hardwood\",\"condition\":\"good\",\"notes\":\"Bright room.\"} Enjoy!",
        ] {
            assert_eq!(ingest(Some(wrapped)), expected, "{wrapped}");
        }
    }

    #[test]
    fn defaults_blank_and_non_string_texts() {
        let a = ingest(Some(
            r#"{"roomType":"  ","currentFloorType":42,"notes":null,"condition":"poor"}"#,
        ));
        assert!(!a.is_fallback);
        assert_eq!(a.estimate.room_type, "Room");
        assert_eq!(a.estimate.current_floor_type, "Unknown");
        assert_eq!(a.estimate.notes, "AI analysis complete.");
        assert_eq!(a.estimate.condition, Condition::Poor);
    }

    #[test]
    fn empty_object_is_not_a_fallback() {
        let a = ingest(Some("{}"));
        assert!(!a.is_fallback);
        assert_eq!(a.estimate.room_type, "Room");
        assert_eq!(a.estimate.area(), sqft(180));
    }

    #[test]
    fn is_idempotent() {
        let input = Some(r#"{"roomType":"Office","estimatedLength":"9.5","estimatedWidth":11}"#);
        assert_eq!(ingest(input), ingest(input));
        assert_eq!(ingest(None), ingest(None));
    }

    #[test]
    fn extraction_is_tagged() {
        assert_eq!(Extracted::from_text("nothing here"), Extracted::Unparsable);
        assert!(matches!(
            Extracted::from_text(r#"{"notes":"ok"}"#),
            Extracted::Parsed(_),
        ));
    }
}
