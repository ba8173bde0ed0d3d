//! Leaf value coercion.
//!
//! Decides the type of a `key: value` leaf. Rules are tried in a fixed order
//! and the first match wins:
//!
//! 1. Empty value: the leaf is dropped
//! 2. Key ends with `Label`: text, unmodified
//! 3. Forced integer / floating-point field: parsed, or dropped on failure
//! 4. `TRUE` / `FALSE`: boolean
//! 5. Forced string field: text
//! 6. `NULL` (any case): null
//! 7. Key ends with `Time`: `YYYY-MM-DD HH:MM:SS.mmm` timestamp, or text on failure
//! 8. Integer, then floating point, then text
//!
//! Coercion is pure: it never fails and depends only on the key, the value,
//! and the registry.

use chrono::NaiveDateTime;

use crate::error::{LeafNotice, NumericKind};
use crate::models::{FieldRegistry, Value};
use crate::parsers::lines::LEAF_SEPARATOR;

const LABEL_SUFFIX: &str = "Label";
const TIME_SUFFIX: &str = "Time";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
/// `YYYY-MM-DD HH:MM:SS.mmm`
const TIME_PATTERN: &[u8; 23] = b"0000-00-00 00:00:00.000";

/// Outcome of coercing one leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(Value),
    /// Typed parse failed; the raw text is kept
    Fallback(Value, LeafNotice),
    Dropped(LeafNotice),
}

/// Split a leaf line into trimmed key and value.
///
/// The separator is the first colon. One space following it is skipped
/// before the value is trimmed. Returns `None` if the line has no separator.
pub fn split_leaf(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.trim().split_once(LEAF_SEPARATOR)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    Some((key.trim(), rest.trim()))
}

/// Coerce a leaf line (`key: value`) into a key and typed value.
/// Returns `None` if the line carries no separator.
pub fn coerce_line<'a>(line: &'a str, registry: &FieldRegistry) -> Option<(&'a str, Coerced)> {
    let (key, value) = split_leaf(line)?;
    Some((key, coerce(key, value, registry)))
}

pub fn coerce(key: &str, value: &str, registry: &FieldRegistry) -> Coerced {
    if value.is_empty() {
        return Coerced::Dropped(LeafNotice::EmptyValue { key: key.to_string() });
    }

    if key.ends_with(LABEL_SUFFIX) {
        return Coerced::Value(Value::String(value.to_string()));
    }

    if registry.is_int_field(key) {
        return match parse_int(value) {
            Some(n) => Coerced::Value(Value::Int(n)),
            None => Coerced::Dropped(invalid_number(key, value, NumericKind::Int)),
        };
    }

    if registry.is_float_field(key) {
        return match parse_float(value) {
            Some(n) => Coerced::Value(Value::Float(n)),
            None => Coerced::Dropped(invalid_number(key, value, NumericKind::Float)),
        };
    }

    match value {
        "TRUE" => return Coerced::Value(Value::Bool(true)),
        "FALSE" => return Coerced::Value(Value::Bool(false)),
        _ => {}
    }

    if registry.is_string_field(key) {
        return Coerced::Value(Value::String(value.to_string()));
    }

    if value.eq_ignore_ascii_case("NULL") {
        return Coerced::Value(Value::Null);
    }

    if key.ends_with(TIME_SUFFIX) {
        return match parse_timestamp(value) {
            Some(dt) => Coerced::Value(Value::DateTime(dt)),
            None => Coerced::Fallback(
                Value::String(value.to_string()),
                LeafNotice::InvalidTimestamp { key: key.to_string(), value: value.to_string() },
            ),
        };
    }

    if let Some(n) = parse_int(value) {
        Coerced::Value(Value::Int(n))
    } else if let Some(n) = parse_float(value) {
        Coerced::Value(Value::Float(n))
    } else {
        Coerced::Value(Value::String(value.to_string()))
    }
}

// chrono treats the fraction as optional and accepts unpadded fields, so the
// shape is checked first.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let bytes = value.as_bytes();
    if bytes.len() != TIME_PATTERN.len() {
        return None;
    }
    let shaped = bytes.iter().zip(TIME_PATTERN).all(|(&b, &p)| match p {
        b'0' => b.is_ascii_digit(),
        _ => b == p,
    });
    if !shaped {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIME_FORMAT).ok()
}

fn parse_int(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

// Rust accepts "inf" and "NaN"; those are not numbers in this format.
fn parse_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn invalid_number(key: &str, value: &str, kind: NumericKind) -> LeafNotice {
    LeafNotice::InvalidNumber { key: key.to_string(), value: value.to_string(), kind }
}
