//! Path lookup and scalar coercion over the transport's decoded response tree.
//!
//! The tree comes from an XML-to-mapping conversion, so it is loose in three
//! ways that every accessor has to absorb:
//!
//! - **Collapsed lists.** An element that may repeat arrives as a bare mapping
//!   when only one instance is present and as a sequence otherwise, unless the
//!   transport was told about it through `known_arrays`. [`as_sequence`] is the
//!   second line of defence for fields the transport was not told about.
//! - **Optional fields.** Absence is normal. Lookups return `None` and callers
//!   pick a documented default; nothing in here fails on missing data.
//! - **Inconsistent typing.** Integers may be numbers or numeric strings,
//!   booleans may be `"true"`, SKUs may have been cast to numbers, prices may be
//!   `{value, currency_id}` mappings or bare scalars.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use trading_pack_core::Money;

/// Descends `path` through nested mappings.
///
/// Returns `None` if any key is missing, an intermediate value is not a
/// mapping, or the terminal value is `null`.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Like [`lookup`] but falls back to `default` when the path is absent.
#[must_use]
pub fn lookup_or<'a>(value: &'a Value, path: &[&str], default: &'a Value) -> &'a Value {
    lookup(value, path).unwrap_or(default)
}

/// Depth-first search for the first non-null value stored under `key`
/// anywhere in the tree.
///
/// A mapping's own entry is preferred over entries nested below it.
#[must_use]
pub fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key).filter(|v| !v.is_null()) {
                return Some(found);
            }
            map.values().find_map(|child| find_key(child, key))
        }
        Value::Array(items) => items.iter().find_map(|child| find_key(child, key)),
        _ => None,
    }
}

/// Presents a "one or many" value as a sequence.
///
/// `None` and `null` give an empty sequence, a sequence is passed through
/// element by element, and anything else becomes a one-element sequence.
#[must_use]
pub fn as_sequence(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// [`as_sequence`] applied to the value at `path`.
#[must_use]
pub fn sequence_at<'a>(value: &'a Value, path: &[&str]) -> Vec<&'a Value> {
    as_sequence(lookup(value, path))
}

/// Integer from a number or a numeric string. Fractional numbers truncate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Boolean from `true`/`false` or their string forms (case-insensitive).
#[must_use]
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}

/// String form of a scalar. Numbers and booleans are stringified because the
/// transport may have type-cast fields such as SKUs.
#[must_use]
pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// UTC instant from an RFC 3339 timestamp such as `2015-06-01T12:00:00.000Z`.
#[must_use]
pub fn to_time(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?;
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "skipping unparseable timestamp");
            None
        }
    }
}

/// Amount from a `{value, currency_id}` mapping or a bare numeric scalar.
#[must_use]
pub fn to_money(value: &Value) -> Option<Money> {
    match value {
        Value::Object(map) => {
            let amount = map
                .get("value")
                .or_else(|| map.get("amount"))
                .and_then(to_decimal)?;
            let currency = map
                .get("currency_id")
                .or_else(|| map.get("currency"))
                .and_then(Value::as_str);
            Some(Money::new(amount, currency))
        }
        other => to_decimal(other).map(|amount| Money::new(amount, None)),
    }
}

/// Decimal from a number or numeric string.
#[must_use]
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

#[must_use]
pub fn i64_at(value: &Value, path: &[&str]) -> Option<i64> {
    lookup(value, path).and_then(to_i64)
}

/// Non-negative count at `path`, `0` when absent or unparseable.
#[must_use]
pub fn count_at(value: &Value, path: &[&str]) -> u32 {
    i64_at(value, path)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

#[must_use]
pub fn bool_at(value: &Value, path: &[&str]) -> Option<bool> {
    lookup(value, path).and_then(to_bool)
}

#[must_use]
pub fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path).and_then(to_string)
}

#[must_use]
pub fn time_at(value: &Value, path: &[&str]) -> Option<DateTime<Utc>> {
    lookup(value, path).and_then(to_time)
}

#[must_use]
pub fn decimal_at(value: &Value, path: &[&str]) -> Option<Decimal> {
    lookup(value, path).and_then(to_decimal)
}

#[must_use]
pub fn money_at(value: &Value, path: &[&str]) -> Option<Money> {
    lookup(value, path).and_then(to_money)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
