//! Bounded text helpers.
//!
//! Everything here is pure and total: no function in this module fails or
//! panics, whatever the input.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use narrator_contracts::error::NarratorResult;

/// Returned by `render_bounded` when a value cannot be serialized.
pub const UNSERIALIZABLE: &str = "(unserializable)";

/// Cut `value` to at most `max_chars` characters.
///
/// Values within the limit are returned untouched. Longer values keep their
/// first `max_chars` characters, followed by a newline and a marker stating
/// how many characters were dropped. Lengths are counted in `char`s so the
/// cut never splits a code point.
pub fn truncate(value: &str, max_chars: usize) -> Cow<'_, str> {
    let total = value.chars().count();
    if total <= max_chars {
        return Cow::Borrowed(value);
    }

    let cut = value
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len());

    Cow::Owned(format!(
        "{}\n{}",
        &value[..cut],
        omission_marker(total - max_chars)
    ))
}

/// The trailer appended by `truncate`.
pub fn omission_marker(omitted: usize) -> String {
    format!("…(truncated, {omitted} chars omitted)")
}

/// `truncate` lifted to JSON: strings are bounded, every other value passes
/// through unchanged.
pub fn truncate_value(value: serde_json::Value, max_chars: usize) -> serde_json::Value {
    match value {
        serde_json::Value::String(s) => {
            serde_json::Value::String(truncate(&s, max_chars).into_owned())
        }
        other => other,
    }
}

/// Pretty-print `value` as JSON and bound the result to `max_chars`.
///
/// Serialization failures (a map with non-string keys, a `Serialize` impl
/// that errors) produce `UNSERIALIZABLE` instead of an error.
pub fn render_bounded<T: Serialize + ?Sized>(value: &T, max_chars: usize) -> String {
    match render_pretty(value) {
        Ok(rendered) => truncate(&rendered, max_chars).into_owned(),
        Err(e) => {
            debug!(error = %e, "payload not serializable, using sentinel");
            UNSERIALIZABLE.to_string()
        }
    }
}

/// Pretty-print `value` as JSON, unbounded.
pub fn render_pretty<T: Serialize + ?Sized>(value: &T) -> NarratorResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
