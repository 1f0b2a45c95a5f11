//! Change summaries for audit entries
//!
//! Compares the top-level fields of two serialized records and renders the
//! ones that differ as `field: old -> new`.

use serde::Serialize;
use serde_json::Value;

const MAX_STRING_CHARS: usize = 40;

/// Summarize the changed top-level fields between two records
///
/// Returns `None` when nothing changed or the values don't serialize to
/// JSON objects.
pub fn describe_changes<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    diff_values(&before, &after)
}

fn diff_values(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return None;
    };

    let changes: Vec<String> = before_obj
        .iter()
        .filter_map(|(key, old)| {
            let new = after_obj.get(key).unwrap_or(&Value::Null);
            (old != new).then(|| format!("{}: {} -> {}", key, render(old), render(new)))
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
