//! Flattening of parsed tables into dot-path leaf entries.

use toml::{Table, Value};
use toml_edit::Key;

use super::ConfigEntry;

/// Walk `table` depth first, appending one entry per leaf. Arrays are leaves;
/// tables without leaves contribute nothing.
pub(super) fn flatten_table(prefix: &str, table: &Table, out: &mut Vec<ConfigEntry>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            quote_key_segment(name)
        } else {
            format!("{}.{}", prefix, quote_key_segment(name))
        };
        match value {
            Value::Table(inner) => flatten_table(&key, inner, out),
            leaf => out.push(ConfigEntry {
                key,
                raw_value: render_value(leaf),
            }),
        }
    }
}

/// Render a value as TOML value text (strings quoted, arrays and tables inline).
pub fn render_value(value: &Value) -> String {
    value.to_string()
}

/// Render a key segment as TOML: bare when it is a bare key
/// (`A-Za-z0-9_-`, non-empty), otherwise a basic string with TOML escapes.
pub fn quote_key_segment(segment: &str) -> String {
    Key::new(segment).to_string()
}
