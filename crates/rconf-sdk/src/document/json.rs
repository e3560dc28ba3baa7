//! JSON documents, converted into the same table shape as TOML documents.

use serde_json::Value as Json;
use toml::{Table, Value};

use super::ParseError;

/// Parse a JSON object into a table. `null` members are dropped, as are
/// `null` array elements.
pub(super) fn parse_table(text: &str, origin: &str) -> Result<Table, ParseError> {
    let json: Json = serde_json::from_str(text).map_err(|e| {
        let origin = format!("{}: line {} column {}", origin, e.line(), e.column());
        if e.is_io() {
            let message = e.to_string();
            ParseError::with_cause(origin, message, e)
        } else {
            ParseError::new(origin, e.to_string())
        }
    })?;

    match json {
        Json::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| convert(v).map(|v| (k, v)))
            .collect()),
        other => Err(ParseError::new(
            origin,
            format!("document root must be an object, found {}", json_type(&other)),
        )),
    }
}

fn convert(value: Json) -> Option<Value> {
    match value {
        Json::Null => None,
        Json::Bool(b) => Some(Value::Boolean(b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        Json::String(s) => Some(Value::String(s)),
        Json::Array(items) => Some(Value::Array(items.into_iter().filter_map(convert).collect())),
        Json::Object(map) => Some(Value::Table(
            map.into_iter()
                .filter_map(|(k, v)| convert(v).map(|v| (k, v)))
                .collect(),
        )),
    }
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
