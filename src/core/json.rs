//! Conversion between [`Value`] graphs and JSON.
//!
//! Dates and patterns use tagged objects:
//! `{"$date": "<RFC 3339>"}` and `{"$regex": "<source>", "$flags": "<flags>"}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number};

use crate::error::{Error, Result};
use crate::value::{Pattern, Value};

const DATE_TAG: &str = "$date";
const REGEX_TAG: &str = "$regex";
const FLAGS_TAG: &str = "$flags";

/// Build a value graph from JSON. Fails on malformed tagged objects.
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(items) => {
            let values = items.iter().map(from_json).collect::<Result<Vec<_>>>()?;
            Value::list(values)
        }
        serde_json::Value::Object(object) => from_json_object(object)?,
    })
}

fn from_json_object(object: &Map<String, serde_json::Value>) -> Result<Value> {
    if let Some(tagged) = object.get(DATE_TAG) {
        if object.len() == 1 {
            return parse_date(tagged);
        }
    }

    if let Some(source) = object.get(REGEX_TAG) {
        let only_pattern_keys = object.keys().all(|k| k == REGEX_TAG || k == FLAGS_TAG);
        if only_pattern_keys {
            return parse_pattern(source, object.get(FLAGS_TAG));
        }
    }

    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        entries.push((key.clone(), from_json(value)?));
    }
    Ok(Value::record(entries))
}

fn parse_date(tagged: &serde_json::Value) -> Result<Value> {
    let text = tagged.as_str().ok_or_else(|| {
        Error::validation_invalid_argument(DATE_TAG, "Expected an RFC 3339 string", None, None)
    })?;

    let instant = DateTime::parse_from_rfc3339(text).map_err(|e| {
        Error::validation_invalid_argument(
            DATE_TAG,
            format!("Invalid RFC 3339 date: {}", e),
            Some(text.to_string()),
            None,
        )
    })?;

    Ok(Value::date(instant.with_timezone(&Utc)))
}

fn parse_pattern(
    source: &serde_json::Value,
    flags: Option<&serde_json::Value>,
) -> Result<Value> {
    let source = source.as_str().ok_or_else(|| {
        Error::validation_invalid_argument(REGEX_TAG, "Expected a string source", None, None)
    })?;

    let flags = match flags {
        None | Some(serde_json::Value::Null) => "",
        Some(serde_json::Value::String(f)) => f.as_str(),
        Some(_) => {
            return Err(Error::validation_invalid_argument(
                FLAGS_TAG,
                "Expected a string of flags",
                None,
                None,
            ))
        }
    };

    Ok(Value::Pattern(Pattern::new(source, flags)?))
}

/// Render a value graph as JSON.
///
/// Callables become `null`. Host objects render their visible fields.
/// Non-finite numbers become `null`. Does not terminate on cyclic graphs.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Callable(_) => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::List(list) => {
            serde_json::Value::Array(list.items().iter().map(to_json).collect())
        }
        Value::Record(record) => {
            let mut object = Map::new();
            for (key, value) in record.enumerable_entries() {
                object.insert(key, to_json(&value));
            }
            serde_json::Value::Object(object)
        }
        Value::Date(date) => serde_json::json!({
            DATE_TAG: date.instant().to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }),
        Value::Pattern(pattern) => serde_json::json!({
            REGEX_TAG: pattern.source(),
            FLAGS_TAG: pattern.flags(),
        }),
        Value::Host(host) => {
            let mut object = Map::new();
            for (key, value) in host.fields() {
                object.insert(key, to_json(&value));
            }
            serde_json::Value::Object(object)
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n == n.trunc() && n.abs() < 9.0e15 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
