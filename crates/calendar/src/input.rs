//! Dynamically typed timestamp cells.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use std::collections::BTreeMap;

/// A timestamp candidate as it arrives from a loosely typed source
/// (a spreadsheet cell, a JSON field, a Python object).
///
/// Only [`TimestampInput::DateTime`] and [`TimestampInput::Text`] can be
/// decomposed; every other variant is a type error.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampInput {
    /// An already-structured date/time.
    DateTime(NaiveDateTime),
    /// A string expected in `YYYY-MM-DD HH:MM:SS` form.
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<TimestampInput>),
    Map(BTreeMap<String, TimestampInput>),
    Null,
}

impl TimestampInput {
    /// Type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TimestampInput::DateTime(_) => "datetime",
            TimestampInput::Text(_) => "string",
            TimestampInput::Integer(_) => "integer",
            TimestampInput::Float(_) => "float",
            TimestampInput::Bool(_) => "boolean",
            TimestampInput::List(_) => "list",
            TimestampInput::Map(_) => "map",
            TimestampInput::Null => "null",
        }
    }
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(dt: NaiveDateTime) -> Self {
        TimestampInput::DateTime(dt)
    }
}

/// Zoned date/times decompose on their local wall-clock fields.
impl<Tz: TimeZone> From<DateTime<Tz>> for TimestampInput {
    fn from(dt: DateTime<Tz>) -> Self {
        TimestampInput::DateTime(dt.naive_local())
    }
}

impl From<&str> for TimestampInput {
    fn from(s: &str) -> Self {
        TimestampInput::Text(s.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(s: String) -> Self {
        TimestampInput::Text(s)
    }
}

impl From<i64> for TimestampInput {
    fn from(v: i64) -> Self {
        TimestampInput::Integer(v)
    }
}

impl From<f64> for TimestampInput {
    fn from(v: f64) -> Self {
        TimestampInput::Float(v)
    }
}

impl From<bool> for TimestampInput {
    fn from(v: bool) -> Self {
        TimestampInput::Bool(v)
    }
}

impl<T: Into<TimestampInput>> From<Option<T>> for TimestampInput {
    fn from(v: Option<T>) -> Self {
        v.map_or(TimestampInput::Null, Into::into)
    }
}

impl From<&serde_json::Value> for TimestampInput {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => TimestampInput::Null,
            Value::Bool(b) => TimestampInput::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => TimestampInput::Integer(i),
                None => TimestampInput::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => TimestampInput::Text(s.clone()),
            Value::Array(items) => TimestampInput::List(items.iter().map(Into::into).collect()),
            Value::Object(map) => TimestampInput::Map(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}
