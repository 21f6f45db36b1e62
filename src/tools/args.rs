//! Lenient accessors over model-supplied tool arguments.
//!
//! Models send loosely typed JSON: numbers as strings, a single string where a list
//! was asked for, explicit nulls for omitted values. Accessors coerce what they can
//! and treat the rest as absent; only the `required_*` and date accessors fail.

use crate::types::{Error, LimitBounds, Result};
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

/// Borrowed view of a tool call's argument object.
#[derive(Debug, Clone, Copy)]
pub struct ToolArgs<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArgs<'a> {
    /// `null` is an empty argument set; anything other than an object is rejected.
    pub fn parse(value: &'a Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self { map: None }),
            Value::Object(map) => Ok(Self { map: Some(map) }),
            _ => Err(Error::validation("arguments must be a JSON object")),
        }
    }

    /// Raw value; explicit `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key)?.as_str()
    }

    /// Trimmed string that must be present and non-blank.
    pub fn required_str(&self, key: &str) -> Result<&'a str> {
        self.str(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::validation(format!("{} is required", key)))
    }

    /// List of strings. A bare string is a one-element list; non-string items are dropped.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Positive whole number, accepting numeric strings and truncating fractions.
    pub fn positive_int(&self, key: &str) -> Option<usize> {
        let n = match self.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if n.is_finite() && n >= 1.0 {
            // saturating float-to-int cast; clamping happens afterwards
            Some(n.trunc() as usize)
        } else {
            None
        }
    }

    /// `limit`-style argument clamped into `bounds`.
    pub fn limit(&self, key: &str, bounds: LimitBounds) -> usize {
        bounds.clamp(self.positive_int(key))
    }

    /// Boolean flag; accepts `"true"`/`"false"` strings. Anything else yields `default`.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => false,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
            _ => default,
        }
    }

    /// Optional calendar date, `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn date(&self, key: &str) -> Result<Option<NaiveDate>> {
        let Some(raw) = self.str(key).map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(ts.date_naive()));
        }
        Err(Error::validation(format!(
            "{} must be a date in YYYY-MM-DD format",
            key
        )))
    }
}
