//! Parsed drush output.
//!
//! drush prints a JSON object keyed by item name when it has something to
//! report, and nothing at all (or an empty array, which is how PHP encodes
//! an empty associative array) when it doesn't.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CheckError, Result};

/// Ordered mapping from item key to item record.
///
/// Keys keep the order they had in the tool's output.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ResultSet<T> {
    /// An empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, record)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Drop every entry whose key matches `pattern`.
    ///
    /// Only keys are matched; records are never inspected.
    pub fn exclude(mut self, pattern: &Regex) -> Self {
        self.entries.retain(|(key, _)| !pattern.is_match(key));
        self
    }
}

impl<T> FromIterator<(String, T)> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ResultSet<Value> {
    /// Deserialize every record into the check's record type.
    pub fn typed<T: DeserializeOwned>(self) -> Result<ResultSet<T>> {
        self.entries
            .into_iter()
            .map(|(key, value)| match serde_json::from_value::<T>(value) {
                Ok(record) => Ok((key, record)),
                Err(e) => Err(CheckError::MalformedOutput {
                    message: format!("entry '{}': {}", key, e),
                }),
            })
            .collect()
    }
}

/// Parse the tool's stdout into a result set.
///
/// Blank output, `null` and `[]` all mean "no items". Any other value that
/// is not a JSON object is rejected.
pub fn parse_result_set(stdout: &str) -> Result<ResultSet<Value>> {
    if stdout.trim().is_empty() {
        return Ok(ResultSet::new());
    }

    match serde_json::from_str::<Value>(stdout)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(ResultSet::new()),
        Value::Array(items) if items.is_empty() => Ok(ResultSet::new()),
        other => Err(CheckError::MalformedOutput {
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a non-empty array",
        Value::Object(_) => "an object",
    }
}
