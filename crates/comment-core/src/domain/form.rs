//! Form field collection and JSON payload construction.
//!
//! A submitted form yields its controls as an ordered list of `name=value`
//! pairs.  [`FormFields`] keeps that list exactly as the form produced it and
//! turns it into the flat JSON object the server expects.
//!
//! # Payload shape
//!
//! ```json
//! {"name":"Ada","text":"First!","utc":"2024-05-01T12:30:00.123Z"}
//! ```
//!
//! Every value is a JSON string.  When the same name appears twice the later
//! value replaces the earlier one, the same way assigning object keys in a
//! loop would.  The `utc` field is written last, so it always carries the
//! submission time even if the form happened to contain a control named `utc`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the timestamp field stamped into every payload.
pub const TIMESTAMP_FIELD: &str = "utc";

/// Error returned by [`parse_field`] for malformed `name=value` arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The argument contained no `=` separator.
    #[error("expected name=value, got '{0}'")]
    MissingSeparator(String),

    /// The part before `=` was empty.
    #[error("field name must not be empty in '{0}'")]
    EmptyName(String),
}

/// Ordered sequence of form control name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    /// Creates an empty field list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field list from any iterator of name/value pairs, keeping order.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }

    /// Appends one control's value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Number of pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes every pair.  This is what resetting the form does.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Iterates the pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serializes the fields into a JSON object and stamps [`TIMESTAMP_FIELD`].
    ///
    /// The caller supplies `utc` rather than this function reading the clock,
    /// which keeps the conversion deterministic.
    pub fn to_payload(&self, utc: DateTime<Utc>) -> Map<String, Value> {
        let mut payload = Map::with_capacity(self.pairs.len() + 1);
        for (name, value) in &self.pairs {
            payload.insert(name.clone(), Value::String(value.clone()));
        }
        payload.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(format_timestamp(utc)),
        );
        payload
    }
}

/// Formats `utc` as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(utc: DateTime<Utc>) -> String {
    utc.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a command-line style `name=value` argument.
///
/// Only the first `=` separates; the value may itself contain `=`.
///
/// # Errors
///
/// Returns [`FieldError::MissingSeparator`] when there is no `=` and
/// [`FieldError::EmptyName`] when the name part is empty.
pub fn parse_field(arg: &str) -> Result<(String, String), FieldError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| FieldError::MissingSeparator(arg.to_string()))?;
    if name.trim().is_empty() {
        return Err(FieldError::EmptyName(arg.to_string()));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
