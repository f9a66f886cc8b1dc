//! Pattern matching for text and payload registrants.
//!
//! A [`Pattern`] is the value compared against a message text or a payload
//! string. Two useful shapes exist:
//!
//! - [`Pattern::Text`] — exact equality against the target
//! - [`Pattern::Regex`] — a match test against the target
//!
//! The third shape, [`Pattern::Never`], matches nothing. It is produced when
//! a dynamically supplied value (for example from a JSON-driven registration
//! table) has an unsupported type; a warning is logged and registration
//! proceeds with the degenerate pattern rather than failing.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolbot_framework::Pattern;
//! use regex::Regex;
//!
//! let exact = Pattern::from("hello");
//! assert!(exact.matches("hello"));
//! assert!(!exact.matches("hello!"));
//!
//! let re = Pattern::from(Regex::new(r"^\d+$").unwrap());
//! assert!(re.matches("42"));
//! ```

use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// A pattern compared against a target string.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches when the target is exactly equal to the string.
    Text(String),
    /// Matches when the regular expression finds a match in the target.
    Regex(Regex),
    /// Matches nothing. Produced for unsupported dynamic pattern values.
    Never,
}

impl Pattern {
    /// Tests this pattern against a target string.
    pub fn matches(&self, target: &str) -> bool {
        match self {
            Pattern::Text(text) => text == target,
            Pattern::Regex(regex) => regex.is_match(target),
            Pattern::Never => false,
        }
    }

    /// Tests this pattern against an optional target.
    ///
    /// A missing target never matches, whatever the pattern.
    pub fn matches_opt(&self, target: Option<&str>) -> bool {
        target.is_some_and(|t| self.matches(t))
    }

    /// Builds a pattern from a dynamically supplied JSON value.
    ///
    /// JSON strings become [`Pattern::Text`]. Any other type logs a warning
    /// and yields [`Pattern::Never`]: registration continues, the entry just
    /// never matches.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Pattern::Text(text.clone()),
            other => {
                warn!(
                    got = json_type_name(other),
                    "patterns only accept a string or a regex; this entry will never match"
                );
                Pattern::Never
            }
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Text(text.to_string())
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::Text(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex(regex)
    }
}

impl From<&Value> for Pattern {
    fn from(value: &Value) -> Self {
        Pattern::from_value(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
