//! Typed attribute values.

use std::fmt;

/// A directive attribute value.
///
/// The attribute resolver infers the type from the source form: quoted
/// values are always strings, bare keys become `Bool(true)`, and unquoted
/// fully-numeric values become numbers.
///
/// # Example
///
/// ```
/// use mdc_ast::Value;
///
/// assert_eq!(Value::Num(560.0).to_string(), "560");
/// assert_eq!(Value::Str("75%".into()).to_string(), "75%");
/// assert_eq!(Value::Bool(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A string value, from a quoted or non-numeric unquoted token.
    Str(String),
    /// A numeric value, from an unquoted fully-numeric token.
    Num(f64),
    /// A boolean value, from a bare key or a literal `true`/`false`.
    Bool(bool),
}

impl Value {
    /// Borrow the string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Return the numeric content, if this is a number.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the boolean content, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            // Float `Display` prints the shortest form that parses back to
            // the same value and never appends ".0", so the attribute
            // resolver reads it back unchanged at any magnitude.
            Value::Num(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
