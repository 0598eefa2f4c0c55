//! Coerced argument values

use std::fmt;

/// A render argument after coercion
///
/// Exactly one tag per value; immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattableValue {
    /// Signed 64-bit integer
    Integer(i64),
    /// 64-bit float, carried unchanged
    Double(f64),
    /// Text
    Text(String),
    /// Canonical decimal digit string, never routed through a float
    Decimal(String),
    /// Milliseconds since the Unix epoch, fractional part kept
    InstantMillis(f64),
}

impl FormattableValue {
    /// Short name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            FormattableValue::Integer(_) => "integer",
            FormattableValue::Double(_) => "double",
            FormattableValue::Text(_) => "text",
            FormattableValue::Decimal(_) => "decimal",
            FormattableValue::InstantMillis(_) => "instant",
        }
    }

    /// Whether the value can feed a number, plural or ordinal placeholder
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormattableValue::Integer(_)
                | FormattableValue::Double(_)
                | FormattableValue::Decimal(_)
        )
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormattableValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FormattableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattableValue::Integer(value) => write!(f, "{value}"),
            FormattableValue::Double(value) => write!(f, "{value}"),
            FormattableValue::Text(text) | FormattableValue::Decimal(text) => f.write_str(text),
            FormattableValue::InstantMillis(millis) => write!(f, "@{millis}ms"),
        }
    }
}

impl From<i64> for FormattableValue {
    fn from(value: i64) -> Self {
        FormattableValue::Integer(value)
    }
}

impl From<f64> for FormattableValue {
    fn from(value: f64) -> Self {
        FormattableValue::Double(value)
    }
}

impl From<&str> for FormattableValue {
    fn from(value: &str) -> Self {
        FormattableValue::Text(value.to_string())
    }
}

impl From<String> for FormattableValue {
    fn from(value: String) -> Self {
        FormattableValue::Text(value)
    }
}
