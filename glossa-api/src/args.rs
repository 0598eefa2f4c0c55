//! Message arguments from text and JSON
//!
//! Command lines and configuration files carry arguments as strings. A
//! command line argument is `name=value` or `name:type=value`, where `type` is one of
//! `int`, `float`, `decimal`, `bool`, `date`, `datetime` or `str`. Untyped
//! values are read as an integer, then a float, then text.

use crate::error::{ApiError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use glossa_core::{Argument, DecimalText};

/// Argument type named in `name:type=value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    /// Integer of any width
    Int,
    /// Floating point
    Float,
    /// Exact decimal digits
    Decimal,
    /// `true` or `false`
    Bool,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`, optionally with an offset
    DateTime,
    /// Text
    Str,
}

impl ArgumentType {
    /// Look up a type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(ArgumentType::Int),
            "float" | "double" => Some(ArgumentType::Float),
            "decimal" => Some(ArgumentType::Decimal),
            "bool" | "boolean" => Some(ArgumentType::Bool),
            "date" => Some(ArgumentType::Date),
            "datetime" => Some(ArgumentType::DateTime),
            "str" | "string" | "text" => Some(ArgumentType::Str),
            _ => None,
        }
    }
}

/// Split `name[:type]=value` and read the value
pub fn parse_argument(text: &str) -> Result<(String, Argument)> {
    let (head, raw) = text.split_once('=').ok_or_else(|| ApiError::InvalidArgument {
        name: text.to_string(),
        reason: "expected name=value".to_string(),
    })?;

    let (name, kind) = match head.split_once(':') {
        Some((name, kind)) => {
            let kind = ArgumentType::from_name(kind).ok_or_else(|| ApiError::InvalidArgument {
                name: name.trim().to_string(),
                reason: format!("unknown argument type '{kind}'"),
            })?;
            (name.trim(), Some(kind))
        }
        None => (head.trim(), None),
    };
    if name.is_empty() {
        return Err(ApiError::InvalidArgument {
            name: text.to_string(),
            reason: "empty argument name".to_string(),
        });
    }

    let value = match kind {
        Some(kind) => typed_value(kind, raw),
        None => Ok(inferred_value(raw)),
    }
    .map_err(|reason| ApiError::InvalidArgument {
        name: name.to_string(),
        reason,
    })?;
    Ok((name.to_string(), value))
}

fn inferred_value(raw: &str) -> Argument {
    if let Ok(n) = raw.trim().parse::<i128>() {
        return Argument::Integer(n);
    }
    match raw.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => Argument::Float(f),
        _ => Argument::Text(raw.to_string()),
    }
}

fn typed_value(kind: ArgumentType, raw: &str) -> std::result::Result<Argument, String> {
    let trimmed = raw.trim();
    match kind {
        ArgumentType::Int => trimmed
            .parse::<i128>()
            .map(Argument::Integer)
            .map_err(|err| format!("'{raw}' is not an integer: {err}")),
        ArgumentType::Float => trimmed
            .parse::<f64>()
            .map(Argument::Float)
            .map_err(|err| format!("'{raw}' is not a number: {err}")),
        ArgumentType::Decimal => Ok(Argument::from(DecimalText::new(trimmed))),
        ArgumentType::Bool => trimmed
            .parse::<bool>()
            .map(Argument::Bool)
            .map_err(|_| format!("'{raw}' is not true or false")),
        ArgumentType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Argument::Date)
            .map_err(|err| format!("'{raw}' is not a YYYY-MM-DD date: {err}")),
        ArgumentType::DateTime => parse_datetime(trimmed),
        ArgumentType::Str => Ok(Argument::Text(raw.to_string())),
    }
}

fn parse_datetime(text: &str) -> std::result::Result<Argument, String> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
        return Ok(Argument::DateTime(zoned));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(Argument::NaiveDateTime)
        .ok_or_else(|| format!("'{text}' is not a date-time (expected YYYY-MM-DDTHH:MM:SS)"))
}

/// Convert a JSON value to an argument
///
/// Numbers keep their integer form when they have one. Strings, booleans and
/// `null` map directly; arrays and objects are rejected.
#[cfg(feature = "serde")]
pub fn argument_from_json(name: &str, value: &serde_json::Value) -> Result<Argument> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(Argument::Null),
        Value::Bool(flag) => Ok(Argument::Bool(*flag)),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Ok(Argument::Integer(i128::from(n)))
            } else if let Some(n) = number.as_u64() {
                Ok(Argument::Integer(i128::from(n)))
            } else {
                number
                    .as_f64()
                    .map(Argument::Float)
                    .ok_or_else(|| ApiError::InvalidArgument {
                        name: name.to_string(),
                        reason: format!("unrepresentable number {number}"),
                    })
            }
        }
        Value::String(text) => Ok(Argument::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::InvalidArgument {
            name: name.to_string(),
            reason: "arrays and objects cannot be message arguments".to_string(),
        }),
    }
}

/// Convert every member of a JSON object
#[cfg(feature = "serde")]
pub fn arguments_from_json(value: &serde_json::Value) -> Result<Vec<(String, Argument)>> {
    let object = value.as_object().ok_or_else(|| {
        ApiError::Config("message arguments must be a JSON object".to_string())
    })?;
    object
        .iter()
        .map(|(name, value)| Ok((name.clone(), argument_from_json(name, value)?)))
        .collect()
}
