//! Argument coercion into [`FormattableValue`]
//!
//! Inputs expose what they can be through the [`ArgumentValue`] probes.
//! [`ValueCoercer`] asks in a fixed order and the first probe that answers
//! decides the tag, so a value that is both integral and textual is an
//! integer.

use super::value::FormattableValue;
use crate::error::CoercionCause;
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Date-time carried by an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Date-time with a known UTC offset
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock date-time; the [`Timeline`] decides where it sits
    Naive(NaiveDateTime),
}

/// Probes used to classify an argument
///
/// Every probe but [`type_name`](Self::type_name) defaults to "not this kind".
pub trait ArgumentValue {
    /// Name used in unsupported-type errors
    fn type_name(&self) -> &str;

    /// Integral value
    fn integral(&self) -> Option<i128> {
        None
    }

    /// Text value
    fn text(&self) -> Option<&str> {
        None
    }

    /// Floating point value
    fn float(&self) -> Option<f64> {
        None
    }

    /// Exact decimal, as text
    fn decimal_text(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Date with a time component
    fn timestamp(&self) -> Option<Timestamp> {
        None
    }

    /// Date without a time component
    fn date(&self) -> Option<NaiveDate> {
        None
    }
}

impl<T: ArgumentValue + ?Sized> ArgumentValue for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }
    fn integral(&self) -> Option<i128> {
        (**self).integral()
    }
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
    fn float(&self) -> Option<f64> {
        (**self).float()
    }
    fn decimal_text(&self) -> Option<Cow<'_, str>> {
        (**self).decimal_text()
    }
    fn timestamp(&self) -> Option<Timestamp> {
        (**self).timestamp()
    }
    fn date(&self) -> Option<NaiveDate> {
        (**self).date()
    }
}

macro_rules! impl_integral_argument {
    ($($ty:ty),*) => {
        $(
            impl ArgumentValue for $ty {
                fn type_name(&self) -> &str {
                    stringify!($ty)
                }
                fn integral(&self) -> Option<i128> {
                    Some(i128::from(*self))
                }
            }
        )*
    };
}

impl_integral_argument!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ArgumentValue for isize {
    fn type_name(&self) -> &str {
        "isize"
    }
    fn integral(&self) -> Option<i128> {
        i128::try_from(*self).ok()
    }
}

impl ArgumentValue for usize {
    fn type_name(&self) -> &str {
        "usize"
    }
    fn integral(&self) -> Option<i128> {
        i128::try_from(*self).ok()
    }
}

impl ArgumentValue for bool {
    fn type_name(&self) -> &str {
        "bool"
    }
    fn integral(&self) -> Option<i128> {
        Some(i128::from(*self))
    }
}

impl ArgumentValue for str {
    fn type_name(&self) -> &str {
        "str"
    }
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ArgumentValue for String {
    fn type_name(&self) -> &str {
        "String"
    }
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ArgumentValue for f64 {
    fn type_name(&self) -> &str {
        "f64"
    }
    fn float(&self) -> Option<f64> {
        Some(*self)
    }
}

impl ArgumentValue for f32 {
    fn type_name(&self) -> &str {
        "f32"
    }
    fn float(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl<Tz: TimeZone> ArgumentValue for DateTime<Tz> {
    fn type_name(&self) -> &str {
        "DateTime"
    }
    fn timestamp(&self) -> Option<Timestamp> {
        Some(Timestamp::Zoned(self.fixed_offset()))
    }
}

impl ArgumentValue for NaiveDateTime {
    fn type_name(&self) -> &str {
        "NaiveDateTime"
    }
    fn timestamp(&self) -> Option<Timestamp> {
        Some(Timestamp::Naive(*self))
    }
}

impl ArgumentValue for NaiveDate {
    fn type_name(&self) -> &str {
        "NaiveDate"
    }
    fn date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

/// Arbitrary-precision decimal given by its text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecimalText(pub String);

impl DecimalText {
    /// Wrap decimal text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl ArgumentValue for DecimalText {
    fn type_name(&self) -> &str {
        "decimal"
    }
    fn decimal_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.0))
    }
}

/// Owned argument of any accepted shape
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Integer of any width
    Integer(i128),
    /// Boolean, coerced as 0 or 1
    Bool(bool),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Exact decimal text
    Decimal(String),
    /// Date-time with offset
    DateTime(DateTime<FixedOffset>),
    /// Wall-clock date-time
    NaiveDateTime(NaiveDateTime),
    /// Date only
    Date(NaiveDate),
    /// Absent value; always rejected
    Null,
}

impl ArgumentValue for Argument {
    fn type_name(&self) -> &str {
        match self {
            Argument::Integer(_) => "integer",
            Argument::Bool(_) => "bool",
            Argument::Float(_) => "float",
            Argument::Text(_) => "text",
            Argument::Decimal(_) => "decimal",
            Argument::DateTime(_) => "datetime",
            Argument::NaiveDateTime(_) => "datetime",
            Argument::Date(_) => "date",
            Argument::Null => "null",
        }
    }

    fn integral(&self) -> Option<i128> {
        match self {
            Argument::Integer(value) => Some(*value),
            Argument::Bool(value) => Some(i128::from(*value)),
            _ => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Argument::Text(text) => Some(text),
            _ => None,
        }
    }

    fn float(&self) -> Option<f64> {
        match self {
            Argument::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn decimal_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Argument::Decimal(text) => Some(Cow::Borrowed(text)),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Argument::DateTime(value) => Some(Timestamp::Zoned(*value)),
            Argument::NaiveDateTime(value) => Some(Timestamp::Naive(*value)),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        match self {
            Argument::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Integer(i128::from(value))
    }
}

impl From<i128> for Argument {
    fn from(value: i128) -> Self {
        Argument::Integer(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Float(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Text(value)
    }
}

impl From<DecimalText> for Argument {
    fn from(value: DecimalText) -> Self {
        Argument::Decimal(value.0)
    }
}

impl From<NaiveDate> for Argument {
    fn from(value: NaiveDate) -> Self {
        Argument::Date(value)
    }
}

impl From<NaiveDateTime> for Argument {
    fn from(value: NaiveDateTime) -> Self {
        Argument::NaiveDateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Argument {
    fn from(value: DateTime<Tz>) -> Self {
        Argument::DateTime(value.fixed_offset())
    }
}

/// Places wall-clock date-times on the epoch timeline
pub trait Timeline: Send + Sync {
    /// Milliseconds since the epoch for a wall-clock date-time
    fn epoch_millis(&self, wall_clock: &NaiveDateTime) -> Result<f64, String>;
}

/// Reads wall-clock date-times as UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcTimeline;

impl Timeline for UtcTimeline {
    fn epoch_millis(&self, wall_clock: &NaiveDateTime) -> Result<f64, String> {
        Ok(millis_since_epoch(&wall_clock.and_utc()))
    }
}

/// Reads wall-clock date-times in the system time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeline;

impl Timeline for LocalTimeline {
    fn epoch_millis(&self, wall_clock: &NaiveDateTime) -> Result<f64, String> {
        match Local.from_local_datetime(wall_clock) {
            LocalResult::Single(instant) => Ok(millis_since_epoch(&instant)),
            LocalResult::Ambiguous(_, _) => {
                Err(format!("local time {wall_clock} is ambiguous"))
            }
            LocalResult::None => Err(format!("local time {wall_clock} does not exist")),
        }
    }
}

/// Milliseconds since the epoch, keeping sub-millisecond precision
pub fn millis_since_epoch<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    instant.timestamp() as f64 * 1000.0 + f64::from(instant.timestamp_subsec_nanos()) / 1_000_000.0
}

/// Canonical form of decimal text, or `None` if it is not a finite decimal
pub fn canonical_decimal(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let canonical = unsigned.replace("e+", "e").replace("E+", "E");
    fixed_decimal::Decimal::try_from_str(&canonical)
        .ok()
        .map(|_| canonical)
}

/// Converts arguments to [`FormattableValue`]
#[derive(Clone)]
pub struct ValueCoercer {
    timeline: Arc<dyn Timeline>,
}

impl Default for ValueCoercer {
    fn default() -> Self {
        Self::new(Arc::new(UtcTimeline))
    }
}

impl fmt::Debug for ValueCoercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCoercer").finish_non_exhaustive()
    }
}

impl ValueCoercer {
    /// Create a coercer using `timeline` for wall-clock date-times
    pub fn new(timeline: Arc<dyn Timeline>) -> Self {
        Self { timeline }
    }

    /// Coerce one value
    pub fn coerce<V: ArgumentValue + ?Sized>(
        &self,
        value: &V,
    ) -> Result<FormattableValue, CoercionCause> {
        if let Some(integer) = value.integral() {
            return i64::try_from(integer)
                .map(FormattableValue::Integer)
                .map_err(|_| CoercionCause::Overflow);
        }
        if let Some(text) = value.text() {
            return Ok(FormattableValue::Text(text.to_string()));
        }
        if let Some(float) = value.float() {
            return Ok(FormattableValue::Double(float));
        }
        if let Some(decimal) = value.decimal_text() {
            return canonical_decimal(&decimal)
                .map(FormattableValue::Decimal)
                .ok_or_else(|| CoercionCause::DecimalParse {
                    text: decimal.into_owned(),
                });
        }
        if let Some(timestamp) = value.timestamp() {
            return self.instant(timestamp);
        }
        if let Some(date) = value.date() {
            return self.instant(Timestamp::Naive(date.and_time(NaiveTime::MIN)));
        }
        Err(CoercionCause::UnsupportedType {
            type_name: value.type_name().to_string(),
        })
    }

    fn instant(&self, timestamp: Timestamp) -> Result<FormattableValue, CoercionCause> {
        let millis = match timestamp {
            Timestamp::Zoned(instant) => millis_since_epoch(&instant),
            Timestamp::Naive(wall_clock) => self
                .timeline
                .epoch_millis(&wall_clock)
                .map_err(CoercionCause::Collaborator)?,
        };
        Ok(FormattableValue::InstantMillis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    /// Answers both the integral and the text probe
    struct NumericString;

    impl ArgumentValue for NumericString {
        fn type_name(&self) -> &str {
            "NumericString"
        }
        fn integral(&self) -> Option<i128> {
            Some(7)
        }
        fn text(&self) -> Option<&str> {
            Some("seven")
        }
    }

    struct Opaque;

    impl ArgumentValue for Opaque {
        fn type_name(&self) -> &str {
            "Opaque"
        }
    }

    struct BrokenTimeline;

    impl Timeline for BrokenTimeline {
        fn epoch_millis(&self, _: &NaiveDateTime) -> Result<f64, String> {
            Err("no clock".to_string())
        }
    }

    fn coerce<V: ArgumentValue + ?Sized>(value: &V) -> Result<FormattableValue, CoercionCause> {
        ValueCoercer::default().coerce(value)
    }

    #[test]
    fn test_integral_wins_over_text() {
        assert_eq!(coerce(&NumericString), Ok(FormattableValue::Integer(7)));
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(coerce(&i64::MIN), Ok(FormattableValue::Integer(i64::MIN)));
        assert_eq!(coerce(&i64::MAX), Ok(FormattableValue::Integer(i64::MAX)));
        assert_eq!(coerce(&(i128::from(i64::MAX) + 1)), Err(CoercionCause::Overflow));
        assert_eq!(coerce(&u64::MAX), Err(CoercionCause::Overflow));
    }

    #[test]
    fn test_bool_is_integral() {
        assert_eq!(coerce(&true), Ok(FormattableValue::Integer(1)));
    }

    #[test]
    fn test_text_and_float() {
        assert_eq!(coerce("hi"), Ok(FormattableValue::Text("hi".to_string())));
        assert_eq!(coerce(&2.5f64), Ok(FormattableValue::Double(2.5)));
    }

    #[test]
    fn test_decimal_kept_as_text() {
        let value = coerce(&DecimalText::new("3.141592653589793238462643383279")).unwrap();
        assert_eq!(
            value,
            FormattableValue::Decimal("3.141592653589793238462643383279".to_string())
        );
    }

    #[test]
    fn test_decimal_exponent_canonicalised() {
        let value = coerce(&DecimalText::new(" +1.23E+10 ")).unwrap();
        assert_eq!(value, FormattableValue::Decimal("1.23E10".to_string()));
    }

    #[test]
    fn test_decimal_rejects_nan() {
        assert_eq!(
            coerce(&DecimalText::new("NaN")),
            Err(CoercionCause::DecimalParse {
                text: "NaN".to_string()
            })
        );
    }

    #[test]
    fn test_datetime_keeps_fractional_millis() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
            + chrono::Duration::microseconds(250);
        let millis = 1_705_329_000_000.0 + 0.25;
        assert_eq!(coerce(&instant), Ok(FormattableValue::InstantMillis(millis)));
    }

    #[test]
    fn test_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 25).unwrap();
        assert_eq!(
            coerce(&date),
            Ok(FormattableValue::InstantMillis(643_593_600_000.0))
        );
    }

    #[test]
    fn test_timeline_failure_is_collaborator_cause() {
        let coercer = ValueCoercer::new(Arc::new(BrokenTimeline));
        let wall_clock = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            coercer.coerce(&wall_clock),
            Err(CoercionCause::Collaborator("no clock".to_string()))
        );
    }

    #[test]
    fn test_unsupported_type() {
        let err = coerce(&Opaque).unwrap_err();
        assert_eq!(
            err,
            CoercionCause::UnsupportedType {
                type_name: "Opaque".to_string()
            }
        );
        assert!(err.to_string().contains("integer, floating point, text, decimal, date, or datetime"));
        assert!(coerce(&Argument::Null).is_err());
    }

    #[test]
    fn test_argument_enum_dispatch() {
        assert_eq!(
            coerce(&Argument::from(5i64)),
            Ok(FormattableValue::Integer(5))
        );
        assert_eq!(
            coerce(&Argument::Decimal("0.01".to_string())),
            Ok(FormattableValue::Decimal("0.01".to_string()))
        );
    }
}
