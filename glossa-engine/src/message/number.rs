//! Locale-aware number rendering

use super::ast::{DecimalPattern, NumberStyle};
use crate::error::data_diagnostic;
use fixed_decimal::{Decimal, FloatPrecision, Sign};
use glossa_core::{Diagnostic, DiagnosticCode, FormattableValue};
use icu_decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu_decimal::DecimalFormatter;
use icu_locale_core::Locale;

/// Fraction digits kept for floating point values
const DOUBLE_FRACTION_DIGITS: i16 = 3;

/// A numeric value ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Finite value with exact digits
    Finite(Decimal),
    /// Not a number
    NaN,
    /// Positive or negative infinity
    Infinite {
        /// Sign of the infinity
        negative: bool,
    },
}

impl Number {
    /// Digits of `value` as the default style shows them
    ///
    /// Integers are exact, doubles keep at most three fraction digits
    /// (half-even), decimals keep every digit. Trailing fraction zeros are
    /// dropped in all cases.
    pub fn from_value(value: &FormattableValue) -> Result<Self, Diagnostic> {
        let mut number = Self::exact(value)?;
        if let Number::Finite(decimal) = &mut number {
            if matches!(value, FormattableValue::Double(_)) {
                decimal.round(-DOUBLE_FRACTION_DIGITS);
            }
            decimal.absolute.trim_end();
            if decimal.absolute.is_zero() {
                decimal.sign = Sign::None;
            }
        }
        Ok(number)
    }

    /// Every digit of `value`, doubles in shortest round-trip form
    pub fn exact(value: &FormattableValue) -> Result<Self, Diagnostic> {
        let decimal = match value {
            FormattableValue::Integer(n) => Decimal::from(*n),
            FormattableValue::Double(f) if f.is_nan() => return Ok(Number::NaN),
            FormattableValue::Double(f) if f.is_infinite() => {
                return Ok(Number::Infinite {
                    negative: f.is_sign_negative(),
                })
            }
            FormattableValue::Double(f) => Decimal::try_from_f64(*f, FloatPrecision::RoundTrip)
                .map_err(|err| internal(format!("cannot represent {f}: {err:?}")))?,
            FormattableValue::Decimal(text) => Decimal::try_from_str(text)
                .map_err(|err| internal(format!("cannot read decimal '{text}': {err:?}")))?,
            other => return Err(mismatch(other, "a number")),
        };
        Ok(Number::Finite(decimal))
    }
}

/// The numeric value of `value` as a float, for `=N` plural matching
pub fn as_f64(value: &FormattableValue) -> Option<f64> {
    match value {
        FormattableValue::Integer(n) => Some(*n as f64),
        FormattableValue::Double(f) => Some(*f),
        FormattableValue::Decimal(text) => text.parse().ok(),
        _ => None,
    }
}

/// `value - offset`, keeping integers integral when possible
pub fn shifted(value: &FormattableValue, offset: i64) -> Result<FormattableValue, Diagnostic> {
    if offset == 0 {
        return Ok(value.clone());
    }
    match value {
        FormattableValue::Integer(n) => Ok(n
            .checked_sub(offset)
            .map(FormattableValue::Integer)
            .unwrap_or(FormattableValue::Double(*n as f64 - offset as f64))),
        other => as_f64(other)
            .map(|f| FormattableValue::Double(f - offset as f64))
            .ok_or_else(|| mismatch(other, "a number")),
    }
}

pub(crate) fn mismatch(value: &FormattableValue, wanted: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::ArgumentTypeMismatch,
        format!("{} value where {wanted} is required", value.kind()),
    )
}

fn internal(detail: String) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::Internal, detail)
}

fn normalize_zero(mut decimal: Decimal) -> Decimal {
    if decimal.absolute.is_zero() {
        decimal.sign = Sign::None;
    }
    decimal
}

/// Grouped and ungrouped formatters for one locale
#[derive(Debug)]
pub struct NumberFormatter {
    grouped: DecimalFormatter,
    plain: DecimalFormatter,
}

impl NumberFormatter {
    /// Load decimal symbols for `locale`, honoring its numbering system
    pub fn try_new(locale: &Locale) -> Result<Self, Diagnostic> {
        let load = |strategy: GroupingStrategy| {
            DecimalFormatter::try_new(locale.into(), DecimalFormatterOptions::from(strategy))
                .map_err(|err| data_diagnostic("decimal symbols", err))
        };
        Ok(Self {
            grouped: load(GroupingStrategy::Auto)?,
            plain: load(GroupingStrategy::Never)?,
        })
    }

    /// Render `value` in `style`
    pub fn format(&self, value: &FormattableValue, style: &NumberStyle) -> Result<String, Diagnostic> {
        let number = match style {
            NumberStyle::Default => Number::from_value(value)?,
            _ => Number::exact(value)?,
        };
        let Number::Finite(mut decimal) = number else {
            return Ok(special(&number));
        };

        let text = match style {
            NumberStyle::Default => self.grouped.format_to_string(&decimal),
            NumberStyle::Integer => {
                decimal.round(0);
                self.grouped.format_to_string(&normalize_zero(decimal))
            }
            NumberStyle::Percent => {
                decimal.absolute.multiply_pow10(2);
                decimal.round(0);
                decimal.absolute.trim_start();
                format!("{}%", self.grouped.format_to_string(&normalize_zero(decimal)))
            }
            NumberStyle::Pattern(pattern) => self.format_pattern(decimal, pattern),
        };
        Ok(text)
    }

    fn format_pattern(&self, mut decimal: Decimal, pattern: &DecimalPattern) -> String {
        if pattern.percent {
            decimal.absolute.multiply_pow10(2);
        }
        decimal.round(-i16::from(pattern.max_fraction));
        decimal.absolute.trim_end();
        decimal.absolute.trim_start();
        decimal.absolute.pad_end(-i16::from(pattern.min_fraction));
        decimal.absolute.pad_start(i16::from(pattern.min_integer.max(1)));

        let formatter = if pattern.grouping {
            &self.grouped
        } else {
            &self.plain
        };
        format!(
            "{}{}{}",
            pattern.prefix,
            formatter.format_to_string(&normalize_zero(decimal)),
            pattern.suffix
        )
    }
}

fn special(number: &Number) -> String {
    match number {
        Number::NaN => "NaN".to_string(),
        Number::Infinite { negative: true } => "-∞".to_string(),
        _ => "∞".to_string(),
    }
}

impl NumberStyle {
    /// Read a number style: `integer`, `percent`, or a decimal pattern
    pub fn parse(style: Option<&str>) -> Result<Self, Diagnostic> {
        match style {
            None => Ok(NumberStyle::Default),
            Some("integer") => Ok(NumberStyle::Integer),
            Some("percent") => Ok(NumberStyle::Percent),
            Some(skeleton) if skeleton.starts_with("::") => Err(illegal(format!(
                "number skeletons are not supported: '{skeleton}'"
            ))),
            Some(pattern) => DecimalPattern::parse(pattern).map(NumberStyle::Pattern),
        }
    }
}

fn illegal(detail: String) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::IllegalArgument, detail)
}

impl DecimalPattern {
    /// Read the positive subpattern of a decimal pattern such as `#,##0.00`
    pub fn parse(pattern: &str) -> Result<Self, Diagnostic> {
        let positive = pattern.split(';').next().unwrap_or_default();
        let is_digit_syntax = |c: char| matches!(c, '#' | '0' | ',' | '.');

        let (Some(first), Some(last)) = (
            positive.find(is_digit_syntax),
            positive.rfind(is_digit_syntax),
        ) else {
            return Err(illegal(format!("unsupported number style '{pattern}'")));
        };

        let prefix = positive[..first].replace('\'', "");
        let suffix = positive[last + 1..].replace('\'', "");
        let digits = &positive[first..=last];
        if !digits.chars().all(is_digit_syntax) {
            return Err(illegal(format!("unsupported number pattern '{pattern}'")));
        }

        let (integer, fraction) = match digits.split_once('.') {
            Some((_, fraction)) if fraction.contains('.') => {
                return Err(illegal(format!("too many decimal points in '{pattern}'")))
            }
            Some((integer, fraction)) => (integer, fraction.replace(',', "")),
            None => (digits, String::new()),
        };

        let count = |text: &str, digit: char| {
            u8::try_from(text.chars().filter(|&c| c == digit).count())
                .map_err(|_| illegal(format!("too many digits in '{pattern}'")))
        };
        let min_fraction = count(&fraction, '0')?;
        let max_fraction = min_fraction
            .checked_add(count(&fraction, '#')?)
            .ok_or_else(|| illegal(format!("too many digits in '{pattern}'")))?;

        Ok(Self {
            percent: has_unquoted_percent(&positive[..first])
                || has_unquoted_percent(&positive[last + 1..]),
            min_integer: count(integer, '0')?,
            min_fraction,
            max_fraction,
            grouping: integer.contains(','),
            prefix,
            suffix,
        })
    }
}

fn has_unquoted_percent(affix: &str) -> bool {
    affix
        .split('\'')
        .step_by(2)
        .any(|unquoted| unquoted.contains('%'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::Locale as GlossaLocale;

    fn formatter(tag: &str) -> NumberFormatter {
        NumberFormatter::try_new(&GlossaLocale::from_tag(tag).unwrap().to_icu()).unwrap()
    }

    fn styled(tag: &str, value: FormattableValue, style: &str) -> String {
        let style = NumberStyle::parse(Some(style)).unwrap();
        formatter(tag).format(&value, &style).unwrap()
    }

    fn default(tag: &str, value: FormattableValue) -> String {
        formatter(tag).format(&value, &NumberStyle::Default).unwrap()
    }

    #[test]
    fn test_integer_grouping() {
        assert_eq!(default("en_US", 1_234_567i64.into()), "1,234,567");
        assert_eq!(default("fr_FR", 1_234_567i64.into()), "1\u{202f}234\u{202f}567");
        assert_eq!(default("en_US", (-42i64).into()), "-42");
    }

    #[test]
    fn test_double_defaults() {
        assert_eq!(default("en_US", 3.14159f64.into()), "3.142");
        assert_eq!(default("en_US", 0.0f64.into()), "0");
        assert_eq!(default("en_US", (-0.0f64).into()), "0");
        assert_eq!(default("en_US", (-0.5f64).into()), "-0.5");
        assert_eq!(default("en_US", 2.5f64.into()), "2.5");
        assert_eq!(default("en_US", 0.0005f64.into()), "0");
        assert_eq!(default("en_US", f64::NAN.into()), "NaN");
        assert_eq!(default("en_US", f64::NEG_INFINITY.into()), "-∞");
    }

    #[test]
    fn test_decimal_keeps_digits() {
        let value = |text: &str| FormattableValue::Decimal(text.to_string());
        assert_eq!(default("en_US", value("-42.50")), "-42.5");
        assert_eq!(default("en_US", value("1.23E10")), "12,300,000,000");
        assert_eq!(
            default("en_US", value("0.000000000000000000001")),
            "0.000000000000000000001"
        );
    }

    #[test]
    fn test_locale_symbols() {
        let value = FormattableValue::Decimal("1234.56".to_string());
        assert_eq!(default("de_DE", value), "1.234,56");
        assert_eq!(default("ar@numbers=arab", 1234i64.into()), "١٬٢٣٤");
    }

    #[test]
    fn test_integer_and_percent_styles() {
        assert_eq!(styled("en_US", 2.5f64.into(), "integer"), "2");
        assert_eq!(styled("en_US", 3.5f64.into(), "integer"), "4");
        assert_eq!(styled("en_US", 0.256f64.into(), "percent"), "26%");
        assert_eq!(styled("en_US", 0.05f64.into(), "percent"), "5%");
        assert_eq!(styled("en_US", 0.0f64.into(), "percent"), "0%");
        assert_eq!(
            styled("en_US", FormattableValue::Decimal("0.256".to_string()), "percent"),
            "26%"
        );
        assert_eq!(styled("en_US", 12.5f64.into(), "percent"), "1,250%");
    }

    #[test]
    fn test_decimal_patterns() {
        assert_eq!(styled("en_US", 1234.5f64.into(), "#,##0.00"), "1,234.50");
        assert_eq!(styled("en_US", 1234.5f64.into(), "0.000"), "1234.500");
        assert_eq!(styled("en_US", 3.14159f64.into(), "#.##"), "3.14");
        assert_eq!(styled("en_US", 7i64.into(), "000"), "007");
        assert_eq!(
            styled(
                "en_US",
                FormattableValue::Decimal("0.12345678901234567891".to_string()),
                "#.####################"
            ),
            "0.12345678901234567891"
        );
        assert_eq!(styled("en_US", 0.5f64.into(), "#0.0'%'"), "0.5%");
        assert_eq!(styled("en_US", 0.5f64.into(), "#0%"), "50%");
        assert_eq!(styled("en_US", 0.07f64.into(), "#%"), "7%");
        assert_eq!(styled("en_US", 0.5f64.into(), "00.0"), "00.5");
    }

    #[test]
    fn test_pattern_parsing() {
        let pattern = DecimalPattern::parse("$#,##0.0#;($#)").unwrap();
        assert_eq!(pattern.prefix, "$");
        assert_eq!(pattern.min_integer, 1);
        assert_eq!(pattern.min_fraction, 1);
        assert_eq!(pattern.max_fraction, 2);
        assert!(pattern.grouping);
        assert!(!pattern.percent);

        assert!(DecimalPattern::parse("currency").is_err());
        assert!(DecimalPattern::parse("0.0.0").is_err());
        assert!(NumberStyle::parse(Some("::compact-short")).is_err());
    }

    #[test]
    fn test_text_is_a_mismatch() {
        let err = formatter("en").format(&"x".into(), &NumberStyle::Default).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::ArgumentTypeMismatch);
    }

    #[test]
    fn test_shifted() {
        assert_eq!(shifted(&5i64.into(), 1).unwrap(), FormattableValue::Integer(4));
        assert_eq!(shifted(&2.5f64.into(), 1).unwrap(), FormattableValue::Double(1.5));
        assert_eq!(
            shifted(&i64::MIN.into(), 1).unwrap(),
            FormattableValue::Double(i64::MIN as f64 - 1.0)
        );
    }
}
