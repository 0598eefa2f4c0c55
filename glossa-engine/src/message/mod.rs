//! ICU MessageFormat compiler
//!
//! Supports the commonly used subset of ICU MessageFormat: simple, `number`,
//! `date`, `time`, `plural`, `selectordinal` and `select` arguments.

pub mod ast;
mod datetime;
mod number;
mod parser;

pub use number::NumberFormatter;
pub use parser::parse;

use ast::{ArgumentFormat, Message, Part, PluralBlock, PluralSelector};
use glossa_core::{
    CompiledTemplate, Diagnostic, DiagnosticCode, FormattableValue, Locale, MessageCompiler,
};
use icu_plurals::{PluralCategory, PluralRules};
use number::{as_f64, mismatch, shifted, Number};
use std::sync::Arc;

use crate::error::data_diagnostic;

/// Message compiler backed by ICU4X plural rules and decimal symbols
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuMessageCompiler;

impl IcuMessageCompiler {
    /// Create a compiler
    pub fn new() -> Self {
        Self
    }
}

impl MessageCompiler for IcuMessageCompiler {
    fn compile(
        &self,
        pattern: &str,
        locale: &Locale,
    ) -> Result<Arc<dyn CompiledTemplate>, Diagnostic> {
        let message = parse(pattern)?;
        let icu_locale = locale.to_icu();

        let numbers = NumberFormatter::try_new(&icu_locale)?;
        let cardinal = PluralRules::try_new_cardinal((&icu_locale).into())
            .map_err(|err| data_diagnostic("cardinal plural rules", err))?;
        let ordinal = PluralRules::try_new_ordinal((&icu_locale).into())
            .map_err(|err| data_diagnostic("ordinal plural rules", err))?;

        log::debug!(
            "compiled {} message parts for {locale}",
            message.len()
        );
        Ok(Arc::new(IcuTemplate {
            message,
            numbers,
            cardinal,
            ordinal,
        }))
    }
}

/// A parsed message with the locale data it renders with
#[derive(Debug)]
pub struct IcuTemplate {
    message: Message,
    numbers: NumberFormatter,
    cardinal: PluralRules,
    ordinal: PluralRules,
}

impl CompiledTemplate for IcuTemplate {
    fn render(&self, names: &[String], values: &[FormattableValue]) -> Result<String, Diagnostic> {
        let mut out = String::new();
        Renderer {
            template: self,
            names,
            values,
        }
        .message(&self.message, None, &mut out)?;
        Ok(out)
    }

    fn argument_names(&self) -> Vec<String> {
        ast::argument_names(&self.message)
    }
}

struct Renderer<'a> {
    template: &'a IcuTemplate,
    names: &'a [String],
    values: &'a [FormattableValue],
}

impl Renderer<'_> {
    fn lookup(&self, name: &str) -> Result<&FormattableValue, Diagnostic> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| {
                Diagnostic::new(
                    DiagnosticCode::MissingArgument,
                    format!("no value bound to argument '{name}'"),
                )
            })
    }

    /// `pound` is the number `#` stands for in plural sub-messages
    fn message(
        &self,
        message: &[Part],
        pound: Option<&FormattableValue>,
        out: &mut String,
    ) -> Result<(), Diagnostic> {
        for part in message {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Pound => match pound {
                    Some(value) => out.push_str(&self.number(value)?),
                    None => out.push('#'),
                },
                Part::Placeholder(placeholder) => {
                    let value = self.lookup(&placeholder.name)?;
                    self.placeholder(&placeholder.format, value, out)?;
                }
            }
        }
        Ok(())
    }

    fn placeholder(
        &self,
        format: &ArgumentFormat,
        value: &FormattableValue,
        out: &mut String,
    ) -> Result<(), Diagnostic> {
        match format {
            ArgumentFormat::Simple => match value {
                FormattableValue::Text(text) => out.push_str(text),
                FormattableValue::InstantMillis(_) => {
                    out.push_str(&datetime::format_date_time(value)?)
                }
                _ => out.push_str(&self.number(value)?),
            },
            ArgumentFormat::Number(style) => {
                out.push_str(&self.template.numbers.format(value, style)?)
            }
            ArgumentFormat::Date(length) => out.push_str(&datetime::format_date(value, *length)?),
            ArgumentFormat::Time(length) => out.push_str(&datetime::format_time(value, *length)?),
            ArgumentFormat::Plural(block) => {
                self.plural(block, &self.template.cardinal, value, out)?
            }
            ArgumentFormat::SelectOrdinal(block) => {
                self.plural(block, &self.template.ordinal, value, out)?
            }
            ArgumentFormat::Select(block) => {
                let key = value.as_text().ok_or_else(|| mismatch(value, "text"))?;
                if let Some(message) = block.case(key) {
                    self.message(message, None, out)?;
                }
            }
        }
        Ok(())
    }

    fn number(&self, value: &FormattableValue) -> Result<String, Diagnostic> {
        self.template
            .numbers
            .format(value, &ast::NumberStyle::Default)
    }

    fn plural(
        &self,
        block: &PluralBlock,
        rules: &PluralRules,
        value: &FormattableValue,
        out: &mut String,
    ) -> Result<(), Diagnostic> {
        let exact = as_f64(value).ok_or_else(|| mismatch(value, "a number"))?;
        let remainder = shifted(value, block.offset)?;

        let explicit = block.cases.iter().find_map(|(selector, message)| match selector {
            PluralSelector::Exact(wanted) if *wanted == exact => Some(message),
            _ => None,
        });

        let message = match explicit {
            Some(message) => message,
            None => {
                let category = match Number::from_value(&remainder)? {
                    Number::Finite(decimal) => rules.category_for(&decimal),
                    _ => PluralCategory::Other,
                };
                block
                    .cases
                    .iter()
                    .find_map(|(selector, message)| {
                        (*selector == PluralSelector::Category(category)).then_some(message)
                    })
                    .or_else(|| block.other())
                    .ok_or_else(|| {
                        Diagnostic::new(DiagnosticCode::Internal, "plural without 'other' case")
                    })?
            }
        };

        self.message(message, Some(&remainder), out)
    }
}
