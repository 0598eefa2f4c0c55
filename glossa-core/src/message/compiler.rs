//! Message compilation collaborator seam

use super::coercer::{ArgumentValue, ValueCoercer};
use super::table::{ArgumentKey, ArgumentTable};
use super::value::FormattableValue;
use crate::error::{CoreError, Diagnostic, Result};
use crate::locale::Locale;
use std::fmt;
use std::sync::Arc;

/// Compiles message patterns for a locale
pub trait MessageCompiler: Send + Sync {
    /// Parse `pattern` and bind it to `locale`
    fn compile(
        &self,
        pattern: &str,
        locale: &Locale,
    ) -> std::result::Result<Arc<dyn CompiledTemplate>, Diagnostic>;
}

/// Parsed, locale-bound pattern
///
/// Rendering only reads the template, so one template may be shared by many
/// threads.
pub trait CompiledTemplate: Send + Sync {
    /// Render with index-aligned names and values
    fn render(
        &self,
        names: &[String],
        values: &[FormattableValue],
    ) -> std::result::Result<String, Diagnostic>;

    /// Names of the arguments the pattern references, in first-use order
    fn argument_names(&self) -> Vec<String>;
}

/// A compiled template with its source pattern and locale
#[derive(Clone)]
pub struct CompiledMessage {
    pattern: String,
    locale: Locale,
    template: Arc<dyn CompiledTemplate>,
}

impl CompiledMessage {
    /// Compile `pattern` for `locale`
    pub fn compile(compiler: &dyn MessageCompiler, pattern: &str, locale: &Locale) -> Result<Self> {
        let template = compiler
            .compile(pattern, locale)
            .map_err(CoreError::PatternSyntax)?;
        log::debug!("compiled message pattern for locale {locale}");
        Ok(Self {
            pattern: pattern.to_string(),
            locale: locale.clone(),
            template,
        })
    }

    /// Coerce `entries` and render
    pub fn render<I, K, V>(&self, entries: I, coercer: &ValueCoercer) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: ArgumentKey,
        V: ArgumentValue,
    {
        let table = ArgumentTable::build(entries, coercer)?;
        self.render_table(&table)
    }

    /// Render an already built table
    pub fn render_table(&self, table: &ArgumentTable) -> Result<String> {
        self.template
            .render(table.names(), table.values())
            .map_err(CoreError::Render)
    }

    /// Source pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Locale the pattern was compiled for
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Names of the arguments the pattern references
    pub fn argument_names(&self) -> Vec<String> {
        self.template.argument_names()
    }
}

impl fmt::Debug for CompiledMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMessage")
            .field("pattern", &self.pattern)
            .field("locale", &self.locale.name())
            .finish()
    }
}
