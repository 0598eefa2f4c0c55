//! Name/value marshalling for template rendering

use super::coercer::{Argument, ArgumentValue, ValueCoercer};
use super::value::FormattableValue;
use crate::error::{CoreError, Result};
use std::borrow::Cow;

/// Map key that may or may not be text
pub trait ArgumentKey {
    /// Key text, or `None` when the key is not textual
    fn key_text(&self) -> Option<Cow<'_, str>>;

    /// Name used in key-type errors
    fn key_type_name(&self) -> &str;
}

impl ArgumentKey for str {
    fn key_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
    fn key_type_name(&self) -> &str {
        "str"
    }
}

impl ArgumentKey for String {
    fn key_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
    fn key_type_name(&self) -> &str {
        "String"
    }
}

impl ArgumentKey for Cow<'_, str> {
    fn key_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
    fn key_type_name(&self) -> &str {
        "str"
    }
}

impl ArgumentKey for Argument {
    fn key_text(&self) -> Option<Cow<'_, str>> {
        self.text().map(Cow::Borrowed)
    }
    fn key_type_name(&self) -> &str {
        self.type_name()
    }
}

impl<K: ArgumentKey + ?Sized> ArgumentKey for &K {
    fn key_text(&self) -> Option<Cow<'_, str>> {
        (**self).key_text()
    }
    fn key_type_name(&self) -> &str {
        (**self).key_type_name()
    }
}

/// Index-aligned argument names and coerced values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentTable {
    names: Vec<String>,
    values: Vec<FormattableValue>,
}

impl ArgumentTable {
    /// Build a table from map entries
    ///
    /// The entry count reported by the iterator is captured up front and
    /// exactly that many slots are allocated. Yielding more entries than
    /// announced fails with [`CoreError::ConcurrentModification`]. Any key
    /// or value failure aborts the whole build.
    pub fn build<I, K, V>(entries: I, coercer: &ValueCoercer) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: ArgumentKey,
        V: ArgumentValue,
    {
        let entries = entries.into_iter();
        let expected = entries.len();
        let mut names = Vec::with_capacity(expected);
        let mut values = Vec::with_capacity(expected);

        for (key, value) in entries {
            if names.len() == expected {
                return Err(CoreError::ConcurrentModification { expected });
            }

            let name = key
                .key_text()
                .ok_or_else(|| CoreError::KeyType {
                    type_name: key.key_type_name().to_string(),
                })?
                .into_owned();

            let value = coercer
                .coerce(&value)
                .map_err(|cause| CoreError::Coercion {
                    key: name.clone(),
                    cause,
                })?;

            names.push(name);
            values.push(value);
        }

        Ok(Self { names, values })
    }

    /// Argument names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Coerced values, aligned with [`names`](Self::names)
    pub fn values(&self) -> &[FormattableValue] {
        &self.values
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Value bound to `name`
    pub fn get(&self, name: &str) -> Option<&FormattableValue> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| &self.values[index])
    }

    /// Iterate `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormattableValue)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}
