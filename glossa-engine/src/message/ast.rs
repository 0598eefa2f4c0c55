//! Parsed message patterns

use icu_plurals::PluralCategory;

/// Sequence of pattern parts
pub type Message = Vec<Part>;

/// One piece of a message
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Literal text, quoting already resolved
    Literal(String),
    /// `#` inside a plural or selectordinal sub-message
    Pound,
    /// `{name, ...}`
    Placeholder(Placeholder),
}

/// A named argument and how to format it
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Argument name
    pub name: String,
    /// Formatting
    pub format: ArgumentFormat,
}

/// Argument type with its style
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentFormat {
    /// `{name}`
    Simple,
    /// `{name, number[, style]}`
    Number(NumberStyle),
    /// `{name, date[, style]}`
    Date(DateLength),
    /// `{name, time[, style]}`
    Time(DateLength),
    /// `{name, plural, ...}`
    Plural(PluralBlock),
    /// `{name, selectordinal, ...}`
    SelectOrdinal(PluralBlock),
    /// `{name, select, ...}`
    Select(SelectBlock),
}

/// Number style
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumberStyle {
    /// Default rendering for the value's kind
    #[default]
    Default,
    /// Rounded to a whole number
    Integer,
    /// Multiplied by 100 with a percent sign
    Percent,
    /// Decimal pattern such as `#,##0.00`
    Pattern(DecimalPattern),
}

/// Digit rules read from a decimal pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalPattern {
    /// Text before the digits
    pub prefix: String,
    /// Text after the digits
    pub suffix: String,
    /// Zero padded integer digits
    pub min_integer: u8,
    /// Zero padded fraction digits
    pub min_fraction: u8,
    /// Fraction digits kept before rounding
    pub max_fraction: u8,
    /// Whether the pattern groups thousands
    pub grouping: bool,
    /// Whether the value is scaled by 100
    pub percent: bool,
}

/// Date and time lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLength {
    /// `15/01/2024`, `14:30`
    Short,
    /// `15 Jan 2024`, `14:30:00`
    #[default]
    Medium,
    /// `15 January 2024`, `14:30:00 UTC`
    Long,
    /// `Monday, 15 January 2024`
    Full,
}

/// Plural or ordinal cases
#[derive(Debug, Clone, PartialEq)]
pub struct PluralBlock {
    /// Subtracted before category selection and `#`
    pub offset: i64,
    /// Cases in pattern order
    pub cases: Vec<(PluralSelector, Message)>,
}

/// Plural case key
#[derive(Debug, Clone, PartialEq)]
pub enum PluralSelector {
    /// `=N`, matched against the value before the offset
    Exact(f64),
    /// Plural category keyword
    Category(PluralCategory),
}

/// Select cases
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBlock {
    /// Cases in pattern order, `other` included
    pub cases: Vec<(String, Message)>,
}

impl PluralBlock {
    /// Message for the `other` keyword
    pub fn other(&self) -> Option<&Message> {
        self.cases.iter().find_map(|(selector, message)| {
            matches!(selector, PluralSelector::Category(PluralCategory::Other)).then_some(message)
        })
    }
}

impl SelectBlock {
    /// Message for `key`, falling back to `other`
    pub fn case(&self, key: &str) -> Option<&Message> {
        self.cases
            .iter()
            .find(|(candidate, _)| candidate == key)
            .or_else(|| self.cases.iter().find(|(candidate, _)| candidate == "other"))
            .map(|(_, message)| message)
    }
}

/// Argument names in first-use order, nested messages included
pub fn argument_names(message: &[Part]) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(message, &mut names);
    names
}

fn collect_names(message: &[Part], names: &mut Vec<String>) {
    for part in message {
        let Part::Placeholder(placeholder) = part else {
            continue;
        };
        if !names.contains(&placeholder.name) {
            names.push(placeholder.name.clone());
        }
        match &placeholder.format {
            ArgumentFormat::Plural(block) | ArgumentFormat::SelectOrdinal(block) => {
                for (_, nested) in &block.cases {
                    collect_names(nested, names);
                }
            }
            ArgumentFormat::Select(block) => {
                for (_, nested) in &block.cases {
                    collect_names(nested, names);
                }
            }
            _ => {}
        }
    }
}
