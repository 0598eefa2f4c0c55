//! Configuration types for the engine

use crate::error::EngineError;
use icu_segmenter::options::{LineBreakStrictness, LineBreakWordOption};
use std::fmt;
use std::str::FromStr;

/// Model used for word breaks in scripts without spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordModel {
    /// LSTM where available, dictionary for Chinese and Japanese
    #[default]
    Auto,
    /// Dictionary for every complex script
    Dictionary,
    /// LSTM for every complex script
    Lstm,
}

/// Line breaking strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStrictness {
    /// Fewest restrictions, used for short lines
    Loose,
    /// Most common set of rules
    #[default]
    Normal,
    /// Most stringent rules
    Strict,
    /// Break between any two grapheme clusters
    Anywhere,
}

/// Line breaking behavior inside words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineWordOption {
    /// Customary rules
    #[default]
    Normal,
    /// Allow breaks inside words of non-CJK text
    BreakAll,
    /// Disallow breaks inside CJK words
    KeepAll,
}

impl WordModel {
    /// Option value as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            WordModel::Auto => "auto",
            WordModel::Dictionary => "dictionary",
            WordModel::Lstm => "lstm",
        }
    }
}

impl LineStrictness {
    /// Option value as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStrictness::Loose => "loose",
            LineStrictness::Normal => "normal",
            LineStrictness::Strict => "strict",
            LineStrictness::Anywhere => "anywhere",
        }
    }

    pub(crate) fn to_icu(self) -> LineBreakStrictness {
        match self {
            LineStrictness::Loose => LineBreakStrictness::Loose,
            LineStrictness::Normal => LineBreakStrictness::Normal,
            LineStrictness::Strict => LineBreakStrictness::Strict,
            LineStrictness::Anywhere => LineBreakStrictness::Anywhere,
        }
    }
}

impl LineWordOption {
    /// Option value as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            LineWordOption::Normal => "normal",
            LineWordOption::BreakAll => "break-all",
            LineWordOption::KeepAll => "keep-all",
        }
    }

    pub(crate) fn to_icu(self) -> LineBreakWordOption {
        match self {
            LineWordOption::Normal => LineBreakWordOption::Normal,
            LineWordOption::BreakAll => LineBreakWordOption::BreakAll,
            LineWordOption::KeepAll => LineBreakWordOption::KeepAll,
        }
    }
}

macro_rules! option_text {
    ($ty:ty, $name:literal, [$($variant:expr),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
                [$($variant),+]
                    .into_iter()
                    .find(|candidate| candidate.as_str() == wanted)
                    .ok_or_else(|| EngineError::InvalidOption {
                        option: $name,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_text!(WordModel, "word_model", [WordModel::Auto, WordModel::Dictionary, WordModel::Lstm]);
option_text!(
    LineStrictness,
    "line_strictness",
    [
        LineStrictness::Loose,
        LineStrictness::Normal,
        LineStrictness::Strict,
        LineStrictness::Anywhere
    ]
);
option_text!(
    LineWordOption,
    "line_word_option",
    [LineWordOption::Normal, LineWordOption::BreakAll, LineWordOption::KeepAll]
);

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Word break model for complex scripts
    pub word_model: WordModel,
    /// Line break strictness
    pub line_strictness: LineStrictness,
    /// Line break behavior inside words
    pub line_word_option: LineWordOption,
}

impl EngineConfig {
    /// Strict line breaking with dictionary word breaks
    pub fn strict() -> Self {
        Self {
            word_model: WordModel::Dictionary,
            line_strictness: LineStrictness::Strict,
            line_word_option: LineWordOption::KeepAll,
        }
    }

    /// Loose line breaking, suited to narrow columns
    pub fn loose() -> Self {
        Self {
            word_model: WordModel::Auto,
            line_strictness: LineStrictness::Loose,
            line_word_option: LineWordOption::BreakAll,
        }
    }

    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        assert_eq!("LSTM".parse::<WordModel>().unwrap(), WordModel::Lstm);
        assert_eq!(
            "keep_all".parse::<LineWordOption>().unwrap(),
            LineWordOption::KeepAll
        );
        assert_eq!(
            " anywhere ".parse::<LineStrictness>().unwrap(),
            LineStrictness::Anywhere
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "fuzzy".parse::<WordModel>().unwrap_err();
        assert_eq!(err.to_string(), "invalid value 'fuzzy' for word_model");
    }

    #[test]
    fn test_display_round_trips() {
        for option in [LineWordOption::Normal, LineWordOption::BreakAll, LineWordOption::KeepAll] {
            assert_eq!(option.to_string().parse::<LineWordOption>().unwrap(), option);
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(EngineConfig::balanced(), EngineConfig::default());
        assert_eq!(EngineConfig::strict().line_strictness, LineStrictness::Strict);
        assert_eq!(EngineConfig::loose().line_word_option, LineWordOption::BreakAll);
    }
}
