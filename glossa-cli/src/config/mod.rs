//! Configuration module

use anyhow::{Context, Result};
use glossa_api::{
    Config, LineStrictness, LineWordOption, SegmentKind, TimeZoneMode, WordModel,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::output::FormatKind;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Segmentation configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Message formatting configuration
    #[serde(default)]
    pub message: MessageConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Segmentation-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Locale tag used to tailor break rules
    pub locale: String,

    /// Segment kind: character, word, line or sentence
    pub kind: String,

    /// Word break model: auto, dictionary or lstm
    pub word_model: String,

    /// Line break strictness: loose, normal, strict or anywhere
    pub line_strictness: String,

    /// Line breaking inside words: normal, break-all or keep-all
    pub line_word_option: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            kind: SegmentKind::Word.to_string(),
            word_model: WordModel::default().to_string(),
            line_strictness: LineStrictness::default().to_string(),
            line_word_option: LineWordOption::default().to_string(),
        }
    }
}

/// Message-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Default locale for message patterns
    pub locale: String,

    /// Zone for date-times without an offset: utc or local
    pub time_zone: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            time_zone: TimeZoneMode::default().to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every value, reporting the first invalid one
    pub fn validate(&self) -> Result<()> {
        self.segmentation_config(None, None)?;
        self.message_config(None, false)?;
        self.output_format()?;
        Ok(())
    }

    /// Segmentation settings with command line overrides applied
    pub fn segmentation_config(&self, locale: Option<&str>, kind: Option<&str>) -> Result<Config> {
        let seg = &self.segmentation;
        let locale = locale.unwrap_or(&seg.locale);
        let kind: SegmentKind = kind
            .unwrap_or(&seg.kind)
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid segmentation kind")?;
        let word_model: WordModel = seg.word_model.parse()?;
        let line_strictness: LineStrictness = seg.line_strictness.parse()?;
        let line_word_option: LineWordOption = seg.line_word_option.parse()?;

        let config = Config::builder()
            .locale(locale)
            .with_context(|| format!("Invalid segmentation locale '{locale}'"))?
            .kind(kind)
            .word_model(word_model)
            .line_strictness(line_strictness)
            .line_word_option(line_word_option)
            .build()?;
        Ok(config)
    }

    /// Message settings with command line overrides applied
    pub fn message_config(&self, locale: Option<&str>, local_time: bool) -> Result<Config> {
        let locale = locale.unwrap_or(&self.message.locale);
        let time_zone = if local_time {
            TimeZoneMode::Local
        } else {
            self.message.time_zone.parse()?
        };

        let config = Config::builder()
            .locale(locale)
            .with_context(|| format!("Invalid message locale '{locale}'"))?
            .time_zone(time_zone)
            .build()?;
        Ok(config)
    }

    /// Output format named in the `[output]` section
    pub fn output_format(&self) -> Result<FormatKind> {
        self.output.format.parse()
    }

    /// Commented template with every default spelled out
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r#"# Glossa configuration

[segmentation]
# Locale tag (ICU style en_GB or BCP-47 en-GB)
locale = "{locale}"
# character | word | line | sentence
kind = "{kind}"
# auto | dictionary | lstm
word_model = "{word_model}"
# loose | normal | strict | anywhere (line segmentation only)
line_strictness = "{line_strictness}"
# normal | break-all | keep-all (line segmentation only)
line_word_option = "{line_word_option}"

[message]
# Locale for number, plural and date rules
locale = "{message_locale}"
# utc | local; zone for date-times written without an offset
time_zone = "{time_zone}"

[output]
# text | json | markdown
format = "{format}"
pretty_json = {pretty_json}
"#,
            locale = defaults.segmentation.locale,
            kind = defaults.segmentation.kind,
            word_model = defaults.segmentation.word_model,
            line_strictness = defaults.segmentation.line_strictness,
            line_word_option = defaults.segmentation.line_word_option,
            message_locale = defaults.message.locale,
            time_zone = defaults.message.time_zone,
            format = defaults.output.format,
            pretty_json = defaults.output.pretty_json,
        )
    }
}
