//! High-level configuration API

use crate::error::{ApiError, Result};
use crate::Segmenter;
use glossa_core::{Locale, LocalTimeline, SegmentKind, Timeline, UtcTimeline, ValueCoercer};
use glossa_engine::{EngineConfig, LineStrictness, LineWordOption, WordModel};
use icu_locale_core::langid;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Time zone used to place naive date-times on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneMode {
    /// Naive values are UTC
    #[default]
    Utc,
    /// Naive values are in the system time zone
    Local,
}

impl TimeZoneMode {
    /// Coercer that places naive values in this zone
    pub fn coercer(self) -> ValueCoercer {
        let timeline: Arc<dyn Timeline> = match self {
            TimeZoneMode::Utc => Arc::new(UtcTimeline),
            TimeZoneMode::Local => Arc::new(LocalTimeline),
        };
        ValueCoercer::new(timeline)
    }
}

impl fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneMode::Utc => f.write_str("utc"),
            TimeZoneMode::Local => f.write_str("local"),
        }
    }
}

impl FromStr for TimeZoneMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(TimeZoneMode::Utc),
            "local" => Ok(TimeZoneMode::Local),
            other => Err(ApiError::Config(format!(
                "unknown time zone mode '{other}' (expected utc or local)"
            ))),
        }
    }
}

/// High-level configuration for segmentation and formatting
#[derive(Debug, Clone)]
pub struct Config {
    locale: Locale,
    kind: SegmentKind,
    engine: EngineConfig,
    time_zone: TimeZoneMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::from(langid!("en")),
            kind: SegmentKind::Word,
            engine: EngineConfig::default(),
            time_zone: TimeZoneMode::Utc,
        }
    }
}

impl Config {
    fn preset(kind: SegmentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Grapheme cluster segmentation
    pub fn characters() -> Self {
        Self::preset(SegmentKind::Character)
    }

    /// Word segmentation
    pub fn words() -> Self {
        Self::preset(SegmentKind::Word)
    }

    /// Line break opportunities
    pub fn lines() -> Self {
        Self::preset(SegmentKind::Line)
    }

    /// Sentence segmentation
    pub fn sentences() -> Self {
        Self::preset(SegmentKind::Sentence)
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Locale for analyzers and messages
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Segmentation kind
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Engine options
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Time zone for naive date-times
    pub fn time_zone(&self) -> TimeZoneMode {
        self.time_zone
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the locale from an ICU or BCP-47 tag
    pub fn locale(mut self, tag: &str) -> Result<Self> {
        self.config.locale = Locale::from_tag(tag)?;
        Ok(self)
    }

    /// Set the segmentation kind
    pub fn kind(mut self, kind: SegmentKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Set the word break model
    pub fn word_model(mut self, model: WordModel) -> Self {
        self.config.engine.word_model = model;
        self
    }

    /// Set line break strictness
    pub fn line_strictness(mut self, strictness: LineStrictness) -> Self {
        self.config.engine.line_strictness = strictness;
        self
    }

    /// Set line breaking inside words
    pub fn line_word_option(mut self, option: LineWordOption) -> Self {
        self.config.engine.line_word_option = option;
        self
    }

    /// Replace all engine options
    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    /// Set the time zone for naive date-times
    pub fn time_zone(mut self, time_zone: TimeZoneMode) -> Self {
        self.config.time_zone = time_zone;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let defaults = EngineConfig::default();
        let engine = &self.config.engine;
        let line_options_changed = engine.line_strictness != defaults.line_strictness
            || engine.line_word_option != defaults.line_word_option;
        if line_options_changed && self.config.kind != SegmentKind::Line {
            log::warn!(
                "line break options have no effect on {} segmentation",
                self.config.kind
            );
        }
        Ok(self.config)
    }

    /// Build a segmenter directly
    pub fn build_segmenter(self) -> Result<Segmenter> {
        Ok(Segmenter::with_config(self.build()?))
    }
}
