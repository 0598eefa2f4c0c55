//! Public API for Glossa text segmentation and message formatting
//!
//! This crate wraps the core session types and the ICU4X-backed engine in a
//! small, stable surface.
//!
//! ```
//! use glossa_api::{Config, Segmenter};
//!
//! let segmenter = Segmenter::with_config(Config::sentences());
//! let output = segmenter.segment_text("One. Two.").unwrap();
//! assert_eq!(output.texts(), vec!["One. ", "Two."]);
//! ```

#![warn(missing_docs)]

pub mod args;
pub mod config;
pub mod dto;
pub mod error;

use dto::Metadata;
use error::Result;
use glossa_core::{
    ArgumentKey, ArgumentValue, CompiledMessage, Locale, MessageCompiler, SegmentationSession,
    ValueCoercer,
};
use glossa_engine::{IcuBoundaryAnalyzer, IcuMessageCompiler};
use std::time::Instant;

// Re-export key types
pub use args::{parse_argument, ArgumentType};
#[cfg(feature = "serde")]
pub use args::{argument_from_json, arguments_from_json};
pub use config::{Config, ConfigBuilder, TimeZoneMode};
pub use dto::{Input, Output, Segment};
pub use error::ApiError;
pub use glossa_core::{Argument, DecimalText, DiagnosticCode, SegmentKind};
pub use glossa_engine::{EngineConfig, LineStrictness, LineWordOption, WordModel};

/// Main entry point for text segmentation
#[derive(Debug, Clone)]
pub struct Segmenter {
    analyzer: IcuBoundaryAnalyzer,
    config: Config,
}

impl Segmenter {
    /// Word segmenter for English
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a segmenter with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            analyzer: IcuBoundaryAnalyzer::with_config(*config.engine()),
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open a session over `text`
    pub fn open(&self, text: impl Into<String>) -> Result<SegmentationSession> {
        Ok(SegmentationSession::create(
            &self.analyzer,
            self.config.locale(),
            self.config.kind(),
            text,
        )?)
    }

    /// Segment input and collect every segment with its offsets
    pub fn segment(&self, input: Input) -> Result<Output> {
        let start = Instant::now();

        let text = input.read_text()?;
        let total_bytes = text.len();
        let session = self.open(text)?;

        let segments: Vec<Segment> = session
            .independent_pairs()?
            .map(|(begin, end)| Segment::new(session.substring(begin, end), begin, end))
            .collect();

        let elapsed = start.elapsed();
        log::info!(
            "segmented {total_bytes} bytes into {} {} segments in {:?}",
            segments.len(),
            session.kind(),
            elapsed
        );

        let metadata = Metadata {
            locale: session.locale().name(),
            kind: session.kind().to_string(),
            total_bytes,
            total_utf16: session.utf16_len(),
            segment_count: segments.len(),
            processing_time_ms: elapsed.as_millis() as u64,
        };

        Ok(Output { segments, metadata })
    }

    /// Segment text directly (convenience method)
    pub fn segment_text(&self, text: &str) -> Result<Output> {
        self.segment(Input::from_text(text))
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled message pattern ready to format arguments
#[derive(Debug, Clone)]
pub struct MessageFormat {
    message: CompiledMessage,
    coercer: ValueCoercer,
}

impl MessageFormat {
    /// Compile `pattern` for a locale tag
    pub fn new(pattern: &str, locale_tag: &str) -> Result<Self> {
        let config = Config::builder().locale(locale_tag)?.build()?;
        Self::with_config(pattern, &config)
    }

    /// Compile `pattern` with the locale and time zone of `config`
    pub fn with_config(pattern: &str, config: &Config) -> Result<Self> {
        Self::with_compiler(&IcuMessageCompiler::new(), pattern, config)
    }

    /// Compile `pattern` through another compiler
    pub fn with_compiler(
        compiler: &dyn MessageCompiler,
        pattern: &str,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            message: CompiledMessage::compile(compiler, pattern, config.locale())?,
            coercer: config.time_zone().coercer(),
        })
    }

    /// Format with named arguments
    pub fn format<I, K, V>(&self, entries: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: ArgumentKey,
        V: ArgumentValue,
    {
        Ok(self.message.render(entries, &self.coercer)?)
    }

    /// Format with the members of a JSON object
    #[cfg(feature = "serde")]
    pub fn format_json(&self, arguments: &serde_json::Value) -> Result<String> {
        self.format(arguments_from_json(arguments)?)
    }

    /// Source pattern
    pub fn pattern(&self) -> &str {
        self.message.pattern()
    }

    /// Locale the pattern was compiled for
    pub fn locale(&self) -> &Locale {
        self.message.locale()
    }

    /// Names of the arguments the pattern references
    pub fn argument_names(&self) -> Vec<String> {
        self.message.argument_names()
    }
}

// Convenience functions

/// Segment text with a given kind and locale
pub fn segment_text(text: &str, kind: SegmentKind, locale_tag: &str) -> Result<Output> {
    Config::builder()
        .locale(locale_tag)?
        .kind(kind)
        .build_segmenter()?
        .segment_text(text)
}

/// Segment a file with default configuration
pub fn segment_file<P: AsRef<std::path::Path>>(path: P) -> Result<Output> {
    Segmenter::new().segment(Input::from_file(path.as_ref().to_path_buf()))
}

/// Compile and format a message in one step
pub fn format_message<I, K, V>(pattern: &str, locale_tag: &str, entries: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    I::IntoIter: ExactSizeIterator,
    K: ArgumentKey,
    V: ArgumentValue,
{
    MessageFormat::new(pattern, locale_tag)?.format(entries)
}
