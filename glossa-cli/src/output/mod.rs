//! Output formatting module

use anyhow::Result;
use glossa_api::Segment;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single segment
    fn format_segment(&mut self, segment: &Segment) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatKind {
    /// Plain text with one segment per line
    Text,
    /// JSON array of segments with offsets
    Json,
    /// Markdown numbered list
    Markdown,
}

impl FormatKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Text => "text",
            FormatKind::Json => "json",
            FormatKind::Markdown => "markdown",
        }
    }

    /// Short description for `list formats`
    pub fn description(&self) -> &'static str {
        match self {
            FormatKind::Text => "One segment per line",
            FormatKind::Json => "JSON array of {text, start, end}",
            FormatKind::Markdown => "Numbered markdown list with a total",
        }
    }

    /// All formats
    pub fn all() -> [FormatKind; 3] {
        [FormatKind::Text, FormatKind::Json, FormatKind::Markdown]
    }

    /// Create a formatter writing to `writer`
    pub fn formatter<W: Write + Send + Sync + 'static>(
        self,
        writer: W,
        options: FormatOptions,
    ) -> Box<dyn OutputFormatter> {
        match self {
            FormatKind::Text => Box::new(TextFormatter::new(writer).with_offsets(options.offsets)),
            FormatKind::Json => Box::new(JsonFormatter::new(writer).pretty(options.pretty_json)),
            FormatKind::Markdown => {
                Box::new(MarkdownFormatter::new(writer).with_offsets(options.offsets))
            }
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(FormatKind::Text),
            "json" => Ok(FormatKind::Json),
            "markdown" | "md" => Ok(FormatKind::Markdown),
            other => anyhow::bail!("Unknown output format '{other}' (expected text, json or markdown)"),
        }
    }
}

/// Per-run formatter switches
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Prefix text lines with their UTF-16 offsets
    pub offsets: bool,
    /// Indent JSON output
    pub pretty_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kind_parsing() {
        assert_eq!("JSON".parse::<FormatKind>().unwrap(), FormatKind::Json);
        assert_eq!("md".parse::<FormatKind>().unwrap(), FormatKind::Markdown);
        assert!("yaml".parse::<FormatKind>().is_err());
        for kind in FormatKind::all() {
            assert_eq!(kind.as_str().parse::<FormatKind>().unwrap(), kind);
        }
    }
}
