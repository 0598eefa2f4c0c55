//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Segment;
use std::io::Write;

/// Markdown formatter - numbered list of segments followed by a total
///
/// Whitespace-only segments are not listed. Text that markdown would read as
/// markup at the start of a list item is escaped.
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    listed: usize,
    offsets: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            listed: 0,
            offsets: false,
        }
    }

    /// Append each segment's `start..end` range as inline code
    pub fn with_offsets(mut self, offsets: bool) -> Self {
        self.offsets = offsets;
        self
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        let leading = i == 0 && matches!(c, '#' | '>' | '-' | '+' | '=');
        if leading || matches!(c, '*' | '_' | '`' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_segment(&mut self, segment: &Segment) -> Result<()> {
        if segment.is_whitespace() {
            return Ok(());
        }
        self.listed += 1;
        write!(self.writer, "{}. {}", self.listed, escape(segment.text.trim()))?;
        if self.offsets {
            write!(self.writer, " `{}..{}`", segment.start, segment.end)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total segments: {}*", self.listed)?;
        self.writer.flush()?;
        Ok(())
    }
}
