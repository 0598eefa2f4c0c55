//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Segment;
use std::io::{self, Write};

/// Plain text formatter - outputs one segment per line
///
/// Whitespace-only segments are skipped and surrounding whitespace is
/// trimmed. With offsets enabled each line starts with `start\tend\t`.
pub struct TextFormatter<W: Write> {
    writer: W,
    offsets: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            offsets: false,
        }
    }

    /// Prefix each line with the segment's offsets
    pub fn with_offsets(mut self, offsets: bool) -> Self {
        self.offsets = offsets;
        self
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_segment(&mut self, segment: &Segment) -> Result<()> {
        if segment.is_whitespace() {
            return Ok(());
        }
        if self.offsets {
            write!(self.writer, "{}\t{}\t", segment.start, segment.end)?;
        }
        writeln!(self.writer, "{}", segment.text.trim())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_whitespace_and_trims() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_segment(&Segment::new("Hello. ", 0, 7)).unwrap();
        formatter.format_segment(&Segment::new("  ", 7, 9)).unwrap();
        formatter.format_segment(&Segment::new("Bye.", 9, 13)).unwrap();
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "Hello.\nBye.\n");
    }

    #[test]
    fn test_offsets_prefix() {
        let mut formatter = TextFormatter::new(Vec::new()).with_offsets(true);
        formatter.format_segment(&Segment::new("word", 3, 7)).unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "3\t7\tword\n");
    }
}
