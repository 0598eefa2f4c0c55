//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Segment;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs segments as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    segments: Vec<SegmentData>,
    pretty: bool,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentData {
    /// The segment text, untrimmed
    pub text: String,
    /// Starting UTF-16 offset in the original text
    pub start: usize,
    /// Ending UTF-16 offset, exclusive
    pub end: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            segments: Vec::new(),
            pretty: true,
        }
    }

    /// Toggle indented output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_segment(&mut self, segment: &Segment) -> Result<()> {
        self.segments.push(SegmentData {
            text: segment.text.clone(),
            start: segment.start,
            end: segment.end,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.segments)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.segments)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_every_segment() {
        let mut formatter = JsonFormatter::new(Vec::new()).pretty(false);
        formatter.format_segment(&Segment::new("Hi", 0, 2)).unwrap();
        formatter.format_segment(&Segment::new(" ", 2, 3)).unwrap();
        formatter.finish().unwrap();

        let parsed: Vec<SegmentData> = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].text, " ");
        assert_eq!((parsed[1].start, parsed[1].end), (2, 3));
    }
}
