//! Text boundary segmentation
//!
//! A [`SegmentationSession`] owns one bound [`BoundaryCursor`] and the UTF-16
//! buffer it walks. Iterators handed out by the session either share that
//! cursor (serialized by a per-session lock) or fork a private one.

mod analyzer;
mod session;

pub use analyzer::{BoundaryAnalyzer, BoundaryCursor};
pub use session::{
    BoundaryPairIterator, IndependentPairIterator, IndependentTextIterator, SegmentTextIterator,
    SegmentationSession,
};

use std::fmt;
use std::str::FromStr;

/// Kind of boundary to segment on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentKind {
    /// Extended grapheme clusters
    Character,
    /// Words, punctuation and whitespace runs
    #[default]
    Word,
    /// Line break opportunities
    Line,
    /// Sentences
    Sentence,
}

impl SegmentKind {
    /// All kinds, in declaration order
    pub fn all() -> [SegmentKind; 4] {
        [
            SegmentKind::Character,
            SegmentKind::Word,
            SegmentKind::Line,
            SegmentKind::Sentence,
        ]
    }

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::Character => "character",
            SegmentKind::Word => "word",
            SegmentKind::Line => "line",
            SegmentKind::Sentence => "sentence",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" | "char" | "grapheme" => Ok(SegmentKind::Character),
            "word" => Ok(SegmentKind::Word),
            "line" => Ok(SegmentKind::Line),
            "sentence" => Ok(SegmentKind::Sentence),
            other => Err(format!("unknown segment kind: {other}")),
        }
    }
}
