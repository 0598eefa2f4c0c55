//! ICU4X boundary analysis
//!
//! Each cursor owns (a shared handle to) one segmenter. Binding a buffer runs
//! the segmenter over it once and keeps the resulting break offsets, so
//! advancing is a lookup and forking is a cheap clone of two `Arc`s.

use crate::config::{EngineConfig, WordModel};
use crate::error::data_diagnostic;
use glossa_core::{BoundaryAnalyzer, BoundaryCursor, Diagnostic, Locale, SegmentKind};
use icu_locale_core::LanguageIdentifier;
use icu_segmenter::options::{LineBreakOptions, SentenceBreakOptions, WordBreakOptions};
use icu_segmenter::{
    GraphemeClusterSegmenter, GraphemeClusterSegmenterBorrowed, LineSegmenter,
    LineSegmenterBorrowed, SentenceSegmenter, WordSegmenter,
};
use std::fmt;
use std::sync::Arc;

/// Segmenter for one boundary kind
pub enum Breaker {
    /// Extended grapheme clusters
    Character(GraphemeClusterSegmenterBorrowed<'static>),
    /// Words
    Word(WordSegmenter),
    /// Line break opportunities
    Line(LineSegmenterBorrowed<'static>),
    /// Sentences
    Sentence(SentenceSegmenter),
}

impl Breaker {
    /// Build the segmenter for `kind` tailored to `langid`
    pub fn new(
        kind: SegmentKind,
        langid: &LanguageIdentifier,
        config: &EngineConfig,
    ) -> Result<Self, Diagnostic> {
        let content_locale = (*langid != LanguageIdentifier::UNKNOWN).then_some(langid);

        match kind {
            SegmentKind::Character => Ok(Breaker::Character(GraphemeClusterSegmenter::new())),
            SegmentKind::Word => {
                let mut options = WordBreakOptions::default();
                options.content_locale = content_locale;
                let segmenter = match config.word_model {
                    WordModel::Auto => WordSegmenter::try_new_auto(options),
                    WordModel::Dictionary => WordSegmenter::try_new_dictionary(options),
                    WordModel::Lstm => WordSegmenter::try_new_lstm(options),
                }
                .map_err(|err| data_diagnostic("word segmenter", err))?;
                Ok(Breaker::Word(segmenter))
            }
            SegmentKind::Line => {
                let mut options = LineBreakOptions::default();
                options.strictness = Some(config.line_strictness.to_icu());
                options.word_option = Some(config.line_word_option.to_icu());
                options.content_locale = content_locale;
                let segmenter = match config.word_model {
                    WordModel::Auto => LineSegmenter::new_auto(options),
                    WordModel::Dictionary => LineSegmenter::new_dictionary(options),
                    WordModel::Lstm => LineSegmenter::new_lstm(options),
                };
                Ok(Breaker::Line(segmenter))
            }
            SegmentKind::Sentence => {
                let mut options = SentenceBreakOptions::default();
                options.content_locale = content_locale;
                let segmenter = SentenceSegmenter::try_new(options)
                    .map_err(|err| data_diagnostic("sentence segmenter", err))?;
                Ok(Breaker::Sentence(segmenter))
            }
        }
    }

    /// Break offsets after position 0, ending at `text.len()`
    pub fn breaks(&self, text: &[u16]) -> Vec<usize> {
        if text.is_empty() {
            return Vec::new();
        }
        let all: Vec<usize> = match self {
            Breaker::Character(segmenter) => segmenter.segment_utf16(text).collect(),
            Breaker::Word(segmenter) => segmenter.as_borrowed().segment_utf16(text).collect(),
            Breaker::Line(segmenter) => segmenter.segment_utf16(text).collect(),
            Breaker::Sentence(segmenter) => segmenter.as_borrowed().segment_utf16(text).collect(),
        };
        all.into_iter().filter(|&offset| offset > 0).collect()
    }

    fn kind(&self) -> SegmentKind {
        match self {
            Breaker::Character(_) => SegmentKind::Character,
            Breaker::Word(_) => SegmentKind::Word,
            Breaker::Line(_) => SegmentKind::Line,
            Breaker::Sentence(_) => SegmentKind::Sentence,
        }
    }
}

impl fmt::Debug for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Breaker::{:?}(...)", self.kind())
    }
}

/// Cursor over breaks computed when the buffer is bound
#[derive(Debug, Clone)]
pub struct PrecomputedCursor {
    breaker: Arc<Breaker>,
    breaks: Arc<[usize]>,
    index: usize,
}

impl PrecomputedCursor {
    /// Unbound cursor driven by `breaker`
    pub fn new(breaker: Breaker) -> Self {
        Self {
            breaker: Arc::new(breaker),
            breaks: Arc::from(Vec::new()),
            index: 0,
        }
    }

    /// Remaining boundaries after the current position
    pub fn remaining(&self) -> usize {
        self.breaks.len() - self.index
    }
}

impl BoundaryCursor for PrecomputedCursor {
    fn bind(&mut self, text: Arc<[u16]>) {
        self.breaks = Arc::from(self.breaker.breaks(&text));
        self.index = 0;
        log::trace!(
            "bound {:?} cursor to {} code units, {} breaks",
            self.breaker.kind(),
            text.len(),
            self.breaks.len()
        );
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn advance(&mut self) -> Option<usize> {
        let next = self.breaks.get(self.index).copied()?;
        self.index += 1;
        Some(next)
    }

    fn position(&self) -> usize {
        self.index
            .checked_sub(1)
            .and_then(|last| self.breaks.get(last).copied())
            .unwrap_or(0)
    }

    fn fork(&self) -> Option<Box<dyn BoundaryCursor>> {
        let mut forked = self.clone();
        forked.index = 0;
        Some(Box::new(forked))
    }
}

/// Boundary analyzer backed by ICU4X compiled data
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuBoundaryAnalyzer {
    config: EngineConfig,
}

impl IcuBoundaryAnalyzer {
    /// Analyzer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with explicit options
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Options in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl BoundaryAnalyzer for IcuBoundaryAnalyzer {
    fn create(
        &self,
        kind: SegmentKind,
        locale: &Locale,
    ) -> Result<Box<dyn BoundaryCursor>, Diagnostic> {
        let breaker = Breaker::new(kind, locale.language_identifier(), &self.config)?;
        log::debug!("created {kind} breaker for {locale}");
        Ok(Box::new(PrecomputedCursor::new(breaker)))
    }
}
