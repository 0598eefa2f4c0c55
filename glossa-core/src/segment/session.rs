//! Segmentation session and its iteration views

use super::{BoundaryAnalyzer, BoundaryCursor, SegmentKind};
use crate::error::{CoreError, Result};
use crate::locale::Locale;
use parking_lot::Mutex;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

struct SessionInner {
    kind: SegmentKind,
    locale: Locale,
    text: String,
    buffer: Arc<[u16]>,
    cursor: Mutex<Box<dyn BoundaryCursor>>,
}

impl SessionInner {
    fn extract(&self, start: usize, end: usize) -> String {
        extract(&self.buffer, start, end)
    }
}

fn extract(buffer: &[u16], start: usize, end: usize) -> String {
    buffer
        .get(start..end)
        .map(String::from_utf16_lossy)
        .unwrap_or_default()
}

/// One text bound to one boundary cursor
///
/// Cloning the session clones the handle, not the cursor: all clones and
/// every iterator from [`begin_pairs`](Self::begin_pairs) or
/// [`begin_text`](Self::begin_text) drive the same shared cursor. Starting a
/// new shared traversal rewinds that cursor for everyone; run one shared
/// traversal at a time, or use the `independent_*` views.
#[derive(Clone)]
pub struct SegmentationSession {
    inner: Arc<SessionInner>,
}

impl SegmentationSession {
    /// Create a session for `text`
    ///
    /// Builds the cursor through `analyzer`, binds it to the UTF-16 form of
    /// `text` and rewinds it to position 0.
    pub fn create(
        analyzer: &dyn BoundaryAnalyzer,
        locale: &Locale,
        kind: SegmentKind,
        text: impl Into<String>,
    ) -> Result<Self> {
        let text = text.into();
        let mut cursor =
            analyzer
                .create(kind, locale)
                .map_err(|diagnostic| CoreError::AnalyzerConstruction {
                    kind: kind.to_string(),
                    diagnostic,
                })?;

        let buffer: Arc<[u16]> = text.encode_utf16().collect();
        cursor.bind(Arc::clone(&buffer));
        cursor.reset();

        log::debug!(
            "created {kind} session for locale {locale} ({} code units)",
            buffer.len()
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                kind,
                locale: locale.clone(),
                text,
                buffer,
                cursor: Mutex::new(cursor),
            }),
        })
    }

    /// Rewind the shared cursor and iterate `(start, end)` offsets
    pub fn begin_pairs(&self) -> BoundaryPairIterator {
        self.rewind();
        BoundaryPairIterator {
            session: Arc::clone(&self.inner),
            progress: Progress::default(),
        }
    }

    /// Rewind the shared cursor and iterate segment substrings
    pub fn begin_text(&self) -> SegmentTextIterator {
        SegmentTextIterator {
            pairs: self.begin_pairs(),
        }
    }

    /// Iterate `(start, end)` offsets on a private cursor
    ///
    /// The returned iterator is unaffected by any other traversal of this
    /// session.
    pub fn independent_pairs(&self) -> Result<IndependentPairIterator> {
        let cursor = self
            .inner
            .cursor
            .lock()
            .fork()
            .ok_or_else(|| CoreError::CursorNotForkable {
                kind: self.inner.kind.to_string(),
            })?;

        Ok(IndependentPairIterator {
            cursor,
            progress: Progress::default(),
        })
    }

    /// Iterate segment substrings on a private cursor
    pub fn independent_text(&self) -> Result<IndependentTextIterator> {
        Ok(IndependentTextIterator {
            pairs: self.independent_pairs()?,
            buffer: Arc::clone(&self.inner.buffer),
        })
    }

    /// Original text
    pub fn text(&self) -> &str {
        &self.inner.text
    }

    /// Locale the cursor was built for
    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    /// Segmentation kind
    pub fn kind(&self) -> SegmentKind {
        self.inner.kind
    }

    /// Length of the text in UTF-16 code units
    pub fn utf16_len(&self) -> usize {
        self.inner.buffer.len()
    }

    /// Offset of the last boundary the shared cursor reported
    pub fn position(&self) -> usize {
        self.inner.cursor.lock().position()
    }

    /// Substring between two code unit offsets
    ///
    /// Out of range or reversed offsets yield an empty string.
    pub fn substring(&self, start: usize, end: usize) -> String {
        self.inner.extract(start, end)
    }

    fn rewind(&self) {
        self.inner.cursor.lock().reset();
    }
}

impl fmt::Debug for SegmentationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentationSession")
            .field("kind", &self.inner.kind)
            .field("text", &self.inner.text)
            .field("locale", &self.inner.locale.name())
            .finish()
    }
}

impl<'a> IntoIterator for &'a SegmentationSession {
    type Item = String;
    type IntoIter = SegmentTextIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.begin_text()
    }
}

/// Per-iterator bookkeeping on top of a cursor
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    last: usize,
    done: bool,
}

impl Progress {
    fn step(&mut self, advanced: Option<usize>) -> Option<(usize, usize)> {
        match advanced {
            Some(end) => {
                let start = self.last;
                self.last = end;
                Some((start, end))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// `(start, end)` offsets driven by the session's shared cursor
pub struct BoundaryPairIterator {
    session: Arc<SessionInner>,
    progress: Progress,
}

impl Iterator for BoundaryPairIterator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.progress.done {
            return None;
        }
        // Advance and read under one lock so concurrent callers never share a step
        let advanced = self.session.cursor.lock().advance();
        log::trace!("shared cursor advanced to {advanced:?}");
        self.progress.step(advanced)
    }
}

impl FusedIterator for BoundaryPairIterator {}

impl fmt::Debug for BoundaryPairIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryPairIterator")
            .field("last", &self.progress.last)
            .field("done", &self.progress.done)
            .finish()
    }
}

/// Segment substrings driven by the session's shared cursor
#[derive(Debug)]
pub struct SegmentTextIterator {
    pairs: BoundaryPairIterator,
}

impl Iterator for SegmentTextIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, end) = self.pairs.next()?;
        Some(self.pairs.session.extract(start, end))
    }
}

impl FusedIterator for SegmentTextIterator {}

/// `(start, end)` offsets on a private cursor
pub struct IndependentPairIterator {
    cursor: Box<dyn BoundaryCursor>,
    progress: Progress,
}

impl Iterator for IndependentPairIterator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.progress.done {
            return None;
        }
        let advanced = self.cursor.advance();
        self.progress.step(advanced)
    }
}

impl FusedIterator for IndependentPairIterator {}

impl fmt::Debug for IndependentPairIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndependentPairIterator")
            .field("last", &self.progress.last)
            .field("done", &self.progress.done)
            .finish()
    }
}

/// Segment substrings on a private cursor
#[derive(Debug)]
pub struct IndependentTextIterator {
    pairs: IndependentPairIterator,
    buffer: Arc<[u16]>,
}

impl Iterator for IndependentTextIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, end) = self.pairs.next()?;
        Some(extract(&self.buffer, start, end))
    }
}

impl FusedIterator for IndependentTextIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostic, DiagnosticCode};

    /// Breaks after every run of spaces
    struct SpaceAnalyzer {
        forkable: bool,
    }

    struct SpaceCursor {
        text: Arc<[u16]>,
        breaks: Vec<usize>,
        index: usize,
        forkable: bool,
    }

    impl BoundaryAnalyzer for SpaceAnalyzer {
        fn create(
            &self,
            kind: SegmentKind,
            locale: &Locale,
        ) -> std::result::Result<Box<dyn BoundaryCursor>, Diagnostic> {
            if locale.language() == "zz" {
                return Err(Diagnostic::new(
                    DiagnosticCode::MissingResource,
                    format!("no {kind} data"),
                ));
            }
            Ok(Box::new(SpaceCursor {
                text: Arc::from(Vec::new()),
                breaks: Vec::new(),
                index: 0,
                forkable: self.forkable,
            }))
        }
    }

    impl BoundaryCursor for SpaceCursor {
        fn bind(&mut self, text: Arc<[u16]>) {
            let space = u16::from(b' ');
            self.breaks = (1..text.len())
                .filter(|&i| text[i - 1] == space && text[i] != space)
                .chain(if text.is_empty() { None } else { Some(text.len()) })
                .collect();
            self.text = text;
            self.index = 0;
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
            match self.index {
                0 => 0,
                i => self.breaks[i - 1],
            }
        }

        fn fork(&self) -> Option<Box<dyn BoundaryCursor>> {
            if !self.forkable {
                return None;
            }
            Some(Box::new(SpaceCursor {
                text: Arc::clone(&self.text),
                breaks: self.breaks.clone(),
                index: 0,
                forkable: true,
            }))
        }
    }

    fn session(text: &str) -> SegmentationSession {
        let analyzer = SpaceAnalyzer { forkable: true };
        SegmentationSession::create(&analyzer, &Locale::root(), SegmentKind::Word, text).unwrap()
    }

    #[test]
    fn test_pairs_cover_text() {
        let session = session("one two  three");
        let pairs: Vec<_> = session.begin_pairs().collect();
        assert_eq!(pairs, vec![(0, 4), (4, 9), (9, 14)]);
    }

    #[test]
    fn test_text_matches_pairs() {
        let session = session("one two  three");
        let words: Vec<_> = session.begin_text().collect();
        assert_eq!(words, vec!["one ", "two  ", "three"]);
    }

    #[test]
    fn test_done_is_terminal() {
        let session = session("a b");
        let mut pairs = session.begin_pairs();
        assert_eq!(pairs.by_ref().count(), 2);
        assert_eq!(pairs.next(), None);
        assert_eq!(pairs.next(), None);
    }

    #[test]
    fn test_begin_rewinds_shared_cursor() {
        let session = session("a b c");
        let mut first = session.begin_pairs();
        assert_eq!(first.next(), Some((0, 2)));

        assert_eq!(session.position(), 2);

        let second: Vec<_> = session.begin_pairs().collect();
        assert_eq!(second, vec![(0, 2), (2, 4), (4, 5)]);
        assert_eq!(session.position(), 5);
        // The shared cursor is exhausted for the first iterator as well
        assert_eq!(first.next(), None);

        let _third = session.begin_pairs();
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_independent_iterators_do_not_interfere() {
        let session = session("a b c");
        let mut first = session.independent_pairs().unwrap();
        assert_eq!(first.next(), Some((0, 2)));

        let second: Vec<_> = session.independent_text().unwrap().collect();
        assert_eq!(second, vec!["a ", "b ", "c"]);
        assert_eq!(session.position(), 0);
        assert_eq!(first.next(), Some((2, 4)));
        assert_eq!(first.next(), Some((4, 5)));
        assert_eq!(first.next(), None);
    }

    #[test]
    fn test_unforkable_cursor() {
        let analyzer = SpaceAnalyzer { forkable: false };
        let session =
            SegmentationSession::create(&analyzer, &Locale::root(), SegmentKind::Line, "a b")
                .unwrap();
        assert!(matches!(
            session.independent_pairs(),
            Err(CoreError::CursorNotForkable { .. })
        ));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let session = session("");
        assert_eq!(session.begin_pairs().count(), 0);
        assert_eq!(session.begin_text().count(), 0);
    }

    #[test]
    fn test_construction_failure_carries_diagnostic() {
        let analyzer = SpaceAnalyzer { forkable: true };
        let locale = Locale::from_tag("zz").unwrap();
        let err = SegmentationSession::create(&analyzer, &locale, SegmentKind::Sentence, "x")
            .unwrap_err();
        assert_eq!(err.diagnostic_code(), Some(DiagnosticCode::MissingResource));
        assert!(err.to_string().contains("sentence"));
    }

    #[test]
    fn test_offsets_are_utf16_code_units() {
        let session = session("😀 ok");
        let pairs: Vec<_> = session.begin_pairs().collect();
        assert_eq!(pairs, vec![(0, 3), (3, 5)]);
        assert_eq!(session.utf16_len(), 5);
        assert_eq!(session.substring(0, 2), "😀");
    }

    #[test]
    fn test_reversed_range_extracts_empty() {
        let session = session("abc");
        assert_eq!(session.substring(2, 1), "");
        assert_eq!(session.substring(1, 99), "");
    }

    #[test]
    fn test_session_iterates_by_reference() {
        let session = session("x y");
        let collected: Vec<String> = (&session).into_iter().collect();
        assert_eq!(collected.concat(), "x y");
    }

    #[test]
    fn test_debug_shows_text_and_locale() {
        let session = session("hi");
        let debug = format!("{session:?}");
        assert!(debug.contains("Word"));
        assert!(debug.contains("\"hi\""));
        assert!(debug.contains("und"));
    }

    #[test]
    fn test_concurrent_next_never_duplicates_steps() {
        let text = "a ".repeat(200);
        let session = session(&text);
        let left = session.begin_pairs();
        let right = session.begin_pairs();

        let handles: Vec<_> = [left, right]
            .into_iter()
            .map(|pairs| std::thread::spawn(move || pairs.map(|(_, end)| end).collect::<Vec<_>>()))
            .collect();

        let mut ends: Vec<usize> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        ends.sort_unstable();

        let expected: Vec<usize> = session.independent_pairs().unwrap().map(|(_, end)| end).collect();
        assert_eq!(ends, expected);
    }
}
