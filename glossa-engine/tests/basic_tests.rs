//! Basic tests for glossa-engine

use glossa_core::{SegmentationSession, SegmentKind};
use glossa_engine::*;
use proptest::prelude::*;

fn segments(kind: SegmentKind, tag: &str, text: &str) -> Vec<String> {
    let locale = Locale::from_tag(tag).unwrap();
    let session =
        SegmentationSession::create(&IcuBoundaryAnalyzer::new(), &locale, kind, text).unwrap();
    session.begin_text().collect()
}

#[test]
fn test_engine_config_creation() {
    let config = EngineConfig::default();
    assert_eq!(config.word_model, WordModel::Auto);
    assert_eq!(config.line_strictness, LineStrictness::Normal);

    let analyzer = IcuBoundaryAnalyzer::with_config(EngineConfig::strict());
    assert_eq!(analyzer.config().word_model, WordModel::Dictionary);
}

#[test]
fn test_word_segments() {
    assert_eq!(
        segments(SegmentKind::Word, "en", "Hello, world!"),
        vec!["Hello", ",", " ", "world", "!"]
    );
}

#[test]
fn test_sentence_segments() {
    assert_eq!(
        segments(SegmentKind::Sentence, "en_US", "Hello world. How are you? Fine."),
        vec!["Hello world. ", "How are you? ", "Fine."]
    );
}

#[test]
fn test_japanese_sentences() {
    assert_eq!(
        segments(SegmentKind::Sentence, "ja_JP", "今日は晴れです。明日は雨でしょう。"),
        vec!["今日は晴れです。", "明日は雨でしょう。"]
    );
}

#[test]
fn test_line_opportunities() {
    assert_eq!(
        segments(SegmentKind::Line, "en", "The quick fox"),
        vec!["The ", "quick ", "fox"]
    );
}

#[test]
fn test_grapheme_clusters() {
    assert_eq!(
        segments(SegmentKind::Character, "", "e\u{301}👍🏽!"),
        vec!["e\u{301}", "👍🏽", "!"]
    );
}

#[test]
fn test_thai_words_use_complex_model() {
    let words = segments(SegmentKind::Word, "th", "ภาษาไทยง่ายนิดเดียว");
    assert!(words.len() > 1);
    assert_eq!(words.concat(), "ภาษาไทยง่ายนิดเดียว");
}

#[test]
fn test_empty_text_has_no_segments() {
    for kind in SegmentKind::all() {
        assert!(segments(kind, "en", "").is_empty());
    }
}

#[test]
fn test_independent_views_agree_with_shared() {
    let locale = Locale::from_tag("en").unwrap();
    let session = SegmentationSession::create(
        &IcuBoundaryAnalyzer::new(),
        &locale,
        SegmentKind::Word,
        "One two three.",
    )
    .unwrap();

    let mut shared = session.begin_pairs();
    shared.next();
    let independent: Vec<_> = session.independent_pairs().unwrap().collect();
    let fresh: Vec<_> = session.begin_pairs().collect();
    assert_eq!(independent, fresh);
}

proptest! {
    #[test]
    fn segments_reassemble_input(text in "\\PC{0,60}", kind in prop_oneof![
        Just(SegmentKind::Character),
        Just(SegmentKind::Word),
        Just(SegmentKind::Line),
        Just(SegmentKind::Sentence),
    ]) {
        let pieces = segments(kind, "en", &text);
        prop_assert!(pieces.iter().all(|piece| !piece.is_empty()));
        prop_assert_eq!(pieces.concat(), text);
    }
}
