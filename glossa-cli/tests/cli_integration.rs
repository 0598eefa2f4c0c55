//! Integration tests for the glossa CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn glossa() -> Command {
    Command::cargo_bin("glossa").unwrap()
}

#[test]
fn test_segment_english_sentences() {
    glossa()
        .args(["segment", "-k", "sentence", "-i"])
        .arg(fixture_path("english-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith went to the store.\n"))
        .stdout(predicate::str::contains("He bought some milk and eggs.\n"))
        .stdout(predicate::str::contains("Then he walked home!"));
}

#[test]
fn test_segment_japanese_sentences() {
    glossa()
        .args(["segment", "-k", "sentence", "-l", "ja_JP", "-i"])
        .arg(fixture_path("japanese-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("これはテストです。\n"))
        .stdout(predicate::str::contains(
            "日本語の文章を正しく分割できるか確認しています。",
        ));
}

#[test]
fn test_segment_literal_text_words() {
    glossa()
        .args(["segment", "--text", "Hello, world", "--offsets"])
        .assert()
        .success()
        .stdout("0\t5\tHello\n5\t6\t,\n7\t12\tworld\n");
}

#[test]
fn test_json_output() {
    glossa()
        .args(["segment", "-k", "sentence", "-f", "json", "-i"])
        .arg(fixture_path("english-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("["))
        .stdout(predicate::str::contains("\"text\""))
        .stdout(predicate::str::contains("\"start\": 0"))
        .stdout(predicate::str::contains("\"end\""));
}

#[test]
fn test_markdown_output_from_config() {
    glossa()
        .args(["segment", "-c"])
        .arg(fixture_path("glossa.toml"))
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1. John Smith went to the store."))
        .stdout(predicate::str::contains("---"))
        .stdout(predicate::str::contains("*Total segments: 3*"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.txt");

    glossa()
        .args(["segment", "-k", "sentence", "-i"])
        .arg(fixture_path("english-sample.txt"))
        .arg("-o")
        .arg(&output_file)
        .assert()
        .success();

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("John Smith went to the store."));
}

#[test]
fn test_glob_pattern() {
    glossa()
        .args(["segment", "-q", "-k", "sentence", "-i"])
        .arg(fixture_path("*-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith went to the store"))
        .stdout(predicate::str::contains("これはテストです。"));
}

#[test]
fn test_invalid_file() {
    glossa()
        .args(["segment", "-i", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_input_and_text_conflict() {
    glossa()
        .args(["segment", "-i", "a.txt", "--text", "b"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_kind() {
    glossa()
        .args(["segment", "--text", "x", "-k", "paragraph"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid segmentation kind"));
}

#[test]
fn test_format_message() {
    glossa()
        .args([
            "format",
            "-p",
            "{user} has {count, plural, one {# new message} other {# new messages}}",
            "-a",
            "user=Ada",
            "-a",
            "count:int=3",
        ])
        .assert()
        .success()
        .stdout("Ada has 3 new messages\n");
}

#[test]
fn test_format_with_json_arguments_and_locale() {
    glossa()
        .args(["format", "-l", "de_DE", "-p", "{user}: {total, number}", "--args-json"])
        .arg(fixture_path("args.json"))
        .assert()
        .success()
        .stdout("Ada: 1.234,5\n");
}

#[test]
fn test_format_dates() {
    glossa()
        .args([
            "format",
            "-p",
            "{d, date, long} at {t, time, short}",
            "-a",
            "d:date=2024-01-15",
            "-a",
            "t:datetime=2024-01-15T14:30:00Z",
        ])
        .assert()
        .success()
        .stdout("15 January 2024 at 14:30\n");
}

#[test]
fn test_format_missing_argument() {
    glossa()
        .args(["format", "-p", "Hello {name}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing-argument"));
}

#[test]
fn test_help_command() {
    glossa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("segmentation"));
}

#[test]
fn test_list_kinds_and_formats() {
    glossa()
        .args(["list", "kinds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("character"))
        .stdout(predicate::str::contains("sentence"));

    glossa()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("glossa.toml");

    glossa()
        .args(["generate-config", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration template generated successfully",
        ));

    glossa()
        .args(["validate", "--config"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[message]\ntime_zone = \"mars\"\n").unwrap();

    glossa()
        .args(["validate", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_validate_pattern_lists_arguments() {
    glossa()
        .args(["validate", "-p", "{a} {b, select, x {y} other {z}}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arguments: a, b"));

    glossa()
        .args(["validate", "-p", "{a, select, x {y}}"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Pattern is invalid"));
}
