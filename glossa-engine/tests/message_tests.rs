//! End-to-end message rendering through the core coercion layer

use chrono::{NaiveDate, TimeZone, Utc};
use glossa_core::{Argument, CompiledMessage, CoreError, DecimalText, DiagnosticCode, ValueCoercer};
use glossa_engine::*;

fn compile(tag: &str, pattern: &str) -> CompiledMessage {
    CompiledMessage::compile(&IcuMessageCompiler, pattern, &Locale::from_tag(tag).unwrap())
        .unwrap()
}

fn render(tag: &str, pattern: &str, args: Vec<(&str, Argument)>) -> String {
    compile(tag, pattern)
        .render(args, &ValueCoercer::default())
        .unwrap()
}

#[test]
fn test_mixed_arguments() {
    let when = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
    let rendered = render(
        "en_GB",
        "{user} paid {amount, number, #,##0.00} on {when, date, medium} at {when, time, short}",
        vec![
            ("user", Argument::from("Ada")),
            ("amount", Argument::from(DecimalText::new("1234.5"))),
            ("when", Argument::from(when)),
        ],
    );
    assert_eq!(rendered, "Ada paid 1,234.50 on 15 Jan 2024 at 14:30");
}

#[test]
fn test_plural_with_nested_argument() {
    let pattern = "{count, plural, one{1 file} other{{count} files}}";
    assert_eq!(render("en", pattern, vec![("count", Argument::from(1i64))]), "1 file");
    assert_eq!(render("en", pattern, vec![("count", Argument::from(5i64))]), "5 files");
}

#[test]
fn test_empty_table_renders_plain_pattern() {
    let empty: Vec<(&str, Argument)> = Vec::new();
    assert_eq!(render("en", "No placeholders here", empty), "No placeholders here");
}

#[test]
fn test_doubles_and_decimals() {
    assert_eq!(render("en", "{x}", vec![("x", Argument::from(3.14159))]), "3.142");
    assert_eq!(
        render("en", "{x}", vec![("x", Argument::from(DecimalText::new("1.23E+10")))]),
        "12,300,000,000"
    );
    assert_eq!(
        render("en", "{x}", vec![("x", Argument::from(DecimalText::new("-42.50")))]),
        "-42.5"
    );
}

#[test]
fn test_percent_below_one() {
    assert_eq!(
        render("en", "{p, number, percent}", vec![("p", Argument::from(0.05))]),
        "5%"
    );
    assert_eq!(
        render("en", "{p, number, percent}", vec![("p", Argument::from(DecimalText::new("0.256")))]),
        "26%"
    );
    assert_eq!(render("en", "{p, number, #%}", vec![("p", Argument::from(0.42))]), "42%");
    assert_eq!(render("de", "{p, number, #%}", vec![("p", Argument::from(0.5))]), "50%");
}

#[test]
fn test_unknown_language_renders_with_root_data() {
    assert_eq!(
        render("invalid_LOCALE", "{n, number} {n, plural, one {item} other {items}}", vec![(
            "n",
            Argument::from(1234i64)
        )]),
        "1,234 items"
    );
}

#[test]
fn test_naive_date_renders_at_midnight_utc() {
    let date = NaiveDate::from_ymd_opt(1990, 5, 25).unwrap();
    assert_eq!(
        render("en", "{d, date, long}", vec![("d", Argument::from(date))]),
        "25 May 1990"
    );
    let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    assert_eq!(
        render("en", "{d, date, full}", vec![("d", Argument::from(date))]),
        "Thursday, 20 June 2024"
    );
}

#[test]
fn test_bool_counts_as_integer() {
    let pattern = "{flag, plural, =0 {off} other {on}}";
    assert_eq!(render("en", pattern, vec![("flag", Argument::from(false))]), "off");
    assert_eq!(render("en", pattern, vec![("flag", Argument::from(true))]), "on");
}

#[test]
fn test_numbering_system_keyword() {
    assert_eq!(
        render("ar@numbers=arab", "{n}", vec![("n", Argument::from(1234i64))]),
        "١٬٢٣٤"
    );
}

#[test]
fn test_pattern_errors_surface_codes() {
    let locale = Locale::from_tag("en").unwrap();
    let err = CompiledMessage::compile(&IcuMessageCompiler, "{unclosed", &locale).unwrap_err();
    assert!(matches!(err, CoreError::PatternSyntax(_)));
    assert_eq!(err.diagnostic_code(), Some(DiagnosticCode::UnmatchedBraces));
}

#[test]
fn test_render_errors_surface_codes() {
    let message = compile("en", "{n, number}");
    let err = message
        .render(vec![("n", Argument::from("seven"))], &ValueCoercer::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::Render(_)));
    assert_eq!(err.diagnostic_code(), Some(DiagnosticCode::ArgumentTypeMismatch));

    let err = message
        .render(vec![("n", Argument::Integer(i128::MAX))], &ValueCoercer::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::Coercion { .. }));
}

#[test]
fn test_template_is_shared_across_threads() {
    let message = compile("en", "{n, plural, one {# item} other {# items}}");
    std::thread::scope(|scope| {
        for n in 1..=4i64 {
            let message = &message;
            scope.spawn(move || {
                let rendered = message
                    .render(vec![("n", Argument::from(n))], &ValueCoercer::default())
                    .unwrap();
                let expected = if n == 1 { "1 item".to_string() } else { format!("{n} items") };
                assert_eq!(rendered, expected);
            });
        }
    });
}
