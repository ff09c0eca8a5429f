// Tests for timestamp and cut-range parsing
//
// Covers the three accepted time grammars (decimal seconds, symbolic
// durations, colon fields) and the validation rules of the range parser.

use tagtrim::error::ParseError;
use tagtrim::model::format_timestamp;
use tagtrim::{parse_cut_range, parse_time};

#[test]
fn test_parse_time_plain_seconds() {
    assert_eq!(parse_time("90").unwrap(), 90.0);
    assert_eq!(parse_time("90.5").unwrap(), 90.5);
    assert_eq!(parse_time("0").unwrap(), 0.0);
    assert_eq!(parse_time(" 42 ").unwrap(), 42.0);
}

#[test]
fn test_parse_time_symbolic() {
    assert_eq!(parse_time("1h2m3s").unwrap(), 3723.0);
    assert_eq!(parse_time("1m30s").unwrap(), 90.0);
    assert_eq!(parse_time("1.5m").unwrap(), 90.0);
    assert_eq!(parse_time("2h").unwrap(), 7200.0);
    // Units may repeat; no uniqueness constraint.
    assert_eq!(parse_time("1m1m").unwrap(), 120.0);
    // Case-insensitive.
    assert_eq!(parse_time("1H30M").unwrap(), 5400.0);
}

#[test]
fn test_parse_time_colon_fields() {
    assert_eq!(parse_time("1:30").unwrap(), 90.0);
    assert_eq!(parse_time("01:02:03").unwrap(), 3723.0);
    assert_eq!(parse_time("0:90").unwrap(), 90.0);
    // Fields are floats.
    assert_eq!(parse_time("1:30.5").unwrap(), 90.5);
}

#[test]
fn test_parse_time_rejects_garbage() {
    assert!(matches!(parse_time(""), Err(ParseError::EmptyTime)));
    assert!(matches!(parse_time("   "), Err(ParseError::EmptyTime)));
    assert!(matches!(
        parse_time("abc"),
        Err(ParseError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        parse_time("1:2:3:4"),
        Err(ParseError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        parse_time("1h30"),
        Err(ParseError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        parse_time("1x30"),
        Err(ParseError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_parse_time_idempotent_on_formatted_output() {
    // parse → format → parse stays within one second of the original.
    for input in ["90", "90.5", "1:30", "01:02:03", "1h2m3s", "1.5m", "3599", "2h"] {
        let seconds = parse_time(input).unwrap();
        let formatted = format_timestamp(Some(seconds));
        let reparsed = parse_time(&formatted).unwrap();
        assert!(
            (reparsed - seconds).abs() <= 1.0,
            "{} → {} → {} drifted more than a second",
            input,
            formatted,
            reparsed
        );
    }
}

#[test]
fn test_parse_cut_range_colon_and_plain() {
    assert_eq!(parse_cut_range("1:15-2:30").unwrap(), (75.0, 150.0));
    assert_eq!(parse_cut_range("75-150").unwrap(), (75.0, 150.0));
    assert_eq!(parse_cut_range("1m15s-2m30s").unwrap(), (75.0, 150.0));
    assert_eq!(parse_cut_range("00:01:15-00:02:30").unwrap(), (75.0, 150.0));
}

#[test]
fn test_parse_cut_range_dash_variants() {
    // En-dash and em-dash, with optional whitespace around the separator.
    assert_eq!(parse_cut_range("75 – 150").unwrap(), (75.0, 150.0));
    assert_eq!(parse_cut_range("75—150").unwrap(), (75.0, 150.0));
    assert_eq!(parse_cut_range(" 1:15 - 2:30 ").unwrap(), (75.0, 150.0));
}

#[test]
fn test_parse_cut_range_rejects_wrong_shape() {
    assert!(matches!(parse_cut_range(""), Err(ParseError::EmptyRange)));
    assert!(matches!(
        parse_cut_range("75"),
        Err(ParseError::InvalidRangeFormat(_))
    ));
    assert!(matches!(
        parse_cut_range("1-2-3"),
        Err(ParseError::InvalidRangeFormat(_))
    ));
}

#[test]
fn test_parse_cut_range_rejects_bad_order() {
    assert!(matches!(
        parse_cut_range("2:30-1:15"),
        Err(ParseError::InvalidOrder)
    ));
    // Equal bounds are invalid; the inequality is strict.
    assert!(matches!(
        parse_cut_range("90-90"),
        Err(ParseError::InvalidOrder)
    ));
}

#[test]
fn test_parse_cut_range_propagates_time_errors() {
    assert!(matches!(
        parse_cut_range("abc-90"),
        Err(ParseError::UnsupportedFormat(_))
    ));
}
