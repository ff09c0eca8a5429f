//! Flexible timestamp parsing.
//!
//! Accepted grammars, tried in order:
//! 1. pure decimal seconds: `"90"`, `"90.5"`
//! 2. symbolic durations: `"1h2m3s"`, `"1.5m"` (units may repeat)
//! 3. colon fields: `"SS"`, `"MM:SS"`, `"HH:MM:SS"` (fields may be floats)

use crate::error::ParseError;

/// Convert a flexible timestamp string into seconds.
pub fn parse_time(text: &str) -> Result<f64, ParseError> {
    let text = text.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Err(ParseError::EmptyTime);
    }

    if is_plain_decimal(&text) {
        // Guaranteed to parse after the shape check.
        if let Ok(value) = text.parse::<f64>() {
            return Ok(value);
        }
    }

    if let Some(total) = parse_symbolic(&text) {
        return Ok(total);
    }

    parse_colon_fields(&text)
}

/// `digits` optionally followed by `.digits` — no sign, no exponent.
fn is_plain_decimal(text: &str) -> bool {
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (text, None),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// Parse a full sequence of `<number><h|m|s>` pairs, summing the weighted
/// values. Returns `None` unless the whole string is consumed by at least
/// one pair.
fn parse_symbolic(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut total = 0.0;
    let mut pairs = 0;

    while pos < bytes.len() {
        let start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
            pos += 1;
        }
        let number = &text[start..pos];
        if !is_plain_decimal(number) {
            return None;
        }
        let value: f64 = number.parse().ok()?;

        let weight = match bytes.get(pos)? {
            b'h' => 3600.0,
            b'm' => 60.0,
            b's' => 1.0,
            _ => return None,
        };
        pos += 1;

        total += value * weight;
        pairs += 1;
    }

    (pairs > 0).then_some(total)
}

/// Colon-separated numeric fields with positional weights 1/60/3600.
fn parse_colon_fields(text: &str) -> Result<f64, ParseError> {
    let unsupported = || ParseError::UnsupportedFormat(text.to_string());

    let fields = text
        .split(':')
        .map(|f| f.trim().parse::<f64>().map_err(|_| unsupported()))
        .collect::<Result<Vec<f64>, ParseError>>()?;

    match fields.as_slice() {
        [seconds] => Ok(*seconds),
        [minutes, seconds] => Ok(minutes * 60.0 + seconds),
        [hours, minutes, seconds] => Ok(hours * 3600.0 + minutes * 60.0 + seconds),
        _ => Err(unsupported()),
    }
}
