//! Cut range parsing: `"1:15-2:30"` → `(75.0, 150.0)`.

use crate::error::ParseError;
use crate::parse::timespec::parse_time;

/// Dash-like separators accepted between the two bounds.
const SEPARATORS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Parse a `start-end` string into validated `(start, end)` seconds.
///
/// Both sides go through [`parse_time`], so any of its grammars can appear
/// on either side of the dash. The pair is validated for sign and strict
/// ordering but not clamped against any media duration; that happens in the
/// transform engine.
pub fn parse_cut_range(text: &str) -> Result<(f64, f64), ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyRange);
    }

    let parts: Vec<&str> = trimmed.split(SEPARATORS).map(str::trim).collect();
    let [start_text, end_text] = parts.as_slice() else {
        return Err(ParseError::InvalidRangeFormat(trimmed.to_string()));
    };

    let start = parse_time(start_text)?;
    let end = parse_time(end_text)?;

    if start < 0.0 || end < 0.0 {
        return Err(ParseError::NegativeTime);
    }
    if start >= end {
        return Err(ParseError::InvalidOrder);
    }

    Ok((start, end))
}
