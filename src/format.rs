//! Turns raw marker field values into display strings.
//!
//! All time values are float milliseconds. None of these functions fail; values
//! which can't be displayed in the requested format render as a placeholder.

use serde_json::Value;

use crate::markers::{MarkerFieldFormat, MarkerNumberFieldFormat};

/// Shown for a missing or `null` field value.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";
/// Shown for a value which doesn't fit the field's format, such as a string in a number field.
pub const INVALID_PLACEHOLDER: &str = "(invalid)";
/// Shown for a duration whose start or end is unknown.
pub const UNKNOWN: &str = "unknown";

const SIGNIFICANT_DIGITS: i32 = 3;
const MAX_FRACTIONAL_DIGITS: i32 = 3;

/// Formats a payload value according to a schema field format.
pub fn format_field_value(format: &MarkerFieldFormat, value: &Value) -> String {
    match (format, value) {
        (_, Value::Null) => EMPTY_PLACEHOLDER.to_owned(),
        (MarkerFieldFormat::Number(format), value) => match value.as_f64() {
            Some(number) if number.is_finite() => format_number_field(*format, number),
            _ => INVALID_PLACEHOLDER.to_owned(),
        },
        (MarkerFieldFormat::String(_) | MarkerFieldFormat::Other(_), Value::String(s)) => {
            s.clone()
        }
        (MarkerFieldFormat::String(_) | MarkerFieldFormat::Other(_), value) => value.to_string(),
    }
}

pub fn format_number_field(format: MarkerNumberFieldFormat, number: f64) -> String {
    match format {
        MarkerNumberFieldFormat::Duration | MarkerNumberFieldFormat::Time => {
            format_timestamp(number)
        }
        MarkerNumberFieldFormat::Seconds => format_seconds(number),
        MarkerNumberFieldFormat::Milliseconds => format_milliseconds(number),
        MarkerNumberFieldFormat::Microseconds => format_microseconds(number),
        MarkerNumberFieldFormat::Nanoseconds => format_nanoseconds(number),
        MarkerNumberFieldFormat::Bytes => format_bytes(number),
        MarkerNumberFieldFormat::Percentage => format_percent(number),
        MarkerNumberFieldFormat::Integer => format_integer(number),
        MarkerNumberFieldFormat::Decimal => format_decimal(number),
    }
}

/// Formats a millisecond value with a unit picked from its magnitude (s, ms or μs).
///
/// Three significant digits are kept, with at least one fractional digit:
/// `1.23s`, `5.00ms`, `12.5ms`, `250.0μs`.
pub fn format_timestamp(ms: f64) -> String {
    if !ms.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    if ms == 0.0 {
        return format!("{}ms", format_significant(ms, 1));
    }
    // The unit is picked after rounding, so 999.96ms shows as 1.00s.
    for (scale, unit) in [(1000.0, "s"), (1.0, "ms")] {
        let rounded = round_significant(ms / scale, 1);
        if rounded.abs() >= 1.0 {
            return format!("{}{unit}", format_significant(rounded, 1));
        }
    }
    format!("{}μs", format_significant(ms * 1000.0, 1))
}

/// Formats a profile timestamp relative to the profile's zero time.
pub fn format_timestamp_relative(time: f64, zero_at: f64) -> String {
    format_timestamp(time - zero_at)
}

/// Formats a millisecond value as milliseconds, without trailing zeros: `5ms`, `2.53ms`.
pub fn format_milliseconds(ms: f64) -> String {
    with_unit(ms, "ms")
}

pub fn format_seconds(ms: f64) -> String {
    with_unit(ms / 1000.0, "s")
}

pub fn format_microseconds(ms: f64) -> String {
    with_unit(ms * 1000.0, "μs")
}

pub fn format_nanoseconds(ms: f64) -> String {
    with_unit(ms * 1_000_000.0, "ns")
}

fn with_unit(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    format!("{}{unit}", trim_fraction(&format_significant(value, 0)))
}

/// Formats a byte count as bytes, KB or MB (binary scale), with at most two fractional digits.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let abs = bytes.abs();
    if abs < KB {
        format!("{} bytes", format_integer(bytes))
    } else if abs < MB {
        format!("{}KB", trim_fraction(&format_fixed(bytes / KB, 2)))
    } else {
        format!("{}MB", trim_fraction(&format_fixed(bytes / MB, 2)))
    }
}

/// Formats a 0–1 fraction as a whole-number percentage.
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    format!("{}%", format_fixed(fraction * 100.0, 0))
}

pub fn format_integer(number: f64) -> String {
    if !number.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    format_fixed(number, 0)
}

pub fn format_decimal(number: f64) -> String {
    if !number.is_finite() {
        return INVALID_PLACEHOLDER.to_owned();
    }
    format_fixed(number, 2)
}

/// Formats `end - start` with [`format_milliseconds`], or `unknown` if either end is
/// missing or the difference is negative.
pub fn maybe_format_duration(start: Option<f64>, end: Option<f64>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if end >= start => format_milliseconds(end - start),
        _ => UNKNOWN.to_owned(),
    }
}

fn format_significant(value: f64, min_fractional_digits: i32) -> String {
    format_fixed(value, significant_fractional_digits(value, min_fractional_digits))
}

fn round_significant(value: f64, min_fractional_digits: i32) -> f64 {
    let fractional_digits = significant_fractional_digits(value, min_fractional_digits);
    format!("{value:.fractional_digits$}")
        .parse()
        .unwrap_or(value)
}

fn significant_fractional_digits(value: f64, min_fractional_digits: i32) -> usize {
    let fractional_digits = if value == 0.0 {
        min_fractional_digits
    } else {
        let integer_digits = value.abs().log10().floor() as i32 + 1;
        (SIGNIFICANT_DIGITS - integer_digits).clamp(min_fractional_digits, MAX_FRACTIONAL_DIGITS)
    };
    fractional_digits.max(0) as usize
}

fn format_fixed(value: f64, fractional_digits: usize) -> String {
    let formatted = format!("{value:.fractional_digits$}");
    // "-0" isn't a useful thing to show.
    if formatted.starts_with('-') && formatted[1..].bytes().all(|b| b == b'0' || b == b'.') {
        return group_thousands(&formatted[1..]);
    }
    group_thousands(&formatted)
}

fn trim_fraction(formatted: &str) -> String {
    if !formatted.contains('.') {
        return formatted.to_owned();
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// Inserts `,` separators into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };
    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(fraction);
    grouped
}
