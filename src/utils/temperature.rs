use crate::error::{ProcessingError, Result};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Parse a raw temperature field into degrees Celsius.
///
/// Report files occasionally drop the integer digit in front of the decimal
/// point (`.4`, `-.7`). Such values are repaired by inserting a `0` before the
/// point and parsed again.
///
/// # Examples
/// ```
/// use clim_report::utils::parse_temperature;
///
/// assert_eq!(parse_temperature(" 1.5 ").unwrap(), 1.5);
/// assert_eq!(parse_temperature("-.7").unwrap(), -0.7);
/// assert!(parse_temperature("abc").is_err());
/// ```
pub fn parse_temperature(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();

    if let Some(value) = parse_plain_decimal(trimmed) {
        return Ok(canonical(value));
    }

    repair_leading_zero(trimmed)
        .and_then(|repaired| parse_plain_decimal(&repaired))
        .map(canonical)
        .ok_or_else(|| ProcessingError::MalformedTemperature {
            value: raw.to_string(),
            location: None,
        })
}

/// Parse `[-+]digits[.digits]` and nothing else
fn parse_plain_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (unsigned, ""),
    };

    if integer.is_empty()
        || !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    text.parse::<f64>().ok()
}

/// Insert a `0` in front of a decimal point that has no digit before it
fn repair_leading_zero(text: &str) -> Option<String> {
    let point = text.find('.')?;
    let sign = &text[..point];

    if point + 1 == text.len() {
        return None;
    }

    if sign.is_empty() || sign == "-" || sign == "+" {
        Some(format!("{}0{}", sign, &text[point..]))
    } else {
        None
    }
}

/// Parse a `DATCLIM` value (`YYYY/MM/DD`, optionally followed by a time)
pub fn parse_report_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.split_whitespace().next().unwrap_or("");

    NaiveDate::parse_from_str(day, "%Y/%m/%d").map_err(|_| ProcessingError::DateParse {
        value: raw.to_string(),
    })
}

/// Fold `-0.0` into `0.0` so the two never rank apart
pub fn canonical(value: f64) -> f64 {
    value + 0.0
}

/// Order temperatures numerically, with `-0.0` equal to `0.0`
pub fn compare_temperatures(a: f64, b: f64) -> Ordering {
    canonical(a).total_cmp(&canonical(b))
}

/// Round to one decimal place for display
pub fn round_to_tenth(value: f64) -> f64 {
    canonical((value * 10.0).round() / 10.0)
}
