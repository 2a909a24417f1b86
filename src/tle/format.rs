//! Fixed column TLE helpers
use crate::{error::ParsingError, tle::Field};

/// Element lines width, checksum included
pub(crate) const LINE_WIDTH: usize = 69;

/// Modulo 10 checksum of the first 68 columns:
/// digits count for their value, minus signs count for one,
/// anything else is ignored.
pub(crate) fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(LINE_WIDTH - 1)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Returns 1-indexed, inclusive column range.
/// Caller guarantees ASCII content of [LINE_WIDTH] width.
pub(crate) fn columns(line: &str, first: usize, last: usize) -> &str {
    &line[first - 1..last]
}

/// Returns the content of this [Field], trimmed.
pub(crate) fn field_content<'a>(line: &'a str, field: Field) -> &'a str {
    let (_, first, last) = field.columns();
    columns(line, first, last).trim()
}

fn invalid(line: u8, field: Field) -> ParsingError {
    ParsingError::InvalidField { line, field }
}

/// Parses a plain decimal [Field]. Blank fields are invalid.
pub(crate) fn parse_float(line: &str, nb: u8, field: Field) -> Result<f64, ParsingError> {
    let content = field_content(line, field);
    let value = content
        .parse::<f64>()
        .map_err(|_| invalid(nb, field))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(nb, field))
    }
}

/// Parses an unsigned integer [Field]. Blank fields resolve to zero,
/// which is common for ephemeris type, element number and revolution number.
pub(crate) fn parse_unsigned(line: &str, nb: u8, field: Field) -> Result<u32, ParsingError> {
    let content = field_content(line, field);
    if content.is_empty() {
        return Ok(0);
    }
    content.parse::<u32>().map_err(|_| invalid(nb, field))
}

/// Parses a mandatory unsigned integer [Field], located on line `nb`.
pub(crate) fn parse_integer(line: &str, nb: u8, field: Field) -> Result<u32, ParsingError> {
    let content = field_content(line, field);
    if content.is_empty() {
        return Err(invalid(nb, field));
    }
    content.parse::<u32>().map_err(|_| invalid(nb, field))
}

/// Parses the eccentricity field, which has an implied leading decimal point
/// ("0006994" is 0.0006994). An explicit decimal point is tolerated.
pub(crate) fn parse_implied_decimal(line: &str, nb: u8, field: Field) -> Result<f64, ParsingError> {
    let content = field_content(line, field);

    if content.contains('.') {
        return parse_float(line, nb, field);
    }

    if content.is_empty() || !content.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(nb, field));
    }

    format!("0.{}", content)
        .parse::<f64>()
        .map_err(|_| invalid(nb, field))
}

/// Parses fields with implied decimal point and power of ten exponent,
/// for example " 17572-3" is 0.17572E-3 and "-11606-4" is -0.11606E-4.
/// Blank fields resolve to zero.
pub(crate) fn parse_implied_exponent(
    line: &str,
    nb: u8,
    field: Field,
) -> Result<f64, ParsingError> {
    let content = field_content(line, field).replace(' ', "");

    if content.is_empty() {
        return Ok(0.0);
    }

    let (sign, unsigned) = match content.as_bytes()[0] {
        b'-' => (-1.0, &content[1..]),
        b'+' => (1.0, &content[1..]),
        _ => (1.0, content.as_str()),
    };

    let (mantissa, exponent) = match unsigned.rfind(['-', '+']) {
        Some(0) | None => (unsigned, "0"),
        Some(offset) => (&unsigned[..offset], &unsigned[offset..]),
    };

    let mantissa = mantissa.trim_start_matches('.');

    if mantissa.is_empty() || !mantissa.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(nb, field));
    }

    let mantissa = format!("0.{}", mantissa)
        .parse::<f64>()
        .map_err(|_| invalid(nb, field))?;

    let exponent = exponent.parse::<i32>().map_err(|_| invalid(nb, field))?;

    Ok(sign * mantissa * 10.0_f64.powi(exponent))
}
