//! Parsing of human-written durations such as `250ms`, `1s` or `1m30s`.
//!
//! A duration is an optional sign followed by one or more `<number><unit>`
//! groups. Numbers may have a decimal fraction. Valid units are `ns`, `us`
//! (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` needs no unit.

use std::time::Duration;

/// Reasons a duration string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// Nothing was given.
    #[error("empty duration")]
    Empty,
    /// The text does not follow the `<number><unit>` grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),
    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    /// The unit is not one of the known suffixes.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The offending suffix.
        unit: String,
        /// The full input.
        input: String,
    },
    /// The value does not fit in a signed 64-bit count of nanoseconds.
    #[error("duration {0:?} is out of range")]
    Overflow(String),
    /// The value is below zero.
    #[error("duration {0:?} is negative")]
    Negative(String),
}

// Largest nanosecond count representable as an `i64`.
const MAX_NANOS: u128 = 9_223_372_036_854_775_807;

// Fraction digits beyond this cannot change the nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a duration string.
///
/// # Errors
///
/// Returns a [`DurationError`] if the text is malformed, uses an unknown
/// unit, overflows, or denotes a negative length of time.
pub fn parse(input: &str) -> Result<Duration, DurationError> {
    if input.is_empty() {
        return Err(DurationError::Empty);
    }

    let (negative, mut rest) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid(input.to_string()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(DurationError::Invalid(input.to_string()));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let overflow = || DurationError::Overflow(input.to_string());
        let whole = parse_digits(int_digits).ok_or_else(overflow)?;
        let mut value = whole.checked_mul(scale).ok_or_else(overflow)?;
        value = value.checked_add(fraction_nanos(frac_digits, scale)).ok_or_else(overflow)?;
        total = total.checked_add(value).filter(|t| *t <= MAX_NANOS).ok_or_else(overflow)?;

        rest = tail;
    }

    if negative && total > 0 {
        return Err(DurationError::Negative(input.to_string()));
    }
    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
    Ok(Duration::from_nanos(nanos))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

fn parse_digits(digits: &str) -> Option<u128> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)?.checked_add(u128::from(b - b'0')).filter(|v| *v <= MAX_NANOS)
    })
}

fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for b in digits.bytes() {
        numerator = numerator * 10 + u128::from(b - b'0');
        denominator *= 10;
    }
    numerator * scale / denominator
}
