//! Go 风格时长字面量
//!
//! `OLLAMA_KEEP_ALIVE=1h30m`、`300ms`、`-1s` 等写法沿用宿主工具的格式；
//! 展示时同样输出 `5m0s` 形式，保证 help 文本与用户输入一致。

use std::fmt::Write as _;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("invalid duration {0:?}")]
    Invalid(String),
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
    #[error("duration {0:?} out of range")]
    Overflow(String),
}

const NANOS_PER_SEC: u64 = 1_000_000_000;

const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
];

// Fraction digits beyond this add nothing at nanosecond resolution.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a signed duration literal such as `"-1.5h"` or `"2h45m"` into nanoseconds.
///
/// A unit is required for every component except the bare literal `"0"`.
pub fn parse_duration(input: &str) -> Result<i64, DurationParseError> {
    let invalid = || DurationParseError::Invalid(input.to_string());
    let overflow = || DurationParseError::Overflow(input.to_string());

    let (negative, mut s) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let int_len = leading_digits(s);
        let int_digits = &s[..int_len];
        s = &s[int_len..];

        let mut frac_digits = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = leading_digits(rest);
            frac_digits = &rest[..frac_len];
            s = &rest[frac_len..];
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let unit_str = &s[..unit_len];
        s = &s[unit_len..];
        let unit = UNITS
            .iter()
            .find(|(name, _)| *name == unit_str)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| DurationParseError::UnknownUnit {
                unit: unit_str.to_string(),
                input: input.to_string(),
            })?;

        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| overflow())?
        };
        let mut component = whole.checked_mul(unit).ok_or_else(overflow)?;

        let frac_digits = &frac_digits[..frac_digits.len().min(MAX_FRACTION_DIGITS)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| invalid())?;
            let scale = 10u128.pow(frac_digits.len() as u32);
            let extra = u64::try_from(frac * u128::from(unit) / scale).map_err(|_| overflow())?;
            component = component.checked_add(extra).ok_or_else(overflow)?;
        }

        total = total.checked_add(component).ok_or_else(overflow)?;
    }

    const LIMIT: u64 = 1 << 63;
    match (negative, total) {
        (true, LIMIT) => Ok(i64::MIN),
        (_, t) if t >= LIMIT => Err(overflow()),
        (true, t) => Ok(-(t as i64)),
        (false, t) => Ok(t as i64),
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Renders a duration the way it is written in config: `0s`, `1.5ms`, `5m0s`, `1h0m0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos / 1_000, nanos % 1_000, 3));
    }
    if nanos < u128::from(NANOS_PER_SEC) {
        return format!("{}ms", with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6));
    }

    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(
        out,
        "{}s",
        with_fraction(u128::from(seconds), u128::from(d.subsec_nanos()), 9)
    );
    out
}

fn with_fraction(whole: u128, frac: u128, width: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
