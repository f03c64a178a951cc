//! Conversions from loosely typed input to the four scalar kinds.
//!
//! The rules follow weak-typing conventions: a string is read up to the end of
//! its leading numeric prefix, floats truncate toward zero when an integer is
//! wanted, and truthiness is "anything but zero or empty".
//!
//! ```rust
//! use constfile::coerce::{to_boolean, to_float, to_integer, to_string_value};
//! use constfile::Mixed;
//!
//! assert_eq!(to_integer(&Mixed::from("7.8")).unwrap(), 7);
//! assert_eq!(to_integer(&Mixed::from("#6")).unwrap(), 0);
//! assert_eq!(to_float(&Mixed::from("")).unwrap(), 0.0);
//! assert!(!to_boolean(&Mixed::from(0)).unwrap());
//! assert!(to_boolean(&Mixed::from("non-empty")).unwrap());
//! assert_eq!(to_string_value(&Mixed::from(false)).unwrap(), "");
//! ```
//!
//! Every function fails with [`Error::UnsupportedValueKind`] when handed
//! [`Mixed::Array`]; all other inputs convert. The error names the constant
//! [`UNNAMED`]; the store's setters reject arrays under the real name before
//! coercing.

use crate::{Error, Mixed, Result};

/// Truthiness: `false`, `0`, `0.0`, `""` and `"0"` are false, everything else is true.
pub fn to_boolean(value: &Mixed) -> Result<bool> {
    match value {
        Mixed::Bool(b) => Ok(*b),
        Mixed::Int(i) => Ok(*i != 0),
        // NaN compares unequal to zero, so it is truthy
        Mixed::Float(f) => Ok(*f != 0.0),
        Mixed::Str(s) => Ok(!(s.is_empty() || s == "0")),
        Mixed::Array(_) => Err(unsupported(value)),
    }
}

/// Integer conversion. Floats truncate toward zero and saturate at the `i64`
/// range; strings without a numeric prefix give `0`.
pub fn to_integer(value: &Mixed) -> Result<i64> {
    match value {
        Mixed::Bool(b) => Ok(i64::from(*b)),
        Mixed::Int(i) => Ok(*i),
        Mixed::Float(f) => Ok(truncate(*f)),
        Mixed::Str(s) => Ok(match numeric_prefix(s) {
            Some(prefix) if prefix.is_integral => parse_saturating(prefix.text),
            Some(prefix) => truncate(prefix.text.parse::<f64>().unwrap_or(0.0)),
            None => 0,
        }),
        Mixed::Array(_) => Err(unsupported(value)),
    }
}

/// Float conversion. Strings without a numeric prefix give `0.0`.
pub fn to_float(value: &Mixed) -> Result<f64> {
    match value {
        Mixed::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Mixed::Int(i) => Ok(*i as f64),
        Mixed::Float(f) => Ok(*f),
        Mixed::Str(s) => Ok(numeric_prefix(s)
            .and_then(|prefix| prefix.text.parse::<f64>().ok())
            .unwrap_or(0.0)),
        Mixed::Array(_) => Err(unsupported(value)),
    }
}

/// String conversion: `true` is `"1"`, `false` is `""`, numbers use their
/// shortest decimal form.
pub fn to_string_value(value: &Mixed) -> Result<String> {
    match value {
        Mixed::Bool(true) => Ok("1".to_string()),
        Mixed::Bool(false) => Ok(String::new()),
        Mixed::Int(i) => Ok(i.to_string()),
        Mixed::Float(f) => Ok(f.to_string()),
        Mixed::Str(s) => Ok(s.clone()),
        Mixed::Array(_) => Err(unsupported(value)),
    }
}

/// Stands in for the constant name; these functions never see one.
pub const UNNAMED: &str = "<unnamed>";

fn unsupported(value: &Mixed) -> Error {
    Error::unsupported_value_kind(UNNAMED, value.kind_name())
}

// `as` truncates toward zero, saturates out-of-range values and maps NaN to 0
#[inline]
fn truncate(f: f64) -> i64 {
    f as i64
}

fn parse_saturating(text: &str) -> i64 {
    text.parse::<i64>().unwrap_or_else(|_| {
        if text.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

struct NumericPrefix<'a> {
    text: &'a str,
    is_integral: bool,
}

/// Finds the leading `[+-]?digits[.digits][e[+-]digits]` run after any leading
/// whitespace. Returns `None` when no digit is found.
fn numeric_prefix(s: &str) -> Option<NumericPrefix<'_>> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let mut probe = pos + 1;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        frac_digits = probe - pos - 1;
        if int_digits > 0 || frac_digits > 0 {
            pos = probe;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mut has_exponent = false;
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut probe = pos + 1;
        if matches!(bytes.get(probe), Some(b'+') | Some(b'-')) {
            probe += 1;
        }
        let exp_start = probe;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        if probe > exp_start {
            pos = probe;
            has_exponent = true;
        }
    }

    let text = &s[..pos];
    Some(NumericPrefix {
        text,
        is_integral: !text.contains('.') && !has_exponent,
    })
}
