//! Tolerant attribute-string parsers.
//!
//! Widget options arrive as strings (markup attributes, layout files, host
//! state). None of these parsers fail: malformed input yields the supplied
//! default. Numeric parsers read the longest numeric prefix after leading
//! whitespace, so `"24px"` is `24` and `"1.5e2dB"` is `150`.

use alloc::borrow::Cow;

/// Parses `"true"` or `"false"` exactly; anything else returns `default`.
///
/// # Example
///
/// ```rust
/// use awww_core::parse_bool;
///
/// assert!(parse_bool("true", false));
/// assert!(!parse_bool("false", true));
/// assert!(parse_bool("yes", true));
/// ```
pub fn parse_bool(s: &str, default: bool) -> bool {
    match s {
        "true" => true,
        "false" => false,
        _ => default,
    }
}

/// Parses the leading integer of `s`, or returns `default`.
///
/// A fractional part terminates the prefix (`"1.9"` is `1`).
///
/// # Example
///
/// ```rust
/// use awww_core::parse_int;
///
/// assert_eq!(parse_int(" 320px", 0), 320);
/// assert_eq!(parse_int("-7.9", 0), -7);
/// assert_eq!(parse_int("wide", 100), 100);
/// ```
pub fn parse_int(s: &str, default: i64) -> i64 {
    int_prefix(s).unwrap_or(default)
}

/// Parses the leading decimal number of `s`, or returns `default`.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent and the literal `Infinity`.
///
/// # Example
///
/// ```rust
/// use awww_core::parse_float;
///
/// assert_eq!(parse_float("0.25", 0.0), 0.25);
/// assert_eq!(parse_float(".5", 0.0), 0.5);
/// assert_eq!(parse_float("-3dB", 0.0), -3.0);
/// assert_eq!(parse_float("", 1.0), 1.0);
/// ```
pub fn parse_float(s: &str, default: f32) -> f32 {
    float_prefix(s).unwrap_or(default)
}

/// Returns `s`, or `default` when there is no string at all.
pub fn parse_str<'a>(s: Option<&'a str>, default: &'a str) -> Cow<'a, str> {
    Cow::Borrowed(s.unwrap_or(default))
}

/// Leading integer of `s`, if any.
pub(crate) fn int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign = sign_len(s);
    let digits = digits_len(&s[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Leading decimal number of `s`, if any.
pub(crate) fn float_prefix(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let sign = sign_len(s);
    let rest = &s[sign..];

    if rest.starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        });
    }

    let int_digits = digits_len(rest);
    let mut len = int_digits;
    let mut frac_digits = 0;
    if rest[len..].starts_with('.') {
        frac_digits = digits_len(&rest[len + 1..]);
        len += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    let exp = &rest[len..];
    if exp.starts_with(['e', 'E']) {
        let exp_sign = sign_len(&exp[1..]);
        let exp_digits = digits_len(&exp[1 + exp_sign..]);
        if exp_digits > 0 {
            len += 1 + exp_sign + exp_digits;
        }
    }

    s[..sign + len].parse().ok()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
