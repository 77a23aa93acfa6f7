//! Conversion of tokens into typed values.
//!
//! A token that matched its kind's grammar is first normalized into the
//! locale-neutral spelling Rust's parsers understand (group separators
//! removed, `.` as decimal point, ASCII digits, a leading `-` for negatives,
//! `NaN`/`Infinity` for the special values) and then handed to the target
//! type's [`Scannable::from_normalized`].

use std::{fmt, num::IntErrorKind, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{error::ConvertError, locale::Locale};

/// Grammar family of a scannable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    /// Integers; the only kind the radix applies to.
    Integer,
    /// Binary floating point, including `NaN` and infinities.
    Float,
    /// Arbitrary-precision decimals.
    Decimal,
}

impl ValueKind {
    pub(crate) fn is_decimal_like(self) -> bool {
        matches!(self, Self::Float | Self::Decimal)
    }

    /// Human readable description of what the grammar accepts.
    pub(crate) fn describe(self, radix: u32) -> String {
        match self {
            Self::Integer if radix != 10 => format!("integer (radix {radix})"),
            kind => kind.to_string(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
        })
    }
}

/// A type the scanner can read from a token.
///
/// Implementations receive text that already matched the grammar of
/// [`KIND`](Scannable::KIND) and was normalized. Integer kinds also receive
/// the radix in effect; other kinds ignore it.
pub trait Scannable: Sized {
    const KIND: ValueKind;
    /// Name used in range errors.
    const NAME: &'static str;

    /// Parses normalized text.
    ///
    /// # Errors
    ///
    /// [`ConvertError::OutOfRange`] when the value does not fit,
    /// [`ConvertError::Malformed`] when the text is still not parseable.
    fn from_normalized(text: &str, radix: u32) -> Result<Self, ConvertError>;
}

impl Scannable for bool {
    const KIND: ValueKind = ValueKind::Boolean;
    const NAME: &'static str = "bool";

    fn from_normalized(text: &str, _radix: u32) -> Result<Self, ConvertError> {
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::Malformed)
        }
    }
}

macro_rules! scannable_int {
    ($($ty:ty),* $(,)?) => {$(
        impl Scannable for $ty {
            const KIND: ValueKind = ValueKind::Integer;
            const NAME: &'static str = stringify!($ty);

            fn from_normalized(text: &str, radix: u32) -> Result<Self, ConvertError> {
                <$ty>::from_str_radix(text, radix).map_err(|err| match err.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        ConvertError::OutOfRange
                    }
                    _ => ConvertError::Malformed,
                })
            }
        }
    )*};
}

scannable_int!(i8, i16, i32, i64);

impl Scannable for BigInt {
    const KIND: ValueKind = ValueKind::Integer;
    const NAME: &'static str = "BigInt";

    fn from_normalized(text: &str, radix: u32) -> Result<Self, ConvertError> {
        BigInt::parse_bytes(text.as_bytes(), radix).ok_or(ConvertError::Malformed)
    }
}

// Out-of-range floats saturate to infinity rather than failing.
impl Scannable for f32 {
    const KIND: ValueKind = ValueKind::Float;
    const NAME: &'static str = "f32";

    fn from_normalized(text: &str, _radix: u32) -> Result<Self, ConvertError> {
        text.parse().map_err(|_| ConvertError::Malformed)
    }
}

impl Scannable for f64 {
    const KIND: ValueKind = ValueKind::Float;
    const NAME: &'static str = "f64";

    fn from_normalized(text: &str, _radix: u32) -> Result<Self, ConvertError> {
        text.parse().map_err(|_| ConvertError::Malformed)
    }
}

impl Scannable for BigDecimal {
    const KIND: ValueKind = ValueKind::Decimal;
    const NAME: &'static str = "BigDecimal";

    fn from_normalized(text: &str, _radix: u32) -> Result<Self, ConvertError> {
        BigDecimal::from_str(text).map_err(|_| ConvertError::Malformed)
    }
}

fn strip_affix<'a>(text: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    if prefix.is_empty() && suffix.is_empty() {
        return None;
    }
    text.strip_prefix(prefix)?.strip_suffix(suffix)
}

/// Rewrites a token of `kind` in the spelling Rust's parsers expect.
pub(crate) fn normalize(kind: ValueKind, token: &str, locale: &Locale) -> String {
    let mut text: String = match locale.grouping_separator() {
        Some(separator) => token.chars().filter(|&ch| ch != separator).collect(),
        None => token.to_owned(),
    };
    if kind.is_decimal_like() && locale.decimal_separator() != '.' {
        text = text.replace(locale.decimal_separator(), ".");
    }

    let mut negative = false;
    if let Some(body) = strip_affix(&text, locale.negative_prefix(), locale.negative_suffix()) {
        negative = true;
        text = body.to_owned();
    } else if let Some(body) =
        strip_affix(&text, locale.positive_prefix(), locale.positive_suffix())
    {
        text = body.to_owned();
    }

    if kind.is_decimal_like() {
        if text == locale.nan() {
            text = "NaN".to_owned();
        } else if text == locale.infinity() {
            text = "Infinity".to_owned();
        }
    }

    if locale.has_native_digits() {
        text = text
            .chars()
            .map(|ch| match locale.native_digit(ch) {
                Some(value) => char::from_digit(value, 10).unwrap_or(ch),
                None => ch,
            })
            .collect();
    }

    if kind.is_decimal_like() {
        text = complete_fraction(&text);
    }
    if negative {
        text.insert(0, '-');
    }
    text
}

/// Gives a bare decimal point digits on both sides: `.5` → `0.5`,
/// `5.` → `5.0`, `-.5e3` → `-0.5e3`.
fn complete_fraction(text: &str) -> String {
    let Some(point) = text.find('.') else {
        return text.to_owned();
    };
    let mut out = String::with_capacity(text.len() + 2);
    let (head, tail) = text.split_at(point);
    out.push_str(head);
    if !head.ends_with(|ch: char| ch.is_ascii_digit()) {
        out.push('0');
    }
    out.push('.');
    let tail = &tail[1..];
    if !tail.starts_with(|ch: char| ch.is_ascii_digit()) {
        out.push('0');
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ValueKind::Integer, "1,234", "1234")]
    #[case(ValueKind::Integer, "-17", "-17")]
    #[case(ValueKind::Integer, "+8", "+8")]
    #[case(ValueKind::Float, "-.5", "-0.5")]
    #[case(ValueKind::Float, "5.e3", "5.0e3")]
    #[case(ValueKind::Float, "∞", "Infinity")]
    #[case(ValueKind::Float, "-∞", "-Infinity")]
    #[case(ValueKind::Decimal, "1,000.25", "1000.25")]
    fn normalizes_us_tokens(#[case] kind: ValueKind, #[case] token: &str, #[case] expected: &str) {
        assert_eq!(normalize(kind, token, &Locale::us()), expected);
    }

    #[test]
    fn normalizes_german_separators() {
        assert_eq!(normalize(ValueKind::Float, "-1.234,5", &Locale::germany()), "-1234.5");
        assert_eq!(normalize(ValueKind::Integer, "1.234", &Locale::germany()), "1234");
    }

    #[test]
    fn normalizes_native_digits_and_affixes() {
        let accounting = Locale::us().with_negative_affixes("(", ")");
        assert_eq!(normalize(ValueKind::Integer, "(42)", &accounting), "-42");
        assert_eq!(normalize(ValueKind::Float, "١٬٢٣٤٫٥", &Locale::arabic()), "1234.5");
        assert_eq!(normalize(ValueKind::Float, "ليس رقم", &Locale::arabic()), "NaN");
    }

    #[test]
    fn integer_overflow_is_a_range_failure() {
        assert_eq!(i8::from_normalized("128", 10), Err(ConvertError::OutOfRange));
        assert_eq!(i8::from_normalized("-129", 10), Err(ConvertError::OutOfRange));
        assert_eq!(i8::from_normalized("-128", 10), Ok(-128));
        assert_eq!(i32::from_normalized("7fffffff", 16), Ok(i32::MAX));
        assert_eq!(i32::from_normalized("x", 10), Err(ConvertError::Malformed));
    }

    #[test]
    fn special_floats_parse() {
        assert!(f64::from_normalized("NaN", 10).unwrap().is_nan());
        assert_eq!(f64::from_normalized("-Infinity", 10), Ok(f64::NEG_INFINITY));
        assert_eq!(f32::from_normalized("1e60", 10), Ok(f32::INFINITY));
    }

    #[test]
    fn arbitrary_precision_has_no_width_limit() {
        let big = BigInt::from_normalized("999999999999999999999", 10).unwrap();
        assert_eq!(big.to_string(), "999999999999999999999");
        let dec = BigDecimal::from_normalized("-0.5e3", 10).unwrap();
        assert_eq!(dec, BigDecimal::from(-500));
    }
}
