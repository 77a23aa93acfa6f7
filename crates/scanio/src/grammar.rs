//! Textual grammars of the value kinds, parameterized by radix and locale.
//!
//! A token must match the grammar of the requested kind before it is
//! normalized and converted; the grammar is what separates a malformed token
//! from one whose value merely does not fit.

use regex::Regex;
use tracing::trace;

use crate::{convert::ValueKind, locale::Locale, pattern::PatternError};

const RADIX_DIGITS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

fn escape_char(ch: char) -> String {
    regex::escape(ch.encode_utf8(&mut [0; 4]))
}

fn class_char(ch: char) -> String {
    format!(r"\x{{{:x}}}", u32::from(ch))
}

/// Native digits of `locale` with values `from..to`, as class members.
fn native_range(locale: &Locale, from: u32, to: u32) -> String {
    if !locale.has_native_digits() || from >= to {
        return String::new();
    }
    match (locale.native_char(from), locale.native_char(to - 1)) {
        (Some(lo), Some(hi)) => format!("{}-{}", class_char(lo), class_char(hi)),
        _ => String::new(),
    }
}

/// Digits valid in `radix`, either case, plus the locale's native digits.
fn radix_digit(radix: u32, locale: &Locale) -> String {
    let count = radix as usize;
    let lower = &RADIX_DIGITS[..count];
    let upper = if count > 10 {
        RADIX_DIGITS[10..count].to_ascii_uppercase()
    } else {
        String::new()
    };
    format!("[{lower}{upper}{}]", native_range(locale, 0, radix.min(10)))
}

fn decimal_digit(locale: &Locale) -> String {
    format!("[0-9{}]", native_range(locale, 0, 10))
}

fn non_zero_digit(locale: &Locale) -> String {
    format!("[1-9{}]", native_range(locale, 1, 10))
}

/// A plain digit run, or a grouped numeral when the locale groups digits.
fn numeral(digit: &str, locale: &Locale) -> String {
    match locale.grouping_separator() {
        Some(separator) => format!(
            "(?:{digit}+|{non_zero}{digit}?{digit}?(?:{sep}{digit}{digit}{digit})+)",
            non_zero = non_zero_digit(locale),
            sep = escape_char(separator),
        ),
        None => format!("(?:{digit}+)"),
    }
}

/// `body` with an ASCII sign, or wrapped in either pair of locale affixes.
fn signed(body: &str, tail: &str, locale: &Locale) -> String {
    format!(
        "(?:[-+]?{body}{tail})|(?:{pp}{body}{ps}{tail})|(?:{np}{body}{ns}{tail})",
        pp = regex::escape(locale.positive_prefix()),
        ps = regex::escape(locale.positive_suffix()),
        np = regex::escape(locale.negative_prefix()),
        ns = regex::escape(locale.negative_suffix()),
    )
}

pub(crate) fn boolean_grammar() -> String {
    "(?i:true|false)".to_owned()
}

pub(crate) fn integer_grammar(radix: u32, locale: &Locale) -> String {
    let digit = radix_digit(radix, locale);
    signed(&numeral(&digit, locale), "", locale)
}

pub(crate) fn decimal_grammar(locale: &Locale) -> String {
    let digit = decimal_digit(locale);
    let numeral = numeral(&digit, locale);
    let point = escape_char(locale.decimal_separator());
    let body = format!("(?:{numeral}|{numeral}{point}{digit}*|{point}{digit}+)");
    let exponent = format!("(?:[eE][+-]?{digit}+)?");
    signed(&body, &exponent, locale)
}

pub(crate) fn float_grammar(locale: &Locale) -> String {
    let special = format!(
        "(?:NaN|{nan}|Infinity|{infinity})",
        nan = regex::escape(locale.nan()),
        infinity = regex::escape(locale.infinity()),
    );
    format!("{}|{}", decimal_grammar(locale), signed(&special, "", locale))
}

fn compile(kind: ValueKind, source: &str) -> Result<Regex, PatternError> {
    trace!(%kind, grammar = source, "compiling value grammar");
    Regex::new(&format!(r"\A(?:{source})\z")).map_err(|err| PatternError::new(source, err))
}

/// Compiled grammars for the scanner's current locale.
///
/// The integer grammar is cached for one radix at a time; asking for another
/// radix recompiles it.
#[derive(Debug, Default)]
pub(crate) struct Grammars {
    boolean: Option<Regex>,
    integer: Option<(u32, Regex)>,
    float: Option<Regex>,
    decimal: Option<Regex>,
}

impl Grammars {
    /// Forgets everything compiled for the previous locale.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn get(
        &mut self,
        kind: ValueKind,
        radix: u32,
        locale: &Locale,
    ) -> Result<&Regex, PatternError> {
        match kind {
            ValueKind::Boolean => {
                let regex = match self.boolean.take() {
                    Some(regex) => regex,
                    None => compile(kind, &boolean_grammar())?,
                };
                Ok(self.boolean.insert(regex))
            }
            ValueKind::Integer => {
                let regex = match self.integer.take() {
                    Some((cached, regex)) if cached == radix => regex,
                    _ => compile(kind, &integer_grammar(radix, locale))?,
                };
                Ok(&self.integer.insert((radix, regex)).1)
            }
            ValueKind::Float => {
                let regex = match self.float.take() {
                    Some(regex) => regex,
                    None => compile(kind, &float_grammar(locale))?,
                };
                Ok(self.float.insert(regex))
            }
            ValueKind::Decimal => {
                let regex = match self.decimal.take() {
                    Some(regex) => regex,
                    None => compile(kind, &decimal_grammar(locale))?,
                };
                Ok(self.decimal.insert(regex))
            }
        }
    }
}
