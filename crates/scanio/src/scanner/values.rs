//! Typed reads: booleans, integers, floats and decimals.
//!
//! Every typed read goes through the same steps:
//! 1. locate the next complete token,
//! 2. match it against the grammar of the requested kind,
//! 3. normalize it and convert it to the target type.
//!
//! `has_next_*` stops after step 2 and never consumes. `next_*` consumes the
//! token only if all three steps succeed.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    convert::{Scannable, normalize},
    error::{ConvertError, ScanError},
    pattern::MatchResult,
    source::Source,
};

use super::{Scanner, check_radix};

impl<S: Source> Scanner<S> {
    /// Returns `true` if the next token conforms to the grammar of `T` in the
    /// current radix.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] on a closed scanner.
    pub fn has_next_value<T: Scannable>(&mut self) -> Result<bool, ScanError> {
        self.has_next_radix::<T>(self.radix)
    }

    /// Like [`has_next_value`](Scanner::has_next_value) with an explicit
    /// radix. Only integer kinds use it.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRadix`] if `radix` is outside `2..=36`.
    pub fn has_next_radix<T: Scannable>(&mut self, radix: u32) -> Result<bool, ScanError> {
        self.ensure_open()?;
        check_radix(radix)?;
        self.begin()?;
        let Some(span) = self.probe_token()? else {
            return Ok(false);
        };
        let grammar = self.grammars.get(T::KIND, radix, &self.locale)?;
        Ok(grammar.is_match(&self.buf.text()[span]))
    }

    /// Reads the next token as a `T` in the current radix.
    ///
    /// ```rust
    /// use scanio::{BigDecimal, Scanner};
    ///
    /// let mut scanner = Scanner::from_text("true 2.50");
    /// assert!(scanner.next_value::<bool>()?);
    /// assert_eq!(scanner.next_value::<BigDecimal>()?.to_string(), "2.50");
    /// # Ok::<(), scanio::ScanError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotANumber`] if the token does not conform to the
    ///   grammar of `T`.
    /// - [`ScanError::OutOfRange`] if it conforms but does not fit.
    /// - [`ScanError::NoSuchToken`] or [`ScanError::SourceFault`] if no token
    ///   remains.
    ///
    /// The token is not consumed on failure.
    pub fn next_value<T: Scannable>(&mut self) -> Result<T, ScanError> {
        self.next_radix(self.radix)
    }

    /// Like [`next_value`](Scanner::next_value) with an explicit radix.
    ///
    /// # Errors
    ///
    /// As [`next_value`](Scanner::next_value), and
    /// [`ScanError::InvalidRadix`] if `radix` is outside `2..=36`.
    pub fn next_radix<T: Scannable>(&mut self, radix: u32) -> Result<T, ScanError> {
        self.ensure_open()?;
        check_radix(radix)?;
        self.begin_consuming()?;
        let span = self.require_token()?;
        let grammar = self.grammars.get(T::KIND, radix, &self.locale)?;
        let token = &self.buf.text()[span.clone()];
        let not_a_number = || ScanError::NotANumber {
            token: token.to_owned(),
            expected: T::KIND.describe(radix),
        };
        if !grammar.is_match(token) {
            return Err(not_a_number());
        }
        let value = T::from_normalized(&normalize(T::KIND, token, &self.locale), radix).map_err(
            |err| match err {
                ConvertError::OutOfRange => ScanError::OutOfRange {
                    token: token.to_owned(),
                    target: T::NAME,
                },
                ConvertError::Malformed => not_a_number(),
            },
        )?;
        let found = MatchResult::token(token, self.buf.stream_offset(span.start));
        self.buf.set_position(span.end);
        self.last_match = Some(found);
        Ok(value)
    }
}

macro_rules! typed_reads {
    ($($ty:ty => $has:ident, $next:ident;)*) => {
        impl<S: Source> Scanner<S> {$(
            #[doc = concat!("Returns `true` if the next token reads as `", stringify!($ty), "`.")]
            ///
            /// # Errors
            ///
            /// [`ScanError::Closed`] on a closed scanner.
            pub fn $has(&mut self) -> Result<bool, ScanError> {
                self.has_next_value::<$ty>()
            }

            #[doc = concat!("Reads the next token as `", stringify!($ty), "`.")]
            ///
            /// # Errors
            ///
            /// See [`next_value`](Scanner::next_value).
            pub fn $next(&mut self) -> Result<$ty, ScanError> {
                self.next_value::<$ty>()
            }
        )*}
    };
}

typed_reads! {
    bool => has_next_bool, next_bool;
    i8 => has_next_i8, next_i8;
    i16 => has_next_i16, next_i16;
    i32 => has_next_i32, next_i32;
    i64 => has_next_i64, next_i64;
    BigInt => has_next_big_int, next_big_int;
    f32 => has_next_f32, next_f32;
    f64 => has_next_f64, next_f64;
    BigDecimal => has_next_big_decimal, next_big_decimal;
}

macro_rules! radix_reads {
    ($($ty:ty => $has:ident, $next:ident;)*) => {
        impl<S: Source> Scanner<S> {$(
            #[doc = concat!("Returns `true` if the next token reads as `", stringify!($ty), "` in `radix`.")]
            ///
            /// # Errors
            ///
            /// [`ScanError::InvalidRadix`] if `radix` is outside `2..=36`.
            pub fn $has(&mut self, radix: u32) -> Result<bool, ScanError> {
                self.has_next_radix::<$ty>(radix)
            }

            #[doc = concat!("Reads the next token as `", stringify!($ty), "` in `radix`.")]
            ///
            /// # Errors
            ///
            /// See [`next_radix`](Scanner::next_radix).
            pub fn $next(&mut self, radix: u32) -> Result<$ty, ScanError> {
                self.next_radix::<$ty>(radix)
            }
        )*}
    };
}

radix_reads! {
    i8 => has_next_i8_radix, next_i8_radix;
    i16 => has_next_i16_radix, next_i16_radix;
    i32 => has_next_i32_radix, next_i32_radix;
    i64 => has_next_i64_radix, next_i64_radix;
    BigInt => has_next_big_int_radix, next_big_int_radix;
}
