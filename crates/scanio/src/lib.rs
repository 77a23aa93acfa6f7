//! A pull-based text scanner.
//!
//! [`Scanner`] breaks a character stream into tokens separated by a delimiter
//! pattern and reads them as strings, lines, pattern matches or typed values
//! (booleans, fixed-width and arbitrary-precision integers in any radix from
//! 2 to 36, floats and decimals with locale-specific separators and digits).
//! Input is read lazily from a [`Source`], so the scanner works the same over
//! in-memory text and over an interactive stream that delivers characters a
//! few at a time.
//!
//! ```rust
//! use scanio::{Pattern, Scanner};
//!
//! let mut scanner = Scanner::from_text("1 fish 2 fish red fish blue fish");
//! scanner.use_delimiter(Pattern::new(r"\s*fish\s*")?);
//! assert_eq!(scanner.next_i32()?, 1);
//! assert_eq!(scanner.next_i32()?, 2);
//! assert_eq!(scanner.next()?, "red");
//! assert_eq!(scanner.next()?, "blue");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every operation returns a [`ScanError`] on failure. Failures caused by the
//! shape of the next token leave the read position untouched, so another
//! reading can be attempted.

#![allow(missing_docs)]

mod buffer;
mod console;
mod convert;
mod error;
mod grammar;
mod iter;
mod locale;
mod options;
mod pattern;
mod printer;
mod scanner;
mod source;

#[cfg(test)]
mod tests;

pub use bigdecimal::BigDecimal;
pub use console::Console;
pub use convert::{Scannable, ValueKind};
pub use error::{ConvertError, ScanError};
pub use iter::{FindAll, Tokens};
pub use locale::Locale;
pub use num_bigint::BigInt;
pub use options::{DEFAULT_READ_CHUNK, ScannerOptions};
pub use pattern::{MatchResult, Pattern, PatternError};
pub use printer::Printer;
pub use scanner::Scanner;
pub use source::{ReaderSource, Source, StrSource};
