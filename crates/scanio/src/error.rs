use std::{io, sync::Arc};

use thiserror::Error;

use crate::pattern::PatternError;

/// Errors reported by [`Scanner`](crate::Scanner) operations.
///
/// Grammar, range and no-match failures never move the read position, so an
/// operation that failed with one of them can be retried (or a different
/// operation attempted) on the same input.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    /// Input is exhausted where a token was required.
    #[error("no token available")]
    NoSuchToken,
    /// Input is exhausted where a line was required.
    #[error("no line found")]
    NoLine,
    /// The next token does not conform to the grammar of the requested value.
    #[error("token {token:?} is not a valid {expected}")]
    NotANumber { token: String, expected: String },
    /// The next token does not match the pattern passed to `next_matching`.
    #[error("token {token:?} does not match pattern {pattern:?}")]
    Mismatch { token: String, pattern: String },
    /// The next token conforms to the grammar but does not fit the target.
    #[error("token {token:?} is out of range for {target}")]
    OutOfRange { token: String, target: &'static str },
    #[error("radix {0} is outside the supported range 2..=36")]
    InvalidRadix(u32),
    #[error("horizon must not be negative, got {0}")]
    InvalidHorizon(isize),
    /// An anchored [`skip`](crate::Scanner::skip) found no match.
    #[error("pattern {pattern:?} does not match at the current position")]
    NoMatch { pattern: String },
    /// The last match was queried but no successful match is recorded.
    #[error("no match result available")]
    NoMatchResult,
    #[error("scanner is closed")]
    Closed,
    /// The input source failed while a value was being demanded.
    #[error("input source failed: {0}")]
    SourceFault(#[source] Arc<io::Error>),
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

impl ScanError {
    /// Returns `true` for failures where a token exists but has the wrong
    /// shape for the request.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::NotANumber { .. } | Self::Mismatch { .. })
    }
}

/// Failure of a [`Scannable`](crate::Scannable) conversion from normalized
/// text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("malformed numeral")]
    Malformed,
    #[error("numeral out of range")]
    OutOfRange,
}
