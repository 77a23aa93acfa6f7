use crate::{
    locale::Locale,
    pattern::{Pattern, WHITESPACE},
};

/// Default number of characters requested from the source per read.
pub const DEFAULT_READ_CHUNK: usize = 1024;

/// Configuration for a [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use scanio::{Pattern, Scanner, ScannerOptions, StrSource};
///
/// let options = ScannerOptions {
///     delimiter: Pattern::new(r"\s*;\s*")?,
///     radix: 16,
///     ..Default::default()
/// };
/// let mut scanner = Scanner::with_options(StrSource::new("ff ; 10"), options)?;
/// assert_eq!(scanner.next_i32()?, 255);
/// assert_eq!(scanner.next_i32()?, 16);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Default
///
/// Whitespace delimiter (`\s+`), [`Locale::us`], radix 10, and
/// [`DEFAULT_READ_CHUNK`] characters per read.
#[derive(Debug, Clone)]
pub struct ScannerOptions {
    /// Pattern separating tokens.
    pub delimiter: Pattern,

    /// Numeral symbols used by typed reads.
    pub locale: Locale,

    /// Default radix of integer reads; must lie in `2..=36`.
    pub radix: u32,

    /// Number of characters asked of the source per read. The source may
    /// return fewer or more.
    pub read_chunk: usize,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            delimiter: WHITESPACE.clone(),
            locale: Locale::default(),
            radix: 10,
            read_chunk: DEFAULT_READ_CHUNK,
        }
    }
}
