//! Append-only text output with a latched error flag.

use std::{
    fmt::{self, Display},
    io::{self, Stdout, Write},
    ops::Range,
};

use tracing::debug;

/// An output sink that never fails loudly.
///
/// Write faults are swallowed and latch an error flag that
/// [`check_error`](Printer::check_error) reports, so a long run of output
/// calls needs a single check at the end.
///
/// ```rust
/// use std::fmt::Write as _;
///
/// use scanio::Printer;
///
/// let mut out = Printer::new(Vec::new());
/// out.print("x = ").println(42);
/// write!(out, "{:>4}", 7)?;
/// assert!(!out.check_error());
/// assert_eq!(out.into_inner(), b"x = 42\n   7");
/// # Ok::<(), std::fmt::Error>(())
/// ```
#[derive(Debug)]
pub struct Printer<W: Write> {
    inner: W,
    failed: bool,
}

impl<W: Write> Printer<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failed: false,
        }
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(err) = self.inner.write_all(bytes) {
            self.fault(&err);
        }
    }

    fn fault(&mut self, err: &io::Error) {
        debug!(error = %err, "printer write fault");
        self.failed = true;
    }

    pub fn print(&mut self, value: impl Display) -> &mut Self {
        self.printf(format_args!("{value}"))
    }

    /// Prints `value` followed by a line terminator.
    pub fn println(&mut self, value: impl Display) -> &mut Self {
        self.printf(format_args!("{value}\n"))
    }

    pub fn newline(&mut self) -> &mut Self {
        self.emit(b"\n");
        self
    }

    /// Prints preformatted arguments; use with [`format_args!`].
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        if let Err(err) = self.inner.write_fmt(args) {
            self.fault(&err);
        }
        self
    }

    pub fn print_chars(&mut self, chars: &[char]) -> &mut Self {
        let text: String = chars.iter().collect();
        self.emit(text.as_bytes());
        self
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.emit(text.as_bytes());
        self
    }

    pub fn append_char(&mut self, ch: char) -> &mut Self {
        self.emit(ch.encode_utf8(&mut [0; 4]).as_bytes());
        self
    }

    /// Appends the characters of `text` at character indices `range`. The
    /// range is clamped to the text.
    pub fn append_range(&mut self, text: &str, range: Range<usize>) -> &mut Self {
        let len = range.end.saturating_sub(range.start);
        let part: String = text.chars().skip(range.start).take(len).collect();
        self.emit(part.as_bytes());
        self
    }

    pub fn write_byte(&mut self, byte: u8) -> &mut Self {
        self.emit(&[byte]);
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.emit(bytes);
        self
    }

    pub fn flush(&mut self) -> &mut Self {
        if let Err(err) = self.inner.flush() {
            self.fault(&err);
        }
        self
    }

    /// Flushes, then reports whether any write fault has been seen.
    pub fn check_error(&mut self) -> bool {
        self.flush();
        self.failed
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl Printer<Stdout> {
    /// Binds the process standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> fmt::Write for Printer<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}
