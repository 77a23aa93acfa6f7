//! The tokenizing scanner.
//!
//! A [`Scanner`] pulls characters from a [`Source`] into an internal buffer
//! and hands them out as tokens separated by the delimiter pattern, as lines,
//! as pattern matches or as typed values. It reads lazily: an operation only
//! reads as much input as it needs to decide, so a scanner over an
//! interactive stream never blocks on input it does not require.
//!
//! ## Tokens
//!
//! A token is the text between the read position (after at most one
//! delimiter match is skipped) and the start of the next delimiter match.
//! A token is only complete once the start of the following delimiter is
//! settled or the input has ended. While a delimiter attempt that began
//! inside the token is still alive at the end of the buffered text, more
//! input is read, so the tokens do not depend on how the source splits its
//! reads.
//!
//! ## Failures
//!
//! Grammar, range and no-match failures never move the read position. A
//! failing source ends the stream: tokens that were already complete are
//! still returned, and the fault surfaces as [`ScanError::SourceFault`] once
//! a value is demanded that the remaining input cannot supply.

mod search;
mod values;

use std::{
    borrow::Cow,
    fmt,
    io::{self, Read, StdinLock},
    ops::Range,
    sync::Arc,
};

use tracing::debug;

use crate::{
    buffer::Buffer,
    error::ScanError,
    grammar::Grammars,
    locale::Locale,
    options::ScannerOptions,
    pattern::{LINE_SEPARATOR, MatchResult, Pattern, Spans, WHITESPACE, unnamed, whole_span},
    source::{ReaderSource, Source, StrSource},
};

/// Validates a radix for integer reads.
pub(crate) fn check_radix(radix: u32) -> Result<u32, ScanError> {
    if (2..=36).contains(&radix) {
        Ok(radix)
    } else {
        Err(ScanError::InvalidRadix(radix))
    }
}

/// Where the next token stands in the buffered text.
enum Probe {
    Found(Range<usize>),
    /// The buffered text cannot decide yet.
    NeedInput,
    /// No token remains.
    Exhausted,
}

/// A text scanner over a character [`Source`].
///
/// ```rust
/// use scanio::Scanner;
///
/// let mut scanner = Scanner::from_text("fish 1 2 red");
/// assert_eq!(scanner.next()?, "fish");
/// assert_eq!(scanner.next_i32()?, 1);
/// assert!(scanner.has_next_i32()?);
/// assert_eq!(scanner.next_i64()?, 2);
/// assert!(!scanner.has_next_i32()?);
/// assert_eq!(scanner.next()?, "red");
/// assert!(!scanner.has_next()?);
/// # Ok::<(), scanio::ScanError>(())
/// ```
pub struct Scanner<S: Source> {
    /// `None` once closed.
    source: Option<S>,
    buf: Buffer,
    delimiter: Pattern,
    locale: Locale,
    radix: u32,
    grammars: Grammars,
    last_match: Option<MatchResult>,
}

impl<S: Source> Scanner<S> {
    /// Creates a scanner with the default options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::from_parts(source, ScannerOptions::default())
    }

    /// Creates a scanner with explicit options.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRadix`] if `options.radix` is outside `2..=36`.
    pub fn with_options(source: S, options: ScannerOptions) -> Result<Self, ScanError> {
        check_radix(options.radix)?;
        Ok(Self::from_parts(source, options))
    }

    fn from_parts(source: S, options: ScannerOptions) -> Self {
        Self {
            source: Some(source),
            buf: Buffer::new(options.read_chunk),
            delimiter: options.delimiter,
            locale: options.locale,
            radix: options.radix,
            grammars: Grammars::default(),
            last_match: None,
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn delimiter(&self) -> &Pattern {
        &self.delimiter
    }

    /// Replaces the delimiter pattern. Takes effect at the next token.
    pub fn use_delimiter(&mut self, delimiter: Pattern) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Replaces the locale; numeric grammars are rebuilt on next use.
    pub fn use_locale(&mut self, locale: Locale) -> &mut Self {
        self.locale = locale;
        self.grammars.clear();
        self
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Sets the default radix of integer reads.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRadix`] if `radix` is outside `2..=36`; the
    /// current radix is kept. [`ScanError::Closed`] on a closed scanner.
    pub fn use_radix(&mut self, radix: u32) -> Result<&mut Self, ScanError> {
        self.ensure_open()?;
        self.radix = check_radix(radix)?;
        Ok(self)
    }

    /// Restores the whitespace delimiter, the default locale and radix 10.
    pub fn reset(&mut self) -> &mut Self {
        self.delimiter = WHITESPACE.clone();
        self.use_locale(Locale::default());
        self.radix = 10;
        self
    }

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------

    /// Stream offset, in bytes, of the read position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buf.stream_offset(self.buf.position())
    }

    /// The result of the last successful match-producing operation.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoMatchResult`] if no such operation succeeded since the
    /// last consuming operation started.
    pub fn last_match(&self) -> Result<&MatchResult, ScanError> {
        self.last_match.as_ref().ok_or(ScanError::NoMatchResult)
    }

    /// The fault recorded from the source, if any.
    #[must_use]
    pub fn last_fault(&self) -> Option<&io::Error> {
        self.buf.fault().map(|fault| &**fault)
    }

    /// Removes and returns the recorded fault. The stream stays ended.
    pub fn take_fault(&mut self) -> Option<Arc<io::Error>> {
        self.buf.take_fault()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Closes the scanner and its source. Closing twice has no effect.
    ///
    /// An error raised by the source while closing is recorded as the
    /// scanner's fault.
    pub fn close(&mut self) {
        if let Some(mut source) = self.source.take() {
            if let Err(err) = source.close() {
                self.buf.record_fault(err);
            }
            debug!(position = self.position(), "scanner closed");
        }
        self.buf.mark_exhausted();
        self.last_match = None;
    }

    // ---------------------------------------------------------------------
    // Buffer plumbing
    // ---------------------------------------------------------------------

    fn ensure_open(&self) -> Result<(), ScanError> {
        if self.source.is_none() {
            return Err(ScanError::Closed);
        }
        Ok(())
    }

    /// Prologue of every operation.
    fn begin(&mut self) -> Result<(), ScanError> {
        self.ensure_open()?;
        self.buf.compact();
        Ok(())
    }

    /// Prologue of every consuming operation.
    fn begin_consuming(&mut self) -> Result<(), ScanError> {
        self.begin()?;
        self.last_match = None;
        Ok(())
    }

    fn fill(&mut self) -> Result<(), ScanError> {
        let source = self.source.as_mut().ok_or(ScanError::Closed)?;
        self.buf.refill(source);
        Ok(())
    }

    fn ensure_available(&mut self, n: usize) -> Result<usize, ScanError> {
        let source = self.source.as_mut().ok_or(ScanError::Closed)?;
        Ok(self.buf.ensure_available(source, n))
    }

    /// The recorded fault if there is one, `otherwise` if not.
    fn exhausted_error(&self, otherwise: ScanError) -> ScanError {
        match self.buf.fault() {
            Some(fault) => ScanError::SourceFault(Arc::clone(fault)),
            None => otherwise,
        }
    }

    /// Records a match over the buffered text and moves past it.
    fn consume_match(&mut self, spans: &Spans, names: Arc<[Option<Arc<str>>]>) -> MatchResult {
        let found = MatchResult::from_spans(self.buf.text(), self.buf.stream_offset(0), spans, names);
        self.buf.set_position(whole_span(spans).end);
        self.last_match = Some(found.clone());
        found
    }

    // ---------------------------------------------------------------------
    // Tokenizer
    // ---------------------------------------------------------------------

    fn locate_token(&self) -> Probe {
        let text = self.buf.text();
        let len = text.len();
        let exhausted = self.buf.is_exhausted();
        let mut start = self.buf.position();

        // At most one leading delimiter is skipped, and only once it can no
        // longer grow or appear.
        let lead = self.delimiter.search(text, start..len, true);
        let lead_end = lead.as_ref().map(|spans| whole_span(spans).end);
        if !exhausted
            && self
                .delimiter
                .live_at_end(text, start, true)
                .unwrap_or(lead_end == Some(len))
        {
            return Probe::NeedInput;
        }
        if let Some(end) = lead_end {
            start = end;
        }
        if start == len {
            return if exhausted {
                Probe::Exhausted
            } else {
                Probe::NeedInput
            };
        }

        let mut next = self.delimiter.search(text, start..len, false);
        // An empty delimiter match at the token start ends nothing.
        if next
            .as_ref()
            .is_some_and(|spans| whole_span(spans) == (start..start))
        {
            let bump = text[start..]
                .chars()
                .next()
                .map_or(len, |ch| start + ch.len_utf8());
            next = self.delimiter.search(text, bump..len, false);
        }

        match next {
            // The delimiter may still grow, but the token only needs its
            // start, which more input moves only if an earlier attempt is
            // still alive or the match is empty at the end of the buffer.
            Some(spans) if !exhausted && self.delimiter_may_move(start, whole_span(&spans)) => {
                Probe::NeedInput
            }
            Some(spans) => Probe::Found(start..whole_span(&spans).start),
            None if !exhausted => Probe::NeedInput,
            // Text cut short by a fault is not a token.
            None if self.buf.is_truncated() => Probe::Exhausted,
            None => Probe::Found(start..len),
        }
    }

    /// Whether more input could make the delimiter after a token starting at
    /// `start` begin somewhere other than `found.start`.
    fn delimiter_may_move(&self, start: usize, found: Range<usize>) -> bool {
        let text = self.buf.text();
        found == (text.len()..text.len())
            || self
                .delimiter
                .may_start_before(text, start, found.start)
                .unwrap_or(false)
    }

    /// Reads until the next token is decided. `None` when no token remains.
    fn probe_token(&mut self) -> Result<Option<Range<usize>>, ScanError> {
        loop {
            match self.locate_token() {
                Probe::Found(span) => return Ok(Some(span)),
                Probe::Exhausted => return Ok(None),
                Probe::NeedInput => self.fill()?,
            }
        }
    }

    fn require_token(&mut self) -> Result<Range<usize>, ScanError> {
        match self.probe_token()? {
            Some(span) => Ok(span),
            None => Err(self.exhausted_error(ScanError::NoSuchToken)),
        }
    }

    /// Moves past the token at `span`, recording it as the last match.
    fn consume_token(&mut self, span: Range<usize>) -> String {
        let token = self.buf.text()[span.clone()].to_owned();
        self.last_match = Some(MatchResult::token(
            &token,
            self.buf.stream_offset(span.start),
        ));
        self.buf.set_position(span.end);
        token
    }

    /// Returns `true` if another token is available. May block for input;
    /// never consumes.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] on a closed scanner.
    pub fn has_next(&mut self) -> Result<bool, ScanError> {
        self.begin()?;
        Ok(self.probe_token()?.is_some())
    }

    /// Returns the next complete token.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoSuchToken`] when input is exhausted, or
    /// [`ScanError::SourceFault`] when it ended because the source failed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<String, ScanError> {
        self.begin_consuming()?;
        let span = self.require_token()?;
        Ok(self.consume_token(span))
    }

    /// Returns `true` if the next token matches `pattern` in full.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] on a closed scanner.
    pub fn has_next_matching(&mut self, pattern: &Pattern) -> Result<bool, ScanError> {
        self.begin()?;
        Ok(self
            .probe_token()?
            .is_some_and(|span| pattern.matches(&self.buf.text()[span])))
    }

    /// Returns the next token if it matches `pattern` in full. The capture
    /// groups of that match are available through [`last_match`].
    ///
    /// # Errors
    ///
    /// [`ScanError::Mismatch`] if the token does not match; the token is not
    /// consumed.
    ///
    /// [`last_match`]: Scanner::last_match
    pub fn next_matching(&mut self, pattern: &Pattern) -> Result<String, ScanError> {
        self.begin_consuming()?;
        let span = self.require_token()?;
        let token = &self.buf.text()[span.clone()];
        let Some(spans) = pattern.whole_match(token) else {
            return Err(ScanError::Mismatch {
                token: token.to_owned(),
                pattern: pattern.as_str().to_owned(),
            });
        };
        let found = MatchResult::from_spans(
            token,
            self.buf.stream_offset(span.start),
            &spans,
            pattern.names(),
        );
        let token = token.to_owned();
        self.buf.set_position(span.end);
        self.last_match = Some(found);
        Ok(token)
    }

    // ---------------------------------------------------------------------
    // Lines
    // ---------------------------------------------------------------------

    /// Reads until the line at the read position is terminated or input
    /// ends. Returns the span of the terminator, `None` for a final
    /// unterminated line.
    pub(super) fn line_terminator(&mut self) -> Result<Option<Range<usize>>, ScanError> {
        loop {
            let text = self.buf.text();
            let len = text.len();
            let exhausted = self.buf.is_exhausted();
            let found = LINE_SEPARATOR
                .search(text, self.buf.position()..len, false)
                .map(|spans| whole_span(&spans));
            match found {
                // A trailing `\r` may be the first half of `\r\n`.
                Some(span) if exhausted || span.end < len || &text[span.clone()] != "\r" => {
                    return Ok(Some(span));
                }
                None if exhausted => return Ok(None),
                _ => self.fill()?,
            }
        }
    }

    /// Span of the next line including its terminator, and the terminator.
    /// `None` when no whole line remains.
    fn locate_line(&mut self) -> Result<Option<Spans>, ScanError> {
        let pos = self.buf.position();
        Ok(match self.line_terminator()? {
            Some(terminator) => Some(vec![Some(pos..terminator.end), Some(terminator)]),
            // A line cut short by a fault is not a line.
            None if pos == self.buf.len() || self.buf.is_truncated() => None,
            None => Some(vec![Some(pos..self.buf.len()), None]),
        })
    }

    /// Returns `true` if any input remains, terminated or not.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] on a closed scanner.
    pub fn has_next_line(&mut self) -> Result<bool, ScanError> {
        self.begin()?;
        Ok(self.locate_line()?.is_some())
    }

    /// Returns the rest of the current line without its terminator, and moves
    /// past the terminator. The last match covers the line and its
    /// terminator, which is group 1.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoLine`] when no input remains, or
    /// [`ScanError::SourceFault`] when the line was cut short by a failing
    /// source.
    pub fn next_line(&mut self) -> Result<String, ScanError> {
        self.begin_consuming()?;
        let Some(spans) = self.locate_line()? else {
            return Err(self.exhausted_error(ScanError::NoLine));
        };
        let found = self.consume_match(&spans, unnamed(2));
        let line = found.as_str();
        let content = match found.group(1) {
            Some(terminator) => &line[..line.len() - terminator.len()],
            None => line,
        };
        Ok(content.to_owned())
    }
}

impl<'a> Scanner<StrSource<'a>> {
    /// Scans in-memory text.
    #[must_use]
    pub fn from_text(text: impl Into<Cow<'a, str>>) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<R: Read> Scanner<ReaderSource<R>> {
    /// Scans UTF-8 text from a byte reader.
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl Scanner<ReaderSource<StdinLock<'static>>> {
    /// Scans the process standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(ReaderSource::stdin())
    }
}

impl<S: Source> Drop for Scanner<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: Source> fmt::Display for Scanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanner[delimiters={}][position={}][match valid={}][source exhausted={}][closed={}][locale={}][radix={}]",
            self.delimiter,
            self.position(),
            self.last_match.is_some(),
            self.buf.is_exhausted(),
            self.is_closed(),
            self.locale.tag(),
            self.radix,
        )
    }
}

impl<S: Source> fmt::Debug for Scanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("delimiter", &self.delimiter)
            .field("position", &self.position())
            .field("locale", &self.locale.tag())
            .field("radix", &self.radix)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
