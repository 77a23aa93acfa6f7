//! Pattern searches that ignore the delimiter.

use crate::{
    error::ScanError,
    pattern::{MatchResult, Pattern, Spans, whole_span},
    source::Source,
};

use super::Scanner;

impl<S: Source> Scanner<S> {
    /// Finds the first match of `pattern` at or after the read position
    /// without consuming it. A `horizon` above zero bounds the search to that
    /// many characters; zero searches all remaining input.
    ///
    /// Spans are relative to the buffered text.
    pub(super) fn search(
        &mut self,
        pattern: &Pattern,
        horizon: usize,
    ) -> Result<Option<Spans>, ScanError> {
        if horizon > 0 {
            // One character past the horizon lets look-ahead see beyond it.
            self.ensure_available(horizon.saturating_add(1))?;
        }
        loop {
            let text = self.buf.text();
            let pos = self.buf.position();
            let horizon_end = if horizon > 0 {
                self.buf.advance_chars(pos, horizon)
            } else {
                None
            };
            let limit = horizon_end.unwrap_or(text.len());
            let more = horizon_end.is_none() && !self.buf.is_exhausted();
            match pattern.search(text, pos..limit, false) {
                // An attempt still alive at the edge of the buffer could grow
                // this match or beat it with an earlier start.
                Some(spans)
                    if !more
                        || !pattern
                            .live_at_end(text, pos, false)
                            .unwrap_or(whole_span(&spans).end == limit) =>
                {
                    return Ok(Some(spans));
                }
                None if !more => return Ok(None),
                _ => self.fill()?,
            }
        }
    }

    pub(crate) fn find_match(
        &mut self,
        pattern: &Pattern,
        horizon: usize,
    ) -> Result<Option<MatchResult>, ScanError> {
        self.begin_consuming()?;
        Ok(self
            .search(pattern, horizon)?
            .map(|spans| self.consume_match(&spans, pattern.names())))
    }

    /// Searches for `pattern` ignoring delimiters, at most `horizon`
    /// characters ahead of the read position (`0` means unbounded). On a
    /// match, consumes through its end and returns the matched text.
    ///
    /// A match may not extend past the horizon, but look-around may inspect
    /// text beyond it.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidHorizon`] if `horizon` is negative; nothing is
    /// read.
    pub fn find_within_horizon(
        &mut self,
        pattern: &Pattern,
        horizon: isize,
    ) -> Result<Option<String>, ScanError> {
        self.ensure_open()?;
        let horizon = usize::try_from(horizon).map_err(|_| ScanError::InvalidHorizon(horizon))?;
        Ok(self
            .find_match(pattern, horizon)?
            .map(|found| found.as_str().to_owned()))
    }

    /// Searches for `pattern` up to the next line terminator. On a match,
    /// consumes through its end and returns the matched text.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] on a closed scanner.
    pub fn find_in_line(&mut self, pattern: &Pattern) -> Result<Option<String>, ScanError> {
        self.begin_consuming()?;
        let line_end = match self.line_terminator()? {
            Some(terminator) => terminator.start,
            None => self.buf.len(),
        };
        let horizon = self.buf.char_count(self.buf.position(), line_end);
        if horizon == 0 {
            return Ok(None);
        }
        Ok(self
            .search(pattern, horizon)?
            .map(|spans| self.consume_match(&spans, pattern.names()).as_str().to_owned()))
    }

    /// Matches `pattern` anchored at the read position, ignoring delimiters,
    /// and consumes the match.
    ///
    /// Input is read while a match could still grow, and while a miss could
    /// still turn into a match.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoMatch`] if `pattern` does not match here; nothing is
    /// consumed.
    pub fn skip(&mut self, pattern: &Pattern) -> Result<&mut Self, ScanError> {
        self.begin_consuming()?;
        loop {
            let text = self.buf.text();
            let pos = self.buf.position();
            let len = text.len();
            let exhausted = self.buf.is_exhausted();
            let found = pattern.search(text, pos..len, true);
            let settled = exhausted
                || !pattern
                    .live_at_end(text, pos, true)
                    .unwrap_or_else(|| found.as_ref().is_none_or(|spans| whole_span(spans).end == len));
            match found {
                Some(spans) if settled => {
                    self.consume_match(&spans, pattern.names());
                    return Ok(self);
                }
                None if settled => return Err(self.exhausted_error(no_match(pattern))),
                _ => self.fill()?,
            }
        }
    }

    /// Steps over one character. `false` when none remains.
    pub(crate) fn step_char(&mut self) -> Result<bool, ScanError> {
        if self.ensure_available(1)? == 0 {
            return Ok(false);
        }
        let pos = self.buf.position();
        match self.buf.advance_chars(pos, 1) {
            Some(next) => {
                self.buf.set_position(next);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn no_match(pattern: &Pattern) -> ScanError {
    ScanError::NoMatch {
        pattern: pattern.as_str().to_owned(),
    }
}
