//! Lazy sequences over a scanner.

use std::iter::FusedIterator;

use crate::{
    error::ScanError,
    pattern::{MatchResult, Pattern},
    scanner::Scanner,
    source::Source,
};

/// Iterator over the remaining tokens. Created by [`Scanner::tokens`].
///
/// Each item is read on demand. The iterator ends when input is exhausted;
/// any other failure is yielded once and ends it as well.
#[derive(Debug)]
pub struct Tokens<S: Source> {
    scanner: Scanner<S>,
    done: bool,
}

impl<S: Source> Tokens<S> {
    /// Gives the scanner back, positioned after the last token yielded.
    #[must_use]
    pub fn into_scanner(self) -> Scanner<S> {
        self.scanner
    }
}

impl<S: Source> Iterator for Tokens<S> {
    type Item = Result<String, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next() {
            Ok(token) => Some(Ok(token)),
            Err(ScanError::NoSuchToken) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: Source> FusedIterator for Tokens<S> {}

/// Iterator over successive matches of a pattern, ignoring delimiters.
/// Created by [`Scanner::find_all`].
///
/// After an empty match the scanner steps over one character, so the
/// iterator always makes progress.
#[derive(Debug)]
pub struct FindAll<S: Source> {
    scanner: Scanner<S>,
    pattern: Pattern,
    done: bool,
}

impl<S: Source> FindAll<S> {
    #[must_use]
    pub fn into_scanner(self) -> Scanner<S> {
        self.scanner
    }
}

impl<S: Source> Iterator for FindAll<S> {
    type Item = Result<MatchResult, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.find_match(&self.pattern, 0) {
            Ok(Some(found)) => {
                if found.as_str().is_empty() && !matches!(self.scanner.step_char(), Ok(true)) {
                    self.done = true;
                }
                Some(Ok(found))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: Source> FusedIterator for FindAll<S> {}

impl<S: Source> Scanner<S> {
    /// Turns the scanner into a lazy iterator over its remaining tokens.
    ///
    /// ```rust
    /// use scanio::Scanner;
    ///
    /// let words: Vec<String> = Scanner::from_text(" a  b\nc ")
    ///     .tokens()
    ///     .collect::<Result<_, _>>()?;
    /// assert_eq!(words, ["a", "b", "c"]);
    /// # Ok::<(), scanio::ScanError>(())
    /// ```
    #[must_use]
    pub fn tokens(self) -> Tokens<S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Turns the scanner into a lazy iterator over every match of
    /// `pattern` in the remaining input.
    #[must_use]
    pub fn find_all(self, pattern: Pattern) -> FindAll<S> {
        FindAll {
            scanner: self,
            pattern,
            done: false,
        }
    }
}
