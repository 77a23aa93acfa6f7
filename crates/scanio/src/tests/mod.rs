mod lines;
mod search;

use std::{cell::Cell, collections::VecDeque, io, rc::Rc};

use crate::{Pattern, Scanner, Source, StrSource};

/// Scanner over in-memory text with default options.
pub(crate) fn scan(text: &str) -> Scanner<StrSource<'_>> {
    Scanner::from_text(text)
}

pub(crate) fn pattern(source: &str) -> Pattern {
    Pattern::new(source).unwrap()
}

/// Observations shared with a [`Script`] after it moved into a scanner.
#[derive(Clone, Default)]
pub(crate) struct Tally {
    reads: Rc<Cell<usize>>,
    closed: Rc<Cell<bool>>,
}

impl Tally {
    /// Number of `read_chars` calls so far, including the final one.
    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }

    pub(crate) fn closed(&self) -> bool {
        self.closed.get()
    }
}

/// Source that delivers one scripted chunk per read, like an interactive
/// stream, then ends or fails.
pub(crate) struct Script {
    chunks: VecDeque<String>,
    fail_at_end: bool,
    fail_on_close: bool,
    tally: Tally,
}

impl Script {
    pub(crate) fn new(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|&chunk| chunk.to_owned()).collect(),
            fail_at_end: false,
            fail_on_close: false,
            tally: Tally::default(),
        }
    }

    /// Fails the read after the last chunk instead of ending.
    pub(crate) fn failing(mut self) -> Self {
        self.fail_at_end = true;
        self
    }

    pub(crate) fn failing_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }

    pub(crate) fn tally(&self) -> Tally {
        self.tally.clone()
    }
}

impl Source for Script {
    fn read_chars(&mut self, dst: &mut String, _hint: usize) -> io::Result<usize> {
        self.tally.reads.set(self.tally.reads.get() + 1);
        match self.chunks.pop_front() {
            Some(chunk) => {
                dst.push_str(&chunk);
                Ok(chunk.chars().count())
            }
            None if self.fail_at_end => Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset",
            )),
            None => Ok(0),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.tally.closed.set(true);
        if self.fail_on_close {
            return Err(io::Error::other("close failed"));
        }
        Ok(())
    }
}

/// Drains a scanner's tokens.
pub(crate) fn tokens<S: Source>(scanner: Scanner<S>) -> Vec<String> {
    scanner.tokens().map(Result::unwrap).collect()
}
