//! Input sources the scanner pulls characters from.

use std::{
    borrow::Cow,
    io::{self, Read, StdinLock},
};

use bstr::ByteSlice;

/// A blocking supplier of characters.
///
/// Implementations append decoded text to `dst` and return how many
/// characters they appended. `Ok(0)` signals the end of the stream; the
/// scanner stops reading after it, and after any error.
pub trait Source {
    /// Reads more characters into `dst`, blocking until at least one is
    /// available or the stream ends. `hint` is the number of characters the
    /// scanner would like; implementations may return fewer or more.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. The scanner records it and treats
    /// the stream as ended.
    fn read_chars(&mut self, dst: &mut String, hint: usize) -> io::Result<usize>;

    /// Releases the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns the error raised while closing.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read_chars(&mut self, dst: &mut String, hint: usize) -> io::Result<usize> {
        (**self).read_chars(dst, hint)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn read_chars(&mut self, dst: &mut String, hint: usize) -> io::Result<usize> {
        (**self).read_chars(dst, hint)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// In-memory text.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    text: Cow<'a, str>,
    offset: usize,
    chunk: Option<usize>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
            chunk: None,
        }
    }

    /// Hands out at most `chunk` characters per read, regardless of the
    /// scanner's hint. Useful for exercising incremental input.
    #[must_use]
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = Some(chunk.max(1));
        self
    }

    /// The text not yet handed to the scanner.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.text[self.offset..]
    }
}

impl Source for StrSource<'_> {
    fn read_chars(&mut self, dst: &mut String, hint: usize) -> io::Result<usize> {
        let want = self.chunk.unwrap_or(hint).max(1);
        let rest = &self.text[self.offset..];
        let (len, count) = rest
            .char_indices()
            .take(want)
            .fold((0, 0), |(_, count), (at, ch)| (at + ch.len_utf8(), count + 1));
        dst.push_str(&rest[..len]);
        self.offset += len;
        Ok(count)
    }
}

const READ_BYTES: usize = 8 * 1024;

/// Decodes UTF-8 from a byte reader.
///
/// Multi-byte sequences split across reads are carried to the next read.
/// Invalid bytes, and a sequence cut short by the end of the stream, decode
/// to U+FFFD.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pending: Vec<u8>,
    scratch: Box<[u8]>,
    eof: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            scratch: vec![0; READ_BYTES].into_boxed_slice(),
            eof: false,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Moves every complete sequence of `pending` into `dst`.
    fn decode(&mut self, dst: &mut String) -> usize {
        let mut consumed = 0;
        let mut appended = 0;
        for chunk in ByteSlice::utf8_chunks(self.pending.as_slice()) {
            let valid = chunk.valid();
            dst.push_str(valid);
            appended += valid.chars().count();
            consumed += valid.len();
            if chunk.invalid().is_empty() {
                continue;
            }
            if chunk.incomplete() && !self.eof {
                break;
            }
            dst.push(char::REPLACEMENT_CHARACTER);
            appended += 1;
            consumed += chunk.invalid().len();
        }
        self.pending.drain(..consumed);
        appended
    }
}

impl ReaderSource<StdinLock<'static>> {
    /// Binds the process standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn read_chars(&mut self, dst: &mut String, _hint: usize) -> io::Result<usize> {
        loop {
            if !self.eof {
                match self.reader.read(&mut self.scratch) {
                    Ok(0) => self.eof = true,
                    Ok(n) => self.pending.extend_from_slice(&self.scratch[..n]),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                }
            }
            let appended = self.decode(dst);
            if appended > 0 || (self.eof && self.pending.is_empty()) {
                return Ok(appended);
            }
        }
    }
}
