use std::{io, sync::Arc};

use tracing::{debug, trace};

use crate::source::Source;

/// Consumed bytes tolerated before the buffer discards its prefix.
const COMPACT_THRESHOLD: usize = 4 * 1024;

/// Growable window over the input stream.
///
/// `text` holds everything read but not yet discarded; `pos` is the read
/// position within it. Refills only ever append, so unconsumed text is never
/// lost. Offsets handed out by the buffer are byte indices into `text` and
/// stay valid until the next [`compact`](Buffer::compact).
#[derive(Debug)]
pub(crate) struct Buffer {
    text: String,
    pos: usize,
    /// Bytes dropped from the front of `text` so far.
    discarded: usize,
    exhausted: bool,
    /// The stream ended on a read fault rather than at its end.
    truncated: bool,
    fault: Option<Arc<io::Error>>,
    chunk: usize,
}

impl Buffer {
    pub(crate) fn new(chunk: usize) -> Self {
        Self {
            text: String::new(),
            pos: 0,
            discarded: 0,
            exhausted: false,
            truncated: false,
            fault: None,
            chunk: chunk.max(1),
        }
    }

    #[inline]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    pub(crate) fn set_position(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.pos = pos;
    }

    /// Translates a buffer index into a stream offset.
    #[inline]
    pub(crate) fn stream_offset(&self, idx: usize) -> usize {
        self.discarded + idx
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether the buffered tail was cut short by a read fault. Stays set
    /// after the fault itself is taken.
    #[inline]
    pub(crate) fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn fault(&self) -> Option<&Arc<io::Error>> {
        self.fault.as_ref()
    }

    pub(crate) fn take_fault(&mut self) -> Option<Arc<io::Error>> {
        self.fault.take()
    }

    pub(crate) fn record_fault(&mut self, err: io::Error) {
        debug!(error = %err, "input source fault recorded");
        self.fault = Some(Arc::new(err));
    }

    /// Stops all further reads.
    pub(crate) fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Performs one read from `source`, appending to the buffered text.
    ///
    /// A fault is recorded and ends the stream.
    pub(crate) fn refill<S: Source + ?Sized>(&mut self, source: &mut S) {
        if self.exhausted {
            return;
        }
        match source.read_chars(&mut self.text, self.chunk) {
            Ok(0) => {
                trace!(buffered = self.text.len() - self.pos, "input exhausted");
                self.exhausted = true;
            }
            Ok(read) => trace!(read, buffered = self.text.len() - self.pos, "buffer refilled"),
            Err(err) => {
                self.record_fault(err);
                self.exhausted = true;
                self.truncated = true;
            }
        }
    }

    /// Reads until at least `n` characters follow the read position or the
    /// stream ends. Returns how many of the `n` characters are available.
    pub(crate) fn ensure_available<S: Source + ?Sized>(&mut self, source: &mut S, n: usize) -> usize {
        loop {
            let available = self.text[self.pos..].chars().take(n).count();
            if available == n || self.exhausted {
                return available;
            }
            self.refill(source);
        }
    }

    /// Byte index `n` characters after `from`, or `None` if fewer than `n`
    /// characters are buffered.
    pub(crate) fn advance_chars(&self, from: usize, n: usize) -> Option<usize> {
        if n == 0 {
            return Some(from);
        }
        let rest = &self.text[from..];
        match rest.char_indices().nth(n) {
            Some((at, _)) => Some(from + at),
            None if rest.chars().count() == n => Some(self.text.len()),
            None => None,
        }
    }

    /// Number of characters in `range`.
    pub(crate) fn char_count(&self, from: usize, to: usize) -> usize {
        self.text[from..to].chars().count()
    }

    /// Drops consumed text once enough has piled up. The character just
    /// before the read position is kept as look-behind context.
    pub(crate) fn compact(&mut self) {
        if self.pos < COMPACT_THRESHOLD {
            return;
        }
        let keep_from = self.text[..self.pos]
            .char_indices()
            .next_back()
            .map_or(self.pos, |(at, _)| at);
        self.text.drain(..keep_from);
        self.discarded += keep_from;
        self.pos -= keep_from;
        trace!(discarded = self.discarded, "buffer compacted");
    }
}
