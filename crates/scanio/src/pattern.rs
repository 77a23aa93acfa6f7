//! Compiled patterns and match results.
//!
//! A [`Pattern`] carries two compiled forms of the same expression:
//! - a `regex_automata` meta regex used for searches over the scanner's
//!   buffer. Searches take an explicit window (`Input::range`), so look-around
//!   assertions see text outside the window (transparent bounds) while `^` and
//!   `$` keep referring to the edges of the buffered text (non-anchoring
//!   bounds).
//! - a `regex` regex wrapped as `\A(?:...)\z`, used when a complete token must
//!   match.
//!
//! Both forms share capture group numbering, so a [`MatchResult`] looks the
//! same whichever one produced it.
//!
//! A lazy DFA of the expression tells whether a match attempt is still alive
//! at the end of the buffered text, which is when more input could change
//! the outcome of a search.

use std::{
    fmt,
    ops::Range,
    sync::{Arc, LazyLock},
};

use regex_automata::{
    Anchored, Input,
    hybrid::{
        LazyStateID,
        dfa::{Cache, DFA},
    },
    meta,
};
use thiserror::Error;

/// Default delimiter: one or more whitespace characters.
pub(crate) static WHITESPACE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(r"\s+").expect("whitespace pattern compiles"));

/// A single line terminator of any recognized form.
pub(crate) static LINE_SEPARATOR: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(r"\r\n|[\n\r\u{2028}\u{2029}\u{85}]").expect("line separator pattern compiles")
});

/// Group names of a match without named groups.
pub(crate) fn unnamed(groups: usize) -> Arc<[Option<Arc<str>>]> {
    Arc::from(vec![None; groups])
}

/// Error returned when a pattern fails to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid pattern {pattern:?}: {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, message: impl fmt::Display) -> Self {
        Self {
            pattern: pattern.to_owned(),
            message: message.to_string(),
        }
    }
}

/// Capture spans of a single match, indexed by group. Offsets are relative to
/// the haystack that was searched.
pub(crate) type Spans = Vec<Option<Range<usize>>>;

/// Span of the whole match (group 0).
pub(crate) fn whole_span(spans: &Spans) -> Range<usize> {
    spans.first().cloned().flatten().unwrap_or(0..0)
}

/// A compiled regular expression usable as a delimiter or search pattern.
///
/// Cloning is cheap; compiled state is shared.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    search: meta::Regex,
    whole: regex::Regex,
    /// `None` when the expression has no lazy DFA form.
    lazy: Option<Arc<DFA>>,
    names: Arc<[Option<Arc<str>>]>,
}

impl Pattern {
    /// Compiles `pattern` using the `regex` crate syntax.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression is invalid.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let whole = regex::Regex::new(&format!(r"\A(?:{pattern})\z"))
            .map_err(|err| PatternError::new(pattern, err))?;
        let search = meta::Regex::new(pattern).map_err(|err| PatternError::new(pattern, err))?;
        let lazy = DFA::builder()
            .configure(DFA::config().unicode_word_boundary(true))
            .build(pattern)
            .ok()
            .map(Arc::new);
        let names = whole
            .capture_names()
            .map(|name| name.map(Arc::from))
            .collect();
        Ok(Self {
            source: Arc::from(pattern),
            search,
            whole,
            lazy,
            names,
        })
    }

    /// Compiles a pattern matching `literal` verbatim.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the escaped text is always a valid pattern.
    pub fn literal(literal: &str) -> Result<Self, PatternError> {
        Self::new(&regex::escape(literal))
    }

    /// The source text this pattern was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the whole of `text` matches this pattern.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.whole.is_match(text)
    }

    /// Searches `haystack` within `window`. With `anchored`, the match must
    /// start at `window.start`.
    pub(crate) fn search(
        &self,
        haystack: &str,
        window: Range<usize>,
        anchored: bool,
    ) -> Option<Spans> {
        let mut input = Input::new(haystack).range(window);
        if anchored {
            input = input.anchored(Anchored::Yes);
        }
        let mut caps = self.search.create_captures();
        self.search.search_captures(&input, &mut caps);
        if !caps.is_match() {
            return None;
        }
        Some(
            (0..caps.group_len())
                .map(|group| caps.get_group(group).map(|span| span.range()))
                .collect(),
        )
    }

    /// Whether a match attempt over `haystack` from `from` is still alive at
    /// the end of `haystack`, so that more text could extend, complete or
    /// replace its outcome. `None` when the lazy DFA cannot tell.
    pub(crate) fn live_at_end(&self, haystack: &str, from: usize, anchored: bool) -> Option<bool> {
        let dfa = self.lazy.as_deref()?;
        live_at_end(dfa, &mut dfa.create_cache(), haystack, from, anchored)
    }

    /// Whether a match could still start in `from..before` once more text
    /// follows `haystack`. `None` when the lazy DFA cannot tell.
    pub(crate) fn may_start_before(&self, haystack: &str, from: usize, before: usize) -> Option<bool> {
        let dfa = self.lazy.as_deref()?;
        let mut cache = dfa.create_cache();
        for (at, _) in haystack[from..before].char_indices() {
            if live_at_end(dfa, &mut cache, haystack, from + at, true)? {
                return Some(true);
            }
        }
        Some(false)
    }

    /// Matches the whole of `text`, returning capture spans relative to it.
    pub(crate) fn whole_match(&self, text: &str) -> Option<Spans> {
        let caps = self.whole.captures(text)?;
        Some(
            (0..caps.len())
                .map(|group| caps.get(group).map(|m| m.range()))
                .collect(),
        )
    }

    pub(crate) fn names(&self) -> Arc<[Option<Arc<str>>]> {
        Arc::clone(&self.names)
    }
}

/// Steps `dfa` over `haystack[from..]` and reports whether the attempt is
/// still undecided at the end: some continuation keeps a match thread
/// alive, or the match found so far holds only because the text ends there.
fn live_at_end(
    dfa: &DFA,
    cache: &mut Cache,
    haystack: &str,
    from: usize,
    anchored: bool,
) -> Option<bool> {
    let mut input = Input::new(haystack).range(from..haystack.len());
    if anchored {
        input = input.anchored(Anchored::Yes);
    }
    let mut state = dfa.start_state_forward(cache, &input).ok()?;
    for &byte in &haystack.as_bytes()[from..] {
        if state.is_dead() {
            return Some(false);
        }
        state = step(dfa, cache, state, byte)?;
    }
    if state.is_dead() {
        return Some(false);
    }

    // Bytes the DFA cannot judge (non-ASCII around a Unicode word boundary)
    // are left out of the look ahead.
    let mut needs_end = false;
    for byte in representatives(dfa) {
        let Some(next) = step(dfa, cache, state, byte) else {
            continue;
        };
        if next.is_dead() {
            needs_end = true;
            continue;
        }
        // A match state reached on any byte may only be reporting the match
        // that already ended; it grows only if it still has somewhere to go.
        if !next.is_match() {
            return Some(true);
        }
        for byte in representatives(dfa) {
            if step(dfa, cache, next, byte).is_some_and(|after| !after.is_dead()) {
                return Some(true);
            }
        }
    }
    let at_end = dfa.next_eoi_state(cache, state).ok()?;
    Some(needs_end && at_end.is_match())
}

/// One transition, or `None` once the DFA gives up on the input.
fn step(dfa: &DFA, cache: &mut Cache, state: LazyStateID, byte: u8) -> Option<LazyStateID> {
    let next = dfa.next_state(cache, state, byte).ok()?;
    (!next.is_quit()).then_some(next)
}

/// One byte from each equivalence class of the DFA's alphabet.
fn representatives(dfa: &DFA) -> impl Iterator<Item = u8> + '_ {
    dfa.byte_classes()
        .representatives(..)
        .filter_map(|unit| unit.as_u8())
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

/// The outcome of a successful match-producing scanner operation.
///
/// Offsets are byte offsets into the input stream. The result owns its text,
/// so it stays valid while the scanner moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    start: usize,
    text: String,
    groups: Vec<Option<Range<usize>>>,
    names: Arc<[Option<Arc<str>>]>,
}

impl MatchResult {
    /// Builds a result from spans measured against `haystack`, whose first
    /// byte sits at stream offset `base`.
    pub(crate) fn from_spans(
        haystack: &str,
        base: usize,
        spans: &Spans,
        names: Arc<[Option<Arc<str>>]>,
    ) -> Self {
        let whole = whole_span(spans);
        let groups = spans
            .iter()
            .map(|span| {
                span.as_ref()
                    .map(|span| span.start - whole.start..span.end - whole.start)
            })
            .collect();
        Self {
            start: base + whole.start,
            text: haystack[whole].to_owned(),
            groups,
            names,
        }
    }

    /// A result covering an entire token with no capture groups.
    pub(crate) fn token(token: &str, start: usize) -> Self {
        Self {
            start,
            text: token.to_owned(),
            groups: vec![Some(0..token.len())],
            names: Arc::from(vec![None]),
        }
    }

    /// Stream offset of the first byte of the match.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Stream offset one past the last byte of the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// The matched text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of capture groups, not counting group 0.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Text captured by group `index`; group 0 is the whole match. `None` if
    /// the group does not exist or did not participate.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        let span = self.groups.get(index)?.clone()?;
        Some(&self.text[span])
    }

    /// Text captured by the group called `name`.
    #[must_use]
    pub fn name(&self, name: &str) -> Option<&str> {
        let index = self
            .names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))?;
        self.group(index)
    }

    /// Stream range of group `index`.
    #[must_use]
    pub fn group_range(&self, index: usize) -> Option<Range<usize>> {
        let span = self.groups.get(index)?.clone()?;
        Some(self.start + span.start..self.start + span.end)
    }
}
