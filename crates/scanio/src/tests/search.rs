use rstest::rstest;

use super::{Script, pattern, scan};
use crate::{ScanError, Scanner, StrSource};

#[test]
fn find_in_line_stays_on_current_line() {
    let mut scanner = scan("abc 123 def\nxyz 456");
    let digits = pattern(r"\d+");

    assert_eq!(scanner.find_in_line(&digits).unwrap().as_deref(), Some("123"));
    assert_eq!(scanner.position(), 7);
    assert_eq!(scanner.last_match().unwrap().range(), 4..7);

    assert_eq!(scanner.find_in_line(&pattern("xyz")).unwrap(), None);
    assert_eq!(scanner.position(), 7, "a miss consumes nothing");
    assert!(matches!(scanner.last_match(), Err(ScanError::NoMatchResult)));

    assert_eq!(scanner.next_line().unwrap(), " def");
    assert_eq!(scanner.find_in_line(&digits).unwrap().as_deref(), Some("456"));
}

#[test]
fn find_in_line_on_empty_line() {
    let mut scanner = scan("\nabc");
    assert_eq!(scanner.find_in_line(&pattern(".*")).unwrap(), None);
    assert_eq!(scanner.position(), 0);
}

#[test]
fn horizon_truncates_matches() {
    let mut scanner = scan("aaaa1234");
    let digits = pattern(r"\d+");

    assert_eq!(scanner.find_within_horizon(&digits, 4).unwrap(), None);
    assert_eq!(scanner.position(), 0);
    assert_eq!(scanner.find_within_horizon(&digits, 6).unwrap().as_deref(), Some("12"));
    assert_eq!(scanner.find_within_horizon(&digits, 0).unwrap().as_deref(), Some("34"));
}

#[test]
fn horizon_is_transparent_to_word_boundaries() {
    let foo = pattern(r"foo\b");
    assert_eq!(scan("foobar").find_within_horizon(&foo, 3).unwrap(), None);
    assert_eq!(
        scan("foo bar").find_within_horizon(&foo, 3).unwrap().as_deref(),
        Some("foo")
    );
}

#[test]
fn negative_horizon_reads_nothing() {
    let script = Script::new(&["abc"]);
    let tally = script.tally();
    let mut scanner = Scanner::new(script);

    let err = scanner.find_within_horizon(&pattern("a"), -1).unwrap_err();
    assert!(matches!(err, ScanError::InvalidHorizon(-1)));
    assert_eq!(tally.reads(), 0);
}

#[test]
fn unbounded_search_reads_ahead() {
    let mut scanner = Scanner::new(Script::new(&["aaaa", "aaaa", "aab", "c"]));
    assert_eq!(scanner.find_within_horizon(&pattern("b+c?"), 0).unwrap().as_deref(), Some("bc"));
    assert_eq!(scanner.position(), 12);
}

#[test]
fn match_at_buffer_edge_waits_for_more() {
    let mut scanner = Scanner::new(Script::new(&["12", "34 x"]));
    assert_eq!(
        scanner.find_within_horizon(&pattern(r"\d+"), 0).unwrap().as_deref(),
        Some("1234")
    );
}

#[test]
fn skip_zero_width_match() {
    let mut scanner = scan("123");
    scanner.skip(&pattern("[ \t]*")).unwrap();
    assert_eq!(scanner.last_match().unwrap().as_str(), "");
    assert_eq!(scanner.next_i32().unwrap(), 123);
}

#[test]
fn skip_chains() {
    let mut scanner = scan("key: value");
    let key = scanner.skip(&pattern(r"\w+:\s*")).unwrap().next().unwrap();
    assert_eq!(key, "value");
}

#[test]
fn skip_miss_consumes_nothing() {
    let mut scanner = scan("abc");
    let err = scanner.skip(&pattern(r"\d+")).unwrap_err();
    assert!(matches!(err, ScanError::NoMatch { ref pattern } if pattern == r"\d+"));
    assert_eq!(scanner.position(), 0);
    assert_eq!(scanner.next().unwrap(), "abc");
}

#[test]
fn skip_matches_across_lines() {
    let script = Script::new(&["abc\n", "def"]);
    let tally = script.tally();
    let mut scanner = Scanner::new(script);

    scanner.skip(&pattern(r"abc\ndef")).unwrap();
    assert_eq!(scanner.position(), 7);
    assert_eq!(tally.reads(), 2);
}

#[test]
fn skip_miss_is_decided_without_reading_on() {
    let script = Script::new(&["abc", "def"]);
    let tally = script.tally();
    let mut scanner = Scanner::new(script);

    assert!(matches!(
        scanner.skip(&pattern(r"\d+")),
        Err(ScanError::NoMatch { .. })
    ));
    assert_eq!(tally.reads(), 1);
}

#[rstest]
fn read_size_does_not_change_outcomes(#[values(1, 2, 3, 4, 64)] chunk: usize) {
    let chunked = |text: &'static str| Scanner::new(StrSource::new(text).with_chunk(chunk));

    assert!(chunked("x\ny").skip(&pattern(r"x\ny")).is_ok());

    // "y" matches first, but an attempt from "x" is still alive behind it.
    let found = chunked("xyaz")
        .find_within_horizon(&pattern("x.*z|y"), 0)
        .unwrap();
    assert_eq!(found.as_deref(), Some("xyaz"));

    let mut scanner = chunked("x;,y;");
    scanner.use_delimiter(pattern(";.*;|,"));
    assert_eq!(scanner.next().unwrap(), "x");
    assert!(!scanner.has_next().unwrap());
}

#[test]
fn interactive_search_settles_after_a_finished_match() {
    let script = Script::new(&["12\n", "never read"]);
    let tally = script.tally();
    let mut scanner = Scanner::new(script);

    let found = scanner.find_within_horizon(&pattern(r"\d+"), 0).unwrap();
    assert_eq!(found.as_deref(), Some("12"));
    assert_eq!(tally.reads(), 1);
}

#[test]
fn find_all_matches() {
    let found: Vec<String> = scan("a1b22 c333")
        .find_all(pattern(r"\d+"))
        .map(|found| found.unwrap().as_str().to_owned())
        .collect();
    assert_eq!(found, ["1", "22", "333"]);
}

#[test]
fn find_all_named_groups() {
    let pairs: Vec<(String, i32)> = scan("a=1, bb=22")
        .find_all(pattern(r"(?P<key>\w+)=(?P<value>\d+)"))
        .map(|found| {
            let found = found.unwrap();
            (
                found.name("key").unwrap().to_owned(),
                found.name("value").unwrap().parse().unwrap(),
            )
        })
        .collect();
    assert_eq!(pairs, [("a".to_owned(), 1), ("bb".to_owned(), 22)]);
}

#[test]
fn find_all_progresses_past_empty_matches() {
    let found: Vec<_> = scan("baab")
        .find_all(pattern("a*"))
        .map(|found| found.unwrap().range())
        .collect();
    assert_eq!(found, [0..0, 1..3, 3..3, 4..4]);
}
