use rstest::rstest;

use super::{Script, scan};
use crate::{ScanError, Scanner};

fn lines<S: crate::Source>(mut scanner: Scanner<S>) -> Vec<String> {
    let mut lines = Vec::new();
    while scanner.has_next_line().unwrap() {
        lines.push(scanner.next_line().unwrap());
    }
    lines
}

#[test]
fn every_terminator_form() {
    let text = "one\r\ntwo\rthree\u{2028}four\u{2029}five\u{85}six\n\nseven";
    assert_eq!(
        lines(scan(text)),
        ["one", "two", "three", "four", "five", "six", "", "seven"]
    );
}

#[rstest]
#[case("", &[])]
#[case("\n", &[""])]
#[case("x\n", &["x"])]
#[case("x", &["x"])]
#[case("\r\n\r\n", &["", ""])]
fn edge_inputs(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(lines(scan(input)), expected);
}

#[test]
fn exhausted_input_has_no_line() {
    let mut scanner = scan("only\n");
    assert_eq!(scanner.next_line().unwrap(), "only");
    assert!(matches!(scanner.next_line(), Err(ScanError::NoLine)));
}

#[test]
fn crlf_split_across_reads() {
    let scanner = Scanner::new(Script::new(&["a\r", "\nb\r", "\r\n"]));
    assert_eq!(lines(scanner), ["a", "b", ""]);
}

#[test]
fn line_match_exposes_terminator() {
    let mut scanner = scan("head\r\nbody");
    scanner.next_line().unwrap();
    let found = scanner.last_match().unwrap();
    assert_eq!(found.as_str(), "head\r\n");
    assert_eq!(found.group(1), Some("\r\n"));

    scanner.next_line().unwrap();
    assert_eq!(scanner.last_match().unwrap().group(1), None);
}

#[test]
fn rest_of_line_after_tokens() {
    let mut scanner = scan("3 apples and pears\nnext");
    assert_eq!(scanner.next_i32().unwrap(), 3);
    assert_eq!(scanner.next_line().unwrap(), " apples and pears");
    assert_eq!(scanner.next().unwrap(), "next");
}
