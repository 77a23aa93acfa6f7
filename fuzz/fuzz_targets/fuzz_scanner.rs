#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scanio::{Locale, Pattern, Scanner, StrSource};

/// Patterns the fuzzer picks from, including zero-width and line-sensitive
/// ones.
static PATTERNS: &[&str] = &[
    r"\s+",
    r"\p{L}+",
    r"[0-9]+",
    r",",
    r"\s*",
    r"\b",
    r"$",
    r"(?m)^.",
    r"(\w)(\w)?",
    r"\r\n|\n",
];

#[derive(Arbitrary, Debug)]
enum Op {
    HasNext,
    Next,
    HasNextI32,
    NextI32,
    NextI64Radix(u8),
    NextF64,
    NextBigDecimal,
    NextBool,
    HasNextLine,
    NextLine,
    FindInLine(u8),
    FindWithinHorizon(u8, i8),
    Skip(u8),
    UseDelimiter(u8),
    UseLocale(u8),
    UseRadix(u8),
    Reset,
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    chunk: u8,
    ops: Vec<Op>,
}

fn pattern(index: u8) -> Pattern {
    let source = PATTERNS[usize::from(index) % PATTERNS.len()];
    Pattern::new(source).expect("fuzz patterns compile")
}

fn locale(index: u8) -> Locale {
    match index % 5 {
        0 => Locale::us(),
        1 => Locale::germany(),
        2 => Locale::france(),
        3 => Locale::switzerland(),
        _ => Locale::arabic(),
    }
}

fn run(input: Input) {
    let chunk = usize::from(input.chunk % 32) + 1;
    let mut scanner = Scanner::new(StrSource::new(input.text.as_str()).with_chunk(chunk));

    for op in input.ops {
        let before = scanner.position();
        // Failed typed reads and lookahead must never move the scanner.
        let moved_ok = match op {
            Op::HasNext => scanner.has_next().map(drop).is_ok(),
            Op::Next => scanner.next().is_ok(),
            Op::HasNextI32 => scanner.has_next_i32().map(drop).is_ok(),
            Op::NextI32 => scanner.next_i32().is_ok(),
            Op::NextI64Radix(radix) => scanner.next_i64_radix(u32::from(radix)).is_ok(),
            Op::NextF64 => scanner.next_f64().is_ok(),
            Op::NextBigDecimal => scanner.next_big_decimal().is_ok(),
            Op::NextBool => scanner.next_bool().is_ok(),
            Op::HasNextLine => scanner.has_next_line().map(drop).is_ok(),
            Op::NextLine => scanner.next_line().is_ok(),
            Op::FindInLine(p) => scanner.find_in_line(&pattern(p)).is_ok_and(|m| m.is_some()),
            Op::FindWithinHorizon(p, horizon) => scanner
                .find_within_horizon(&pattern(p), isize::from(horizon))
                .is_ok_and(|m| m.is_some()),
            Op::Skip(p) => scanner.skip(&pattern(p)).is_ok(),
            Op::UseDelimiter(p) => {
                scanner.use_delimiter(pattern(p));
                false
            }
            Op::UseLocale(l) => {
                scanner.use_locale(locale(l));
                false
            }
            Op::UseRadix(radix) => {
                let _ = scanner.use_radix(u32::from(radix));
                false
            }
            Op::Reset => {
                scanner.reset();
                false
            }
        };

        let after = scanner.position();
        assert!(after >= before);
        assert!(after <= input.text.len());
        assert!(input.text.is_char_boundary(after));
        if !moved_ok {
            assert_eq!(before, after, "{op:?} moved the scanner");
        }
        if let Ok(found) = scanner.last_match() {
            assert!(found.end() <= after);
            assert_eq!(found.as_str(), &input.text[found.range()]);
        }
    }
}

fuzz_target!(|input: Input| run(input));
