#![allow(missing_docs)]
use std::io::{self, Cursor, Read};

use rstest::rstest;
use scanio::{
    BigDecimal, BigInt, Locale, Pattern, ReaderSource, ScanError, Scanner, ScannerOptions, Source,
    StrSource,
};

/// Hands out at most `step` bytes per read, splitting UTF-8 sequences.
struct Dribble<'a> {
    bytes: &'a [u8],
    step: usize,
}

impl Read for Dribble<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        Ok(n)
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(64)]
fn reader_input_in_any_step(#[case] step: usize) {
    let text = "größe 12\nπ 3,5 ∞\n";
    let mut scanner = Scanner::from_reader(Dribble {
        bytes: text.as_bytes(),
        step,
    });
    scanner.use_locale(Locale::germany());

    assert_eq!(scanner.next().unwrap(), "größe");
    assert_eq!(scanner.next_i32().unwrap(), 12);
    assert_eq!(scanner.next_line().unwrap(), "");
    assert_eq!(scanner.next().unwrap(), "π");
    assert_eq!(scanner.next_f64().unwrap(), 3.5);
    assert_eq!(scanner.next_f64().unwrap(), f64::INFINITY);
    assert!(!scanner.has_next().unwrap());
}

#[test]
fn invalid_utf8_becomes_replacement_characters() {
    let mut scanner = Scanner::from_reader(Cursor::new(b"ok \xff\xfe bad\xe2\x82".to_vec()));
    assert_eq!(scanner.next().unwrap(), "ok");
    assert_eq!(scanner.next().unwrap(), "\u{fffd}\u{fffd}");
    assert_eq!(scanner.next().unwrap(), "bad\u{fffd}");
}

#[test]
fn reader_errors_end_the_stream() {
    struct Flaky(u8);

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0 += 1;
            match self.0 {
                1 => {
                    buf[..4].copy_from_slice(b"7 8 ");
                    Ok(4)
                }
                2 => Err(io::Error::from(io::ErrorKind::Interrupted)),
                _ => Err(io::Error::from(io::ErrorKind::BrokenPipe)),
            }
        }
    }

    let mut scanner = Scanner::from_reader(Flaky(0));
    assert_eq!(scanner.next_i64().unwrap(), 7);
    assert_eq!(scanner.next_i64().unwrap(), 8);
    assert!(matches!(scanner.next_i64(), Err(ScanError::SourceFault(_))));
    assert_eq!(
        scanner.last_fault().map(io::Error::kind),
        Some(io::ErrorKind::BrokenPipe)
    );
}

#[test]
fn boxed_sources() {
    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(StrSource::new("1 2")),
        Box::new(ReaderSource::new(Cursor::new("3 4"))),
    ];
    let sums: Vec<i64> = sources
        .into_iter()
        .map(|source| {
            Scanner::new(source)
                .tokens()
                .map(|token| token.unwrap().parse::<i64>().unwrap())
                .sum::<i64>()
        })
        .collect();
    assert_eq!(sums, [3, 7]);
}

#[test]
fn options_are_validated() {
    let options = ScannerOptions {
        radix: 40,
        ..Default::default()
    };
    let err = Scanner::with_options(StrSource::new("1"), options).unwrap_err();
    assert!(matches!(err, ScanError::InvalidRadix(40)));
}

#[test]
fn options_configure_everything() {
    let options = ScannerOptions {
        delimiter: Pattern::new(r"\s*\|\s*").unwrap(),
        locale: Locale::switzerland(),
        radix: 2,
        read_chunk: 3,
    };
    let mut scanner =
        Scanner::with_options(StrSource::new("101 | 1’234.5 | 123456789012345678901234567890.5"), options)
            .unwrap();
    assert_eq!(scanner.next_i32().unwrap(), 5);
    assert_eq!(scanner.next_f64().unwrap(), 1234.5);
    assert_eq!(
        scanner.next_big_decimal().unwrap(),
        "123456789012345678901234567890.5".parse::<BigDecimal>().unwrap()
    );
}

#[test]
fn arbitrary_precision_integers_in_any_radix() {
    let mut scanner = Scanner::from_text("zzzzzzzzzzzzzzzzzzzz -1010");
    let big = scanner.next_big_int_radix(36).unwrap();
    assert_eq!(big.to_str_radix(36), "zzzzzzzzzzzzzzzzzzzz");
    assert_eq!(scanner.next_big_int_radix(2).unwrap(), BigInt::from(-10));
}

#[test]
fn reading_a_table() {
    let input = "name,qty,price\nwidget,3,2.50\ngadget,10,0.99\n";
    let mut scanner = Scanner::from_text(input);
    scanner.use_delimiter(Pattern::new(r",|\n").unwrap());

    assert_eq!(scanner.next_line().unwrap(), "name,qty,price");
    let mut total = BigDecimal::from(0);
    while scanner.has_next().unwrap() {
        let _name = scanner.next().unwrap();
        let qty = scanner.next_i32().unwrap();
        let price = scanner.next_big_decimal().unwrap();
        total += price * BigDecimal::from(qty);
    }
    assert_eq!(total, "17.40".parse::<BigDecimal>().unwrap());
}

#[test]
fn scan_errors_are_std_errors() {
    fn boxed() -> Result<i32, Box<dyn std::error::Error>> {
        Ok(Scanner::from_text("nope").next_i32()?)
    }
    let err = boxed().unwrap_err();
    assert_eq!(err.to_string(), r#"token "nope" is not a valid integer"#);

    let pattern_err: ScanError = Pattern::new("[").unwrap_err().into();
    assert!(matches!(pattern_err, ScanError::InvalidPattern(_)));
}
