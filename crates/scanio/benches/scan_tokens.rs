//! Benchmark – `scanio::Scanner` over tokens, numbers and lines
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scanio::{Scanner, StrSource};

/// Produce a deterministic document of `lines` lines, each holding a word, an
/// integer and a float separated by single spaces.
fn make_payload(lines: usize) -> String {
    let mut s = String::with_capacity(lines * 24);
    for i in 0..lines {
        s.push_str("item");
        s.push_str(&(i % 97).to_string());
        s.push(' ');
        s.push_str(&(i * 7919 % 100_000).to_string());
        s.push(' ');
        s.push_str(&format!("{}.{:02}", i % 1000, i % 100));
        s.push('\n');
    }
    s
}

/// Read every line as `word int float`, handing the scanner `chunk`
/// characters per read. Returns a checksum so Criterion keeps the work.
fn scan_values(payload: &str, chunk: usize) -> f64 {
    let mut scanner = Scanner::new(StrSource::new(payload).with_chunk(chunk));
    let mut sum = 0.0;
    while scanner.has_next().unwrap() {
        black_box(scanner.next().unwrap());
        sum += f64::from(scanner.next_i32().unwrap());
        sum += scanner.next_f64().unwrap();
    }
    sum
}

fn scan_tokens(payload: &str, chunk: usize) -> usize {
    Scanner::new(StrSource::new(payload).with_chunk(chunk))
        .tokens()
        .map(Result::unwrap)
        .count()
}

fn scan_lines(payload: &str) -> usize {
    let mut scanner = Scanner::from_text(payload);
    let mut total = 0;
    while scanner.has_next_line().unwrap() {
        total += scanner.next_line().unwrap().len();
    }
    total
}

fn bench_scanner(c: &mut Criterion) {
    let payload = make_payload(10_000);

    let mut group = c.benchmark_group("scanner");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &chunk in &[16usize, 1024, 1 << 20] {
        group.bench_with_input(BenchmarkId::new("tokens", chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(scan_tokens(black_box(&payload), chunk)));
        });
        group.bench_with_input(BenchmarkId::new("typed", chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(scan_values(black_box(&payload), chunk)));
        });
    }
    group.bench_function("lines", |b| {
        b.iter(|| black_box(scan_lines(black_box(&payload))));
    });

    group.finish();
}

fn criterion() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
}

criterion_group! { name = benches; config = criterion(); targets = bench_scanner }
criterion_main!(benches);
