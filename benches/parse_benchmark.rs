//! Benchmarks for embosser parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic BRF and PEF books.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a BRF book with the given number of 25 line pages.
fn create_test_brf(page_count: usize) -> Vec<u8> {
    let line = ",! QUICK BR[N FOX JUMPS OV] ! LAZY DOG4";
    let mut content = Vec::new();
    for _ in 0..page_count {
        for _ in 0..25 {
            content.extend_from_slice(line.as_bytes());
            content.extend_from_slice(b"\r\n");
        }
        content.push(0x0c);
    }
    content
}

/// Creates the same book as PEF XML.
fn create_test_pef(page_count: usize) -> String {
    let brf = create_test_brf(page_count);
    let doc = embosser::pef::from_brf(&brf, "bench", 40, 25, true);
    doc.to_xml_string().unwrap()
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pef = create_test_pef(1);
    let brf = create_test_brf(1);

    c.bench_function("detect_pef", |b| {
        b.iter(|| embosser::detect_format_from_bytes(black_box(pef.as_bytes())).unwrap());
    });

    c.bench_function("detect_brf", |b| {
        b.iter(|| embosser::detect_format_from_bytes(black_box(&brf)).unwrap());
    });
}

/// Benchmark BRF parsing at various sizes.
fn bench_brf_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("brf_parsing");

    for page_count in [1, 10, 100].iter() {
        let data = create_test_brf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| embosser::parse_brf(black_box(&data)));
        });
    }

    group.finish();
}

/// Benchmark PEF event parsing and tree reading.
fn bench_pef_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pef_parsing");

    for page_count in [1, 10, 100].iter() {
        let xml = create_test_pef(*page_count);

        group.bench_function(format!("events_{}_pages", page_count), |b| {
            b.iter(|| embosser::pef::parse_events(black_box(&xml)).unwrap());
        });

        group.bench_function(format!("tree_{}_pages", page_count), |b| {
            b.iter(|| embosser::pef::read_str(black_box(&xml)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark text rendering.
fn bench_rendering(c: &mut Criterion) {
    let events = embosser::parse_brf(&create_test_brf(100));
    let options = embosser::TextRenderOptions::new()
        .with_padding(true)
        .with_interpoint(true);

    c.bench_function("render_100_pages", |b| {
        b.iter(|| embosser::render::to_bytes(black_box(events.clone()), &options).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_brf_parsing,
    bench_pef_parsing,
    bench_rendering,
);
criterion_main!(benches);
