//! Clippings parser throughput benchmarks
//!
//! Run with: cargo bench -p clippings-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use clippings_core::{encode, render_export, split_entries, LabelStyle, Parser};

/// A small export mixing every clipping kind and both line endings.
const EXPORT_SAMPLE: &str = "Flow (Mihaly Csikszentmihalyi)\r
- Your Highlight at location 1213-1214 | Added on Sunday, 12 July 2015 17:36:17\r
\r
The reason it is possible to achieve such complete involvement in a flow experience is that goals are usually clear, and feedback immediate.\r
==========\r
Sapiens: A Brief History of Humankind (Harari, Yuval Noah)\r
- Your Bookmark at location 3883 | Added on Sunday, 22 October 2017 23:09:48\r
\r
\r
==========\r
Thinking, Fast and Slow (Kahneman, Daniel)
- Your Highlight on page 12 | Location 180-182 | Added on Monday, 3 May 2021 10:00:00

Nothing in life is as important as you think it is, while you are thinking about it.
==========
Thinking, Fast and Slow (Kahneman, Daniel)
- Your Note on page 12 | Location 182 | Added on Monday, 3 May 2021 10:01:00

Focusing illusion.
==========
crofflr 2015-08-07 (crofflr.com)
- Clip This Article at Location 228 | Added on Sunday, 9 August 2015 12:50:40

Yada yada ya
==========
";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(EXPORT_SAMPLE.len() as u64));

    group.bench_function("split", |b| {
        b.iter(|| black_box(split_entries(black_box(EXPORT_SAMPLE)).len()))
    });

    group.bench_function("full", |b| {
        let parser = Parser::new();
        b.iter(|| {
            let output = parser.parse(black_box(EXPORT_SAMPLE)).unwrap();
            black_box(output.books.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    let parser = Parser::new();

    for size in [1, 10, 100, 1000].iter() {
        let content: String = EXPORT_SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", size), &content, |b, content| {
            b.iter(|| {
                let output = parser.parse(black_box(content)).unwrap();
                black_box(output.clipping_count())
            })
        });
    }

    group.finish();
}

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let books = Parser::new().parse(&EXPORT_SAMPLE.repeat(100)).unwrap().books;

    group.bench_function("json", |b| {
        b.iter(|| black_box(encode::to_json(black_box(&books), LabelStyle::Bare, false).unwrap()))
    });

    group.bench_function("render", |b| {
        b.iter(|| black_box(render_export(black_box(&books)).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_scaling, bench_output);
criterion_main!(benches);
