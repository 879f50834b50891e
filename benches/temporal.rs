//! Benchmarks for RSS and Atom date parsing/formatting
//!
//! Every `pubDate`, `lastBuildDate`, `updated` and `published` in a feed goes
//! through these paths on load and again on save.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feedkit::{DateDialect, TemporalValue};

const RFC822_SAMPLES: &[(&str, &str)] = &[
    ("full", "Mon, 06 Nov 1995 08:49:37 GMT"),
    ("no_weekday", "06 Nov 1995 08:49 EST"),
    ("legacy_year", "Sat, 7 Sep 02 09:42:31 PDT"),
    ("numeric_offset", "Tue, 10 Jun 2003 04:00:00 +0530"),
];

const ISO8601_SAMPLES: &[(&str, &str)] = &[
    ("year", "2003"),
    ("minutes", "2003-12-13T18:30Z"),
    ("seconds", "2003-12-13T18:30:02Z"),
    ("fraction_offset", "2003-12-13T18:30:02.250-05:00"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_parse");

    for (name, text) in RFC822_SAMPLES {
        group.bench_with_input(BenchmarkId::new("rfc822", name), text, |b, text| {
            b.iter(|| TemporalValue::parse(black_box(text), DateDialect::Rfc822));
        });
    }
    for (name, text) in ISO8601_SAMPLES {
        group.bench_with_input(BenchmarkId::new("iso8601", name), text, |b, text| {
            b.iter(|| TemporalValue::parse(black_box(text), DateDialect::Iso8601));
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_format");

    let value = TemporalValue::parse("2003-12-13T18:30:02.250-05:00", DateDialect::Iso8601)
        .expect("sample date parses");

    group.bench_function("rfc822", |b| {
        b.iter(|| black_box(&value).format(DateDialect::Rfc822));
    });
    group.bench_function("iso8601", |b| {
        b.iter(|| black_box(&value).format(DateDialect::Iso8601));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_format);
criterion_main!(benches);
