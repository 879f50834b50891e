//! Benchmarks for extension capture and replay
//!
//! Measures the cost of scanning a parsed item for unmapped content as the
//! number of foreign children grows, and of writing it back out.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feedkit::{ExclusionSet, XmlElement, capture, emit};

const DC: &str = "http://purl.org/dc/elements/1.1/";
const MEDIA: &str = "http://search.yahoo.com/mrss/";

/// Generate an RSS item with `count` extension children of mixed shape
fn generate_item(count: usize) -> XmlElement {
    let mut xml = format!(r#"<item xmlns:dc="{DC}" xmlns:media="{MEDIA}" dc:id="item-1">"#);
    xml.push_str("<title>Mapped</title><link>http://example.com/</link>");
    for i in 0..count {
        if i % 2 == 0 {
            xml.push_str(&format!("<dc:subject>topic {i}</dc:subject>"));
        } else {
            xml.push_str(&format!(
                r#"<media:group><media:content url="http://example.com/{i}.mp4"/><media:content url="http://example.com/{i}.webm"/></media:group>"#
            ));
        }
    }
    xml.push_str("</item>");
    XmlElement::parse(&xml).expect("generated item parses")
}

fn exclusions() -> ExclusionSet {
    ExclusionSet::new().with_names(
        None,
        &["title", "link", "description", "author", "comments", "pubDate", "guid"],
    )
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("extension_capture");
    let exclusions = exclusions();

    for count in [0, 8, 64, 512] {
        let item = generate_item(count);
        group.throughput(Throughput::Elements(count as u64 + 2));
        group.bench_with_input(BenchmarkId::from_parameter(count), &item, |b, item| {
            b.iter(|| capture(black_box(item), &exclusions));
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("extension_emit");
    let exclusions = exclusions();

    for count in [8, 64, 512] {
        let set = capture(&generate_item(count), &exclusions);
        group.bench_with_input(BenchmarkId::from_parameter(count), &set, |b, set| {
            b.iter(|| {
                let mut target = XmlElement::new("item");
                emit(black_box(set), &mut target);
                target.to_xml_string()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_capture, bench_emit);
criterion_main!(benches);
