//! Benchmarks for the Gemtext render pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use gemtext_render::gemtext::{decode_entities, footnote_marker, link_marker};
use gemtext_render::{Child, Node, convert};

/// A document with `sections` sections of link- and footnote-heavy prose.
fn sample_document(sections: usize) -> Node {
    let blocks = (0..sections)
        .map(|s| {
            let mut children: Vec<Child> = Vec::new();
            for i in 0..20 {
                children.push(format!("Sentence {i} of section {s}\nwraps here ").into());
                if i % 3 == 0 {
                    children.push(Node::link(format!("gemini://example.org/{s}/{i}"), "ref").into());
                }
                if i % 7 == 0 {
                    children.push(Node::footnote(vec!["A note&#8217;s text.".into()]).into());
                }
            }
            Node::section(
                1,
                format!("Section {s}"),
                vec![
                    Node::paragraph(children),
                    Node::ulist(vec![vec!["one".into()], vec!["two".into()]]),
                    Node::literal(["let x = 1;", "let y = 2;"]),
                ],
            )
        })
        .collect();
    Node::document("Benchmark: Sample", blocks)
}

// ============================================================================
// Render Benchmarks
// ============================================================================

fn bench_render_document(c: &mut Criterion) {
    let small = sample_document(5);
    let large = sample_document(200);

    c.bench_function("render_small_document", |b| {
        b.iter(|| convert(std::hint::black_box(&small)).unwrap());
    });
    c.bench_function("render_large_document", |b| {
        b.iter(|| convert(std::hint::black_box(&large)).unwrap());
    });
}

fn bench_markers(c: &mut Criterion) {
    c.bench_function("link_markers_1000", |b| {
        b.iter(|| (0..1000).map(link_marker).count());
    });
    c.bench_function("footnote_markers_1000", |b| {
        b.iter(|| (0..1000).map(footnote_marker).count());
    });
}

fn bench_decode_entities(c: &mut Criterion) {
    let text = "It&#8217;s &#8220;quoted&#8221; &amp; done&#8230;&#8203; ".repeat(200);
    let plain = "Nothing to decode in this line at all. ".repeat(200);

    c.bench_function("decode_entities", |b| {
        b.iter(|| decode_entities(std::hint::black_box(&text)).len());
    });
    c.bench_function("decode_entities_plain", |b| {
        b.iter(|| decode_entities(std::hint::black_box(&plain)).len());
    });
}

criterion_group!(
    benches,
    bench_render_document,
    bench_markers,
    bench_decode_entities
);
criterion_main!(benches);
