//! Performance benchmarks for fragmatch
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fragmatch::{AnchorEngine, DocumentIndex, normalize};

/// Build a synthetic multi-page document with predictable sentences.
fn synthetic_pages(page_count: usize) -> Vec<String> {
    (0..page_count)
        .map(|p| {
            let mut page = String::new();
            for s in 0..40 {
                page.push_str(&format!(
                    "Sentence {s} of page {p} discusses the e\u{FB03}cient \
                     pro-\ncessing of extracted α-text fragments. "
                ));
            }
            page
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let pages = synthetic_pages(1);
    let raw = pages[0].as_str();

    c.bench_function("normalize_page", |b| {
        b.iter(|| normalize(black_box(raw)));
    });
}

fn bench_match_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_all");
    for page_count in [5usize, 20] {
        let pages = synthetic_pages(page_count);
        let doc = DocumentIndex::new(pages);
        doc.warm();
        let engine = AnchorEngine::new(&doc);
        let fragments: Vec<String> = (0..16)
            .map(|i| {
                let p = i % page_count;
                format!("Sentence {i} of page {p} discusses the efficient processing")
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(page_count),
            &fragments,
            |b, fragments| {
                b.iter(|| engine.match_all(black_box(fragments)));
            },
        );
    }
    group.finish();
}

fn bench_ellipsis(c: &mut Criterion) {
    let pages = synthetic_pages(10);
    let doc = DocumentIndex::new(pages);
    doc.warm();
    let engine = AnchorEngine::new(&doc);
    let fragment = "Sentence 0 of page 2 discusses ... fragments. Sentence 39 of page 2";

    c.bench_function("ellipsis_resolve", |b| {
        b.iter(|| engine.match_fragment(black_box(fragment)));
    });
}

criterion_group!(benches, bench_normalize, bench_match_all, bench_ellipsis);
criterion_main!(benches);
