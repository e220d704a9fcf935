use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wxmd_core::{calculate_document_stats, extract_headings, render_document, render_markdown};

fn sample_document(sections: usize) -> String {
    let mut doc = String::from("# 周刊\n\n");
    for n in 0..sections {
        doc.push_str(&format!(
            "## 第 {n} 节\n\nSome text with `code`, a link https://example.com/{n} and (c) marks.\n\n\
             > a quote\n\n- item one\n- item two\n\n\
             | key | value |\n|:---|---:|\n| a | {n} |\n\n\
             ```rust\nfn section_{n}() -> usize {{\n    {n}\n}}\n```\n\n"
        ));
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let small = sample_document(5);
    let large = sample_document(200);

    // Warm up the syntax and theme sets outside the measurements.
    render_markdown("```rust\nfn main() {}\n```");

    c.bench_function("render_markdown small", |b| {
        b.iter(|| render_markdown(black_box(&small)))
    });

    c.bench_function("render_markdown large", |b| {
        b.iter(|| render_markdown(black_box(&large)))
    });

    c.bench_function("extract_headings large", |b| {
        b.iter(|| extract_headings(black_box(&large)))
    });

    c.bench_function("render_document large", |b| {
        b.iter(|| render_document(black_box(&large)))
    });

    c.bench_function("calculate_document_stats large", |b| {
        b.iter(|| calculate_document_stats(black_box(&large)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
