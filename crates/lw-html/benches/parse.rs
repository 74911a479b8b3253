//! Benchmarks for tokenizer and parser throughput.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lw_html::{Parser, Tokenizer};

/// Generate a page shaped like typical static-site output.
fn generate_page(sections: usize) -> String {
    let mut html = String::with_capacity(sections * 400);
    html.push_str("<!DOCTYPE html><html><head><title>Bench</title>");
    html.push_str(r#"<link rel="stylesheet" href="../css/site.css"></head><body><ul>"#);
    for i in 0..sections {
        html.push_str(&format!(r##"<li><a href="#section-{i}">Section {i}</a>"##));
    }
    html.push_str("</ul>");
    for i in 0..sections {
        html.push_str(&format!(r#"<h2 id="section-{i}">Section {i}</h2>"#));
        html.push_str("<p>Text with <b>bold</b> &amp; <i>italic</i>.<p>");
        html.push_str(&format!(r#"<img src="img/{i}.png" alt="figure {i}"><!-- figure -->"#));
        html.push_str(&format!(r#"<a href="page-{i}.html">next</a>"#));
    }
    html.push_str("<script>var x = '<p>';</script></body></html>");
    html
}

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();
    let html = generate_page(50);

    c.bench_function("tokenize_50_sections", |b| {
        b.iter(|| tokenizer.tokenize(&html).count());
    });
}

fn bench_parse_varying_sizes(c: &mut Criterion) {
    let parser = Parser::new();
    let mut group = c.benchmark_group("parse");

    for sections in [10, 100, 1000] {
        let html = generate_page(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| parser.parse(html).count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse_varying_sizes);
criterion_main!(benches);
