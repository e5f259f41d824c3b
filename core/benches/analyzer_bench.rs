use criterion::{criterion_group, criterion_main, Criterion};
use sift_core::Analyzer;

const SAMPLE: &str = "Full-text search engines tokenize raw text into positioned terms, \
accumulate postings per document, and answer term queries from an inverted index. \
Stemming folds running, runner and runs into one searchable stem while stopwords \
such as the, and or with never reach the postings lists. Offsets recorded during \
analysis always point back into the original input so that spans can be sliced \
out verbatim for display.";

fn bench_analyze(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    c.bench_function("analyze_sample", |b| b.iter(|| analyzer.analyze(SAMPLE).count()));
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
