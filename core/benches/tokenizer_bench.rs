use criterion::{criterion_group, criterion_main, Criterion};
use docsearch_core::{IndexBuilder, Searcher, SegmentMode, Segmenter, WordSegmenter};

const TEXT: &str = "The Boost.Filesystem library provides facilities to manipulate files and \
directories, and the paths that identify them. file_status and directory_iterator are \
portable across operating systems; don't rely on platform-specific behaviour.";

fn bench_segment(c: &mut Criterion) {
    let seg = WordSegmenter::english();
    c.bench_function("segment_index_mode", |b| b.iter(|| seg.segment(TEXT, SegmentMode::Index)));
}

fn bench_search(c: &mut Criterion) {
    let corpus: String = (0..1000).map(|i| format!("Doc {i}\x03http://x/{i}\x03{TEXT} {i}\n")).collect();
    let (index, _) = IndexBuilder::new(WordSegmenter::new()).build_from_reader(corpus.as_bytes()).unwrap();
    let searcher = Searcher::from_index(index);
    c.bench_function("search_two_terms", |b| b.iter(|| searcher.search("filesystem paths")));
}

criterion_group!(benches, bench_segment, bench_search);
criterion_main!(benches);
