use crate::corpus::{self, Record};
use crate::document::{DocId, Document, DocumentStore};
use crate::error::IndexError;
use crate::inverted::{InvertedIndex, Posting, PostingList};
use crate::tokenizer::{SegmentMode, Segmenter};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Title occurrences count this many times more than content occurrences.
pub const TITLE_WEIGHT: u32 = 10;

/// Counters reported by a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub documents: usize,
    /// Malformed records that were skipped.
    pub skipped: usize,
    pub terms: usize,
    pub postings: usize,
}

/// An index that has not been built yet. `build` consumes it and hands back
/// the immutable [`Index`], so the build runs exactly once.
pub struct IndexBuilder<S> {
    segmenter: S,
    docs: DocumentStore,
    inverted: InvertedIndex,
    skipped: usize,
}

impl<S: Segmenter> IndexBuilder<S> {
    pub fn new(segmenter: S) -> Self {
        Self { segmenter, docs: DocumentStore::new(), inverted: InvertedIndex::new(), skipped: 0 }
    }

    /// Build from a corpus file. An unreadable file is fatal; malformed
    /// records are logged and skipped.
    pub fn build<P: AsRef<Path>>(self, corpus_path: P) -> Result<(Index<S>, BuildStats), IndexError> {
        let path = corpus_path.as_ref();
        tracing::info!(path = %path.display(), "index build start");
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        self.build_from_reader(BufReader::new(file)).map_err(|e| match e {
            IndexError::Io { source, .. } => IndexError::io(path, source),
            other => other,
        })
    }

    /// Build from any line-oriented reader.
    pub fn build_from_reader<R: BufRead>(mut self, mut reader: R) -> Result<(Index<S>, BuildStats), IndexError> {
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(|e| IndexError::io("<corpus>", e))?;
            if n == 0 {
                break;
            }
            line_no += 1;
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            let record = match std::str::from_utf8(&buf) {
                Ok(line) => corpus::parse_record(line, line_no),
                // Invalid UTF-8 can't be split reliably; count the
                // separators so the error still says something useful.
                Err(_) => Err(IndexError::Parse { line: line_no, fields: buf.split(|&b| b == 0x03).count() }),
            };
            match record {
                Ok(record) => {
                    let doc_id = self.ingest(record);
                    if doc_id % 100 == 0 {
                        tracing::debug!(doc_id, "build progress");
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "skipping record");
                    self.skipped += 1;
                }
            }
        }

        let stats = BuildStats {
            documents: self.docs.len(),
            skipped: self.skipped,
            terms: self.inverted.term_count(),
            postings: self.inverted.posting_count(),
        };
        tracing::info!(documents = stats.documents, skipped = stats.skipped, terms = stats.terms, postings = stats.postings, "index build finish");
        Ok((Index { segmenter: self.segmenter, docs: self.docs, inverted: self.inverted }, stats))
    }

    fn ingest(&mut self, record: Record) -> DocId {
        let doc = self.docs.push(record.title, record.url, record.content);
        let doc_id = doc.id;
        let postings = weigh_terms(&self.segmenter, doc);
        for posting in postings {
            self.inverted.append(posting);
        }
        doc_id
    }
}

#[derive(Default)]
struct TermCount {
    title: u32,
    content: u32,
}

/// One posting per distinct lower-cased term of `doc`, in first-seen order
/// (title tokens, then content tokens).
fn weigh_terms<S: Segmenter>(segmenter: &S, doc: &Document) -> Vec<Posting> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, TermCount> = HashMap::new();
    let mut count = |token: String, in_title: bool| {
        let term = token.to_lowercase();
        if !counts.contains_key(&term) {
            order.push(term.clone());
        }
        let entry = counts.entry(term).or_default();
        if in_title { entry.title += 1 } else { entry.content += 1 }
    };
    for token in segmenter.segment(&doc.title, SegmentMode::Index) {
        count(token, true);
    }
    for token in segmenter.segment(&doc.content, SegmentMode::Index) {
        count(token, false);
    }

    order
        .into_iter()
        .map(|term| {
            let c = &counts[&term];
            let weight = TITLE_WEIGHT.saturating_mul(c.title).saturating_add(c.content);
            Posting { doc_id: doc.id, weight, term }
        })
        .collect()
}

/// A built index: forward and inverted halves plus the segmenter that built
/// them. Read-only; safe to share between threads.
pub struct Index<S> {
    segmenter: S,
    docs: DocumentStore,
    inverted: InvertedIndex,
}

impl<S: Segmenter> Index<S> {
    pub fn document(&self, doc_id: DocId) -> Option<&Document> { self.docs.get(doc_id) }

    pub fn postings(&self, term: &str) -> Option<&PostingList> { self.inverted.get(term) }

    pub fn segment(&self, text: &str, mode: SegmentMode) -> Vec<String> { self.segmenter.segment(text, mode) }

    pub fn documents(&self) -> &DocumentStore { &self.docs }

    pub fn inverted(&self) -> &InvertedIndex { &self.inverted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WordSegmenter;

    fn build(corpus: &str) -> (Index<WordSegmenter>, BuildStats) {
        IndexBuilder::new(WordSegmenter::new()).build_from_reader(corpus.as_bytes()).unwrap()
    }

    #[test]
    fn title_counts_ten_times() {
        let (index, stats) = build("Hello\x03http://x/\x03Hello world hello\n");
        assert_eq!(stats, BuildStats { documents: 1, skipped: 0, terms: 2, postings: 2 });
        let doc = index.document(0).unwrap();
        assert_eq!((doc.title.as_str(), doc.url.as_str(), doc.content.as_str()), ("Hello", "http://x/", "Hello world hello"));
        let hello = index.postings("hello").unwrap();
        assert_eq!(hello, &vec![Posting { doc_id: 0, weight: 12, term: "hello".into() }]);
        assert_eq!(index.postings("world").unwrap()[0].weight, 1);
    }

    #[test]
    fn term_only_in_title() {
        let (index, _) = build("Boost Asio\x03u\x03networking library\n");
        assert_eq!(index.postings("asio").unwrap()[0].weight, 10);
    }

    #[test]
    fn skips_malformed_records_without_consuming_ids() {
        let (index, stats) = build("a\x03u0\x03x\nbroken\x03only\n\nb\x03u1\x03y\n");
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.skipped, 2);
        assert_eq!(index.document(1).unwrap().title, "b");
        assert!(index.document(2).is_none());
    }

    #[test]
    fn postings_lookup_normalizes_titlecase() {
        let (index, _) = build("\u{1C5}x\x03u\x03t\n");
        assert_eq!(index.postings("\u{1C5}x").unwrap()[0].term, "\u{1C6}x");
    }

    #[test]
    fn invalid_utf8_is_skipped() {
        let mut corpus = b"ok\x03u\x03fine\n".to_vec();
        corpus.extend_from_slice(b"bad\x03u\x03\xff\xfe\n");
        corpus.extend_from_slice(b"next\x03u\x03more");
        let (index, stats) = IndexBuilder::new(WordSegmenter::new()).build_from_reader(&corpus[..]).unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(index.document(1).unwrap().title, "next");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = IndexBuilder::new(WordSegmenter::new()).build("/definitely/not/here.txt").err().unwrap();
        assert!(err.is_fatal());
    }
}
