use crate::config::SearcherConfig;
use crate::error::IndexError;
use crate::index::{BuildStats, Index, IndexBuilder};
use crate::inverted::Posting;
use crate::tokenizer::{SegmentMode, Segmenter, WordSegmenter};
use serde::{Deserialize, Serialize};

/// Bytes of content kept before the matched term in a snippet.
pub const DESC_LEAD: usize = 60;
/// Maximum snippet length in bytes, before the ellipsis.
pub const DESC_LEN: usize = 160;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub desc: String,
}

/// Query side of the engine. Owns its index; every `search` call works on
/// its own buffers, so a `Searcher` can be shared across threads as is.
pub struct Searcher<S> {
    index: Index<S>,
}

impl<S: Segmenter> Searcher<S> {
    /// Build the index from `config.corpus_path` with the given segmenter.
    pub fn init(config: &SearcherConfig, segmenter: S) -> Result<(Self, BuildStats), IndexError> {
        let (index, stats) = IndexBuilder::new(segmenter).build(&config.corpus_path)?;
        Ok((Self { index }, stats))
    }

    pub fn from_index(index: Index<S>) -> Self { Self { index } }

    pub fn index(&self) -> &Index<S> { &self.index }

    /// Ranked hits for `query`. Postings of every query token are
    /// concatenated in token order and stably sorted by descending weight, so
    /// a document matching two tokens shows up twice.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let tokens = self.index.segment(query, SegmentMode::Query);
        let mut candidates: Vec<&Posting> = Vec::new();
        for token in &tokens {
            let term = token.to_lowercase();
            if let Some(list) = self.index.postings(&term) {
                candidates.extend(list.iter());
            }
        }
        candidates.sort_by(|a, b| b.weight.cmp(&a.weight));

        let hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter_map(|posting| {
                let doc = self.index.document(posting.doc_id)?;
                Some(SearchHit {
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    desc: get_desc(&doc.content, &posting.term),
                })
            })
            .collect();
        tracing::debug!(query, tokens = tokens.len(), hits = hits.len(), "search");
        hits
    }

    /// [`search`](Self::search) serialized as a JSON array of
    /// `{title, url, desc}` objects; `[]` when nothing matches.
    pub fn search_json(&self, query: &str) -> serde_json::Result<String> {
        serde_json::to_string(&self.search(query))
    }
}

impl Searcher<WordSegmenter> {
    /// Build with the default segmenter. Stop words come from the built-in
    /// English list and/or the dictionary named in `config`.
    pub fn open(config: &SearcherConfig) -> Result<(Self, BuildStats), IndexError> {
        let mut segmenter = if config.english_stop_words { WordSegmenter::english() } else { WordSegmenter::new() };
        if let Some(path) = &config.stop_words_path {
            segmenter.load_dictionary(path)?;
        }
        Self::init(config, segmenter)
    }
}

/// Snippet of `content` around the first case-sensitive occurrence of
/// `term`: up to [`DESC_LEAD`] bytes before it, [`DESC_LEN`] bytes in total.
/// Falls back to the head of the content when the term does not occur (it
/// may have matched only the title). Offsets are bytes, moved back to the
/// nearest char boundary.
pub fn get_desc(content: &str, term: &str) -> String {
    let Some(pos) = content.find(term) else {
        if content.len() > DESC_LEN {
            let end = floor_char_boundary(content, DESC_LEN);
            return format!("{}{ELLIPSIS}", &content[..end]);
        }
        return content.to_string();
    };
    let start = floor_char_boundary(content, pos.saturating_sub(DESC_LEAD));
    if start + DESC_LEN >= content.len() {
        return content[start..].to_string();
    }
    let end = floor_char_boundary(content, start + DESC_LEN);
    format!("{}{ELLIPSIS}", &content[start..end])
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_short_content_unchanged() {
        assert_eq!(get_desc("short text", "missing"), "short text");
        assert_eq!(get_desc("short text", "text"), "short text");
        let exact = "x".repeat(DESC_LEN);
        assert_eq!(get_desc(&exact, "y"), exact);
    }

    #[test]
    fn desc_head_when_term_absent() {
        let content = "a".repeat(300);
        let desc = get_desc(&content, "zzz");
        assert_eq!(desc, format!("{}...", "a".repeat(160)));
    }

    #[test]
    fn desc_window_around_match() {
        let content = format!("{}needle{}", "a".repeat(100), "b".repeat(300));
        let desc = get_desc(&content, "needle");
        assert_eq!(desc.len(), 160 + 3);
        assert!(desc.starts_with(&"a".repeat(60)));
        assert!(desc[60..].starts_with("needle"));
        assert!(desc.ends_with("..."));
    }

    #[test]
    fn desc_remainder_without_ellipsis() {
        let content = format!("{}needle tail", "a".repeat(100));
        let desc = get_desc(&content, "needle");
        assert_eq!(desc, format!("{}needle tail", "a".repeat(60)));
    }

    #[test]
    fn desc_window_reaching_end_exactly() {
        // match at 100, window starts at 40, 40 + 160 == len
        let content = format!("{}needle{}", "a".repeat(100), "b".repeat(94));
        assert_eq!(content.len(), 200);
        let desc = get_desc(&content, "needle");
        assert_eq!(desc, &content[40..]);
        assert!(!desc.ends_with("..."));

        // one byte longer: 40 + 160 == len - 1, so the window is cut
        let content = format!("{}needle{}", "a".repeat(100), "b".repeat(95));
        let desc = get_desc(&content, "needle");
        assert_eq!(desc, format!("{}...", &content[40..200]));
    }

    #[test]
    fn desc_match_near_start() {
        let content = format!("needle{}", "c".repeat(400));
        let desc = get_desc(&content, "needle");
        assert!(desc.starts_with("needle"));
        assert_eq!(desc.len(), 163);
    }

    #[test]
    fn desc_never_splits_a_char() {
        let content = "é".repeat(200);
        let desc = get_desc(&content, "zz");
        assert!(desc.ends_with("..."));
        assert_eq!(desc.len(), 160 + 3);
        let content = format!("{}x{}", "é".repeat(31), "é".repeat(200));
        let desc = get_desc(&content, "x");
        assert!(desc.contains('x'));
    }
}
