use crate::document::DocId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One term's combined importance in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: u32,
    /// Kept on the posting so the searcher knows which term to build the
    /// snippet around.
    pub term: String,
}

/// Postings for one term, in the order their documents were ingested.
pub type PostingList = Vec<Posting>;

/// Lower-cased term to posting list. Filled by the index builder only.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, PostingList>,
    num_postings: usize,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Append to the list for `posting.term`. The caller has already
    /// lower-cased the term and aggregated the document's counts, so each
    /// (term, doc_id) pair is appended once.
    pub(crate) fn append(&mut self, posting: Posting) {
        debug_assert!(self.postings.get(&posting.term).and_then(|l| l.last()).map_or(true, |p| p.doc_id < posting.doc_id));
        self.num_postings += 1;
        match self.postings.get_mut(posting.term.as_str()) {
            Some(list) => list.push(posting),
            None => {
                self.postings.insert(posting.term.clone(), vec![posting]);
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(&term.to_lowercase())
    }

    pub fn term_count(&self) -> usize { self.postings.len() }

    pub fn posting_count(&self) -> usize { self.num_postings }

    /// Terms in unspecified order.
    pub fn terms(&self) -> impl Iterator<Item = &str> { self.postings.keys().map(String::as_str) }
}
