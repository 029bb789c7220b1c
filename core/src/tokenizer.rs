use crate::error::IndexError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Which side of the engine is asking for tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// Document text at build time. May emit finer-grained extra tokens.
    Index,
    /// A user query.
    Query,
}

/// Text segmentation capability the index depends on. Implementations must
/// be deterministic for the same input and mode; case normalization is left
/// to the caller.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str, mode: SegmentMode) -> Vec<String>;
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn segment(&self, text: &str, mode: SegmentMode) -> Vec<String> {
        (**self).segment(text, mode)
    }
}

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+(?:['_][\p{L}\p{N}]+)*").expect("valid regex");
    static ref ENGLISH_STOPWORDS: Vec<&'static str> = vec![
        "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
        "be","because","been","before","being","below","between","both","but","by",
        "can","could","did","do","does","doing","down","during",
        "each","few","for","from","further",
        "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
        "i","if","in","into","is","it","its","itself",
        "me","more","most","my","myself",
        "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
        "same","she","should","so","some","such",
        "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
        "under","until","up","very",
        "was","we","were","what","when","where","which","while","who","whom","why","with","would",
        "you","your","yours","yourself","yourselves",
    ];
}

/// Unicode word segmenter with an optional stop-word dictionary.
///
/// Words are runs of letters and digits, optionally joined by `_` or `'`
/// (`file_system`, `don't`). In [`SegmentMode::Index`] each such compound is
/// followed by its parts so a query for `system` still finds `file_system`.
#[derive(Debug, Default, Clone)]
pub struct WordSegmenter {
    stop_words: HashSet<String>,
}

impl WordSegmenter {
    /// Segmenter without stop words.
    pub fn new() -> Self { Self::default() }

    /// Segmenter dropping a built-in list of common English words.
    pub fn english() -> Self {
        Self::with_stop_words(ENGLISH_STOPWORDS.iter().copied())
    }

    pub fn with_stop_words<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    /// Load stop words from a dictionary file: one word per line, blank lines
    /// and `#` comments ignored.
    pub fn from_dictionary<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let mut seg = Self::new();
        seg.load_dictionary(path)?;
        Ok(seg)
    }

    /// Add the words of a dictionary file to the current stop words.
    pub fn load_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IndexError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        let before = self.stop_words.len();
        self.stop_words.extend(
            text.lines()
                .filter(|l| !l.trim_start().starts_with('#'))
                .map(|l| l.trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        tracing::info!(path = %path.display(), added = self.stop_words.len() - before, "loaded stop-word dictionary");
        Ok(())
    }

    fn is_stopword(&self, token: &str) -> bool {
        !self.stop_words.is_empty() && self.stop_words.contains(&token.to_lowercase())
    }
}

fn is_joiner(c: char) -> bool {
    c == '_' || c == '\''
}

impl Segmenter for WordSegmenter {
    fn segment(&self, text: &str, mode: SegmentMode) -> Vec<String> {
        let mut tokens = Vec::new();
        for mat in WORD_RE.find_iter(text) {
            let word = mat.as_str();
            if !self.is_stopword(word) {
                tokens.push(word.to_string());
            }
            if mode == SegmentMode::Index && word.contains(is_joiner) {
                for part in word.split(is_joiner) {
                    if !part.is_empty() && !self.is_stopword(part) {
                        tokens.push(part.to_string());
                    }
                }
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_mode_keeps_words_and_case() {
        let t = WordSegmenter::new().segment("Hello, World! boost::asio 1_53_0", SegmentMode::Query);
        assert_eq!(t, vec!["Hello", "World", "boost", "asio", "1_53_0"]);
    }

    #[test]
    fn index_mode_splits_compounds() {
        let t = WordSegmenter::new().segment("read file_system", SegmentMode::Index);
        assert_eq!(t, vec!["read", "file_system", "file", "system"]);
    }

    #[test]
    fn stop_words_are_case_insensitive() {
        let seg = WordSegmenter::english();
        let t = seg.segment("The quick fox and THE dog", SegmentMode::Query);
        assert_eq!(t, vec!["quick", "fox", "dog"]);
    }
}
