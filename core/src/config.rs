use std::path::{Path, PathBuf};

/// Where the searcher loads its data from. Built by the binaries from
/// command-line arguments.
#[derive(Debug, Clone)]
pub struct SearcherConfig {
    /// Line-record corpus produced by the parser.
    pub corpus_path: PathBuf,
    /// Optional stop-word dictionary for the default segmenter.
    pub stop_words_path: Option<PathBuf>,
    /// Also drop the built-in list of common English words.
    pub english_stop_words: bool,
}

impl SearcherConfig {
    pub fn new<P: AsRef<Path>>(corpus_path: P) -> Self {
        Self { corpus_path: corpus_path.as_ref().to_path_buf(), stop_words_path: None, english_stop_words: false }
    }

    pub fn with_stop_words<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.stop_words_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_english_stop_words(mut self, enabled: bool) -> Self {
        self.english_stop_words = enabled;
        self
    }
}
