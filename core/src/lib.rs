pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod inverted;
pub mod searcher;
pub mod tokenizer;

pub use config::SearcherConfig;
pub use corpus::Record;
pub use document::{DocId, Document, DocumentStore};
pub use error::IndexError;
pub use index::{BuildStats, Index, IndexBuilder};
pub use inverted::{InvertedIndex, Posting, PostingList};
pub use searcher::{SearchHit, Searcher};
pub use tokenizer::{SegmentMode, Segmenter, WordSegmenter};
