use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// A corpus or dictionary file could not be opened or read. Fatal.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus line did not split into exactly title, url and content.
    /// The record is skipped and the build carries on.
    #[error("malformed record at line {line}: expected 3 fields, found {fields}")]
    Parse { line: usize, fields: usize },
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io { path: path.into(), source }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, IndexError::Io { .. })
    }
}
