use serde::{Deserialize, Serialize};

pub type DocId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Forward index: documents in ingestion order, addressed by position.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Append a document and return it. Its id is the store size before the
    /// push.
    pub fn push(&mut self, title: String, url: String, content: String) -> &Document {
        let id = self.docs.len() as DocId;
        self.docs.push(Document { id, title, url, content });
        &self.docs[self.docs.len() - 1]
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Document> {
        usize::try_from(doc_id).ok().and_then(|i| self.docs.get(i))
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.docs.iter() }
}
