//! Documents and document sets.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// A file of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root-relative, forward-slash separated path (e.g. `guide/setup.html`).
    pub path: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl Document {
    /// Create a document.
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Content decoded as UTF-8, with invalid sequences replaced by U+FFFD.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Documents keyed by path, iterated in ascending path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: BTreeMap<String, Document>,
}

impl DocumentSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, returning the one it replaced at the same path.
    pub fn insert(&mut self, document: Document) -> Option<Document> {
        self.documents.insert(document.path.clone(), document)
    }

    /// Document at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    /// Whether a document exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over documents in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}

impl FromIterator<Document> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Document> for DocumentSet {
    fn extend<I: IntoIterator<Item = Document>>(&mut self, iter: I) {
        for document in iter {
            self.insert(document);
        }
    }
}
