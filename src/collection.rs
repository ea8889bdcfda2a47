//! Named fragment collections.
//!
//! A `NamedCollection` maps a component name (the fragment's file stem) to its
//! document. Iteration order is discovery order, which the loader fixes to
//! lexicographic file-name order.

use crate::document::Document;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedCollection {
    entries: IndexMap<String, Document>,
}

impl NamedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, document: Document) -> Option<Document> {
        self.entries.insert(name.into(), document)
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.entries.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into a sequence of the entry documents, in discovery order.
    /// Names are dropped.
    pub fn into_sequence(self) -> Document {
        Document::Sequence(self.entries.into_values().collect())
    }
}

impl FromIterator<(String, Document)> for NamedCollection {
    fn from_iter<T: IntoIterator<Item = (String, Document)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
