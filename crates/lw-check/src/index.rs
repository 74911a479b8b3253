//! Per-document anchor index.

use std::collections::{HashMap, HashSet};

use lw_html::{ParseEvent, Parser};
use rayon::prelude::*;

use crate::document::Document;

/// Attributes whose values can be targeted by a fragment.
const ANCHOR_ATTRIBUTES: &[&str] = &["id", "name"];

/// Anchor ids defined by each indexed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    ids: HashMap<String, HashSet<String>>,
}

impl IdIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every document in `documents`, fanning out with rayon when
    /// `parallel` is set.
    pub fn build(parser: &Parser, documents: &[&Document], parallel: bool) -> Self {
        let index_document = |document: &&Document| {
            let ids = collect_ids(parser, &document.text());
            tracing::debug!(path = %document.path, ids = ids.len(), "Indexed document");
            (document.path.clone(), ids)
        };

        let ids = if parallel {
            documents.par_iter().map(index_document).collect()
        } else {
            documents.iter().map(index_document).collect()
        };
        Self { ids }
    }

    /// Record the ids of the document at `path`.
    pub fn insert(&mut self, path: impl Into<String>, ids: HashSet<String>) {
        self.ids.insert(path.into(), ids);
    }

    /// Ids of the document at `path`, `None` when it was not indexed.
    #[must_use]
    pub fn ids(&self, path: &str) -> Option<&HashSet<String>> {
        self.ids.get(path)
    }

    /// Whether the document at `path` was indexed and defines `id`.
    #[must_use]
    pub fn contains(&self, path: &str, id: &str) -> bool {
        self.ids(path).is_some_and(|ids| ids.contains(id))
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no document was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(String, HashSet<String>)> for IdIndex {
    fn from_iter<I: IntoIterator<Item = (String, HashSet<String>)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Collect non-empty `id` and `name` values of every element in `html`.
pub fn collect_ids(parser: &Parser, html: &str) -> HashSet<String> {
    let mut ids = HashSet::new();
    for event in parser.parse(html) {
        let ParseEvent::Open { attributes, .. } = event else {
            continue;
        };
        for attribute in ANCHOR_ATTRIBUTES {
            if let Some(value) = attributes.get(attribute).filter(|value| !value.is_empty()) {
                ids.insert(value.to_owned());
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_of(html: &str) -> Vec<String> {
        let mut ids: Vec<String> = collect_ids(&Parser::new(), html).into_iter().collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_collect_id_and_name() {
        assert_eq!(
            ids_of(r#"<h2 id="setup">Setup</h2><a name="legacy"></a><p id="x" name="y">"#),
            ["legacy", "setup", "x", "y"]
        );
    }

    #[test]
    fn test_skip_empty_values() {
        assert!(ids_of(r#"<div id=""><a name></a></div>"#).is_empty());
    }

    #[test]
    fn test_ids_are_decoded() {
        assert_eq!(ids_of(r#"<h2 id="a&amp;b">"#), ["a&b"]);
    }

    #[test]
    fn test_ids_inside_script_are_ignored() {
        assert_eq!(
            ids_of(r#"<script>document.write('<div id="fake">')</script><div id="real">"#),
            ["real"]
        );
    }

    #[test]
    fn test_build_matches_sequential() {
        let first = Document::new("a.html", r#"<h1 id="a1">A</h1>"#);
        let second = Document::new("b.html", r#"<a name="b1"></a><p id="b2">"#);
        let documents = [&first, &second];
        let parser = Parser::new();

        let parallel = IdIndex::build(&parser, &documents, true);
        let sequential = IdIndex::build(&parser, &documents, false);

        assert_eq!(parallel, sequential);
        assert!(parallel.contains("a.html", "a1"));
        assert!(parallel.contains("b.html", "b2"));
        assert_eq!(parallel.len(), 2);
    }

    #[test]
    fn test_index_lookup() {
        let mut index = IdIndex::new();
        index.insert("a.html", HashSet::from(["top".to_owned()]));

        assert!(index.contains("a.html", "top"));
        assert!(!index.contains("a.html", "bottom"));
        assert!(!index.contains("b.html", "top"));
        assert!(index.ids("b.html").is_none());
        assert_eq!(index.len(), 1);
    }
}
