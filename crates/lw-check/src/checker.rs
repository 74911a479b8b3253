//! Site-wide relative link validation.
//!
//! A check runs in two passes over the HTML documents of a [`DocumentSet`]:
//! the index pass collects the anchor ids each document defines, then the
//! validation pass resolves every relative link against the set and the
//! index. Both passes fan out across documents with rayon.

use std::sync::LazyLock;

use lw_html::{EntityMap, ParseEvent, Parser};
use rayon::prelude::*;
use regex::Regex;

use crate::document::{Document, DocumentSet};
use crate::error::{BrokenLink, BrokenLinks, CheckError};
use crate::index::IdIndex;
use crate::link::{RelativeLink, link_attribute};
use crate::path::{PathError, resolve};

/// Paths treated as HTML link sources when no pattern is configured.
pub const DEFAULT_HTML_PATTERN: &str = r"^.+\.html$";

static DEFAULT_HTML_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_HTML_PATTERN).expect("invalid html pattern regex"));

/// Links found in one document.
struct DocumentReport {
    checked: usize,
    broken: Vec<BrokenLink>,
}

/// Checks that relative links between site documents resolve.
///
/// # Example
///
/// ```
/// use lw_check::{Document, DocumentSet, LinkChecker};
///
/// let site: DocumentSet = [
///     Document::new("index.html", r#"<a href="guide.html#setup">Guide</a>"#),
///     Document::new("guide.html", r#"<h2 id="setup">Setup</h2>"#),
/// ]
/// .into_iter()
/// .collect();
///
/// assert!(LinkChecker::new().check(&site).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LinkChecker {
    parser: Parser,
    html_pattern: Regex,
    parallel: bool,
}

impl Default for LinkChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkChecker {
    /// Create a checker with the built-in entity table, the default HTML
    /// pattern and parallel passes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            html_pattern: DEFAULT_HTML_REGEX.clone(),
            parallel: true,
        }
    }

    /// Decode attribute values with a custom entity table.
    #[must_use]
    pub fn with_entities(mut self, entities: EntityMap) -> Self {
        self.parser = Parser::with_entities(entities);
        self
    }

    /// Select link source documents by path.
    #[must_use]
    pub fn with_html_pattern(mut self, pattern: Regex) -> Self {
        self.html_pattern = pattern;
        self
    }

    /// Enable or disable rayon fan-out.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether the document at `path` is parsed for links and ids.
    #[must_use]
    pub fn is_html(&self, path: &str) -> bool {
        self.html_pattern.is_match(path)
    }

    /// Collect the anchor ids of every HTML document.
    pub fn build_index(&self, documents: &DocumentSet) -> IdIndex {
        IdIndex::build(&self.parser, &self.html_documents(documents), self.parallel)
    }

    /// Check all relative links, failing with [`CheckError::BrokenLinks`]
    /// when any of them does not resolve.
    pub fn check(&self, documents: &DocumentSet) -> Result<(), CheckError> {
        let broken = self.find_broken_links(documents)?;
        if broken.is_empty() {
            Ok(())
        } else {
            Err(CheckError::BrokenLinks(BrokenLinks::new(broken)))
        }
    }

    /// Collect broken relative links, ordered by source path then position
    /// in the document.
    ///
    /// Malformed links and links escaping the site root abort the run.
    pub fn find_broken_links(
        &self,
        documents: &DocumentSet,
    ) -> Result<Vec<BrokenLink>, CheckError> {
        let sources = self.html_documents(documents);
        let index = IdIndex::build(&self.parser, &sources, self.parallel);

        let check_document =
            |document: &&Document| self.check_document(document, documents, &index);
        let reports: Vec<Result<DocumentReport, CheckError>> = if self.parallel {
            sources.par_iter().map(check_document).collect()
        } else {
            sources.iter().map(check_document).collect()
        };

        let mut checked = 0;
        let mut broken = Vec::new();
        for report in reports {
            let report = report?;
            checked += report.checked;
            broken.extend(report.broken);
        }

        tracing::info!(
            documents = documents.len(),
            sources = sources.len(),
            links = checked,
            broken = broken.len(),
            "Link check completed"
        );
        Ok(broken)
    }

    fn html_documents<'a>(&self, documents: &'a DocumentSet) -> Vec<&'a Document> {
        documents.iter().filter(|document| self.is_html(&document.path)).collect()
    }

    fn check_document(
        &self,
        document: &Document,
        documents: &DocumentSet,
        index: &IdIndex,
    ) -> Result<DocumentReport, CheckError> {
        let html = document.text();
        let mut report = DocumentReport {
            checked: 0,
            broken: Vec::new(),
        };

        for event in self.parser.parse(&html) {
            let ParseEvent::Open { name, attributes, .. } = event else {
                continue;
            };
            let Some(href) = link_attribute(&name).and_then(|attribute| attributes.get(attribute))
            else {
                continue;
            };
            let link = RelativeLink::parse(href).map_err(|_| CheckError::MalformedLink {
                source_path: document.path.clone(),
                href: href.to_owned(),
            })?;
            let Some(link) = link else {
                continue;
            };

            report.checked += 1;
            let resolves = link_resolves(&document.path, &link, documents, index).map_err(|_| {
                CheckError::EscapesRoot {
                    source_path: document.path.clone(),
                    href: href.to_owned(),
                }
            })?;
            if !resolves {
                tracing::debug!(path = %document.path, href, "Broken link");
                report.broken.push(BrokenLink::new(document.path.clone(), href));
            }
        }

        tracing::debug!(
            path = %document.path,
            links = report.checked,
            broken = report.broken.len(),
            "Checked document"
        );
        Ok(report)
    }
}

/// Whether `link` from the document at `source` reaches an existing document
/// and, when it has a fragment, an id defined there.
fn link_resolves(
    source: &str,
    link: &RelativeLink<'_>,
    documents: &DocumentSet,
    index: &IdIndex,
) -> Result<bool, PathError> {
    let target = match link.path {
        Some(path) => {
            let target = resolve(source, path)?;
            if !documents.contains(&target) {
                return Ok(false);
            }
            target
        }
        None => source.to_owned(),
    };
    Ok(link.fragment.is_none_or(|id| index.contains(&target, id)))
}
