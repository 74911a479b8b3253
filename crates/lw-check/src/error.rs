//! Link check errors.

use std::fmt;

/// A relative link whose target document or anchor does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrokenLink {
    /// Path of the document containing the link.
    pub source_path: String,
    /// Link value as written (after entity decoding).
    pub href: String,
}

impl BrokenLink {
    /// Create a broken link record.
    pub fn new(source_path: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            href: href.into(),
        }
    }
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From \"{}\" to \"{}\"", self.source_path, self.href)
    }
}

/// Broken links of a site, in source path then document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokenLinks(Vec<BrokenLink>);

impl BrokenLinks {
    /// Wrap a list of broken links.
    #[must_use]
    pub fn new(links: Vec<BrokenLink>) -> Self {
        Self(links)
    }

    /// The broken links.
    #[must_use]
    pub fn links(&self) -> &[BrokenLink] {
        &self.0
    }

    /// Number of broken links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no broken links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl fmt::Display for BrokenLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("The site has broken relative links:\n")?;
        for link in self {
            write!(f, "\n{link}")?;
        }
        Ok(())
    }
}

impl IntoIterator for BrokenLinks {
    type Item = BrokenLink;
    type IntoIter = std::vec::IntoIter<BrokenLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BrokenLinks {
    type Item = &'a BrokenLink;
    type IntoIter = std::slice::Iter<'a, BrokenLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Error returned by [`LinkChecker::check`](crate::LinkChecker::check).
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// A relative link contains more than one `#`.
    #[error("Invalid link \"{href}\" in \"{source_path}\": more than one '#'")]
    MalformedLink { source_path: String, href: String },

    /// A relative link climbs above the site root.
    #[error("Link \"{href}\" in \"{source_path}\" goes above the site root")]
    EscapesRoot { source_path: String, href: String },

    /// The site has broken relative links.
    #[error("{0}")]
    BrokenLinks(BrokenLinks),
}

impl CheckError {
    /// Broken links, when this is [`CheckError::BrokenLinks`].
    #[must_use]
    pub fn broken_links(&self) -> Option<&BrokenLinks> {
        match self {
            Self::BrokenLinks(links) => Some(links),
            _ => None,
        }
    }
}
