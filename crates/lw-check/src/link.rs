//! Link extraction rules.

/// Elements whose attribute carries a link, and the attribute name.
pub const LINK_ATTRIBUTES: &[(&str, &str)] = &[("a", "href"), ("link", "href"), ("img", "src")];

/// Link-carrying attribute of `tag`, if it has one.
#[must_use]
pub fn link_attribute(tag: &str) -> Option<&'static str> {
    LINK_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attribute)| *attribute)
}

/// Whether `href` is a relative link.
///
/// Empty values, root-absolute paths (`/docs`) and values with a scheme
/// (a `:` before the first `/`, as in `https://` or `mailto:`) are not.
#[must_use]
pub fn is_relative(href: &str) -> bool {
    if href.is_empty() || href.starts_with('/') {
        return false;
    }
    let first_segment = href.split_once('/').map_or(href, |(first, _)| first);
    !first_segment.contains(':')
}

/// A relative link containing more than one `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("link contains more than one '#'")]
pub struct MultipleFragments;

/// A relative link split into its path and fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeLink<'a> {
    /// Path part, `None` for same-document links like `#top`.
    pub path: Option<&'a str>,
    /// Fragment after `#`, `None` when absent or empty.
    pub fragment: Option<&'a str>,
}

impl<'a> RelativeLink<'a> {
    /// Split `href`, returning `Ok(None)` when it is not relative.
    pub fn parse(href: &'a str) -> Result<Option<Self>, MultipleFragments> {
        if !is_relative(href) {
            return Ok(None);
        }

        let mut parts = href.split('#');
        let path = parts.next().unwrap_or_default();
        let fragment = parts.next();
        if parts.next().is_some() {
            return Err(MultipleFragments);
        }

        Ok(Some(Self {
            path: non_empty(path),
            fragment: fragment.and_then(non_empty),
        }))
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
