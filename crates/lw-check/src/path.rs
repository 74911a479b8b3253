//! Relative path resolution between site documents.

/// Error resolving a relative path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A `..` segment climbed above the site root.
    #[error("\"{to}\" from \"{from}\" goes above the site root")]
    EscapesRoot {
        /// Path of the document the link starts from.
        from: String,
        /// Relative link path.
        to: String,
    },
}

/// Resolve `to` relative to the document at `from`.
///
/// Resolution starts in the directory containing `from`. `.` segments are
/// skipped, `..` climbs one directory, and any other segment (including an
/// empty one) is appended. The result is root-relative, without a leading
/// slash.
///
/// # Examples
///
/// ```
/// use lw_check::resolve;
///
/// assert_eq!(resolve("a/b/c.html", "../d.html").unwrap(), "a/d.html");
/// assert_eq!(resolve("a/b.html", "./c.html").unwrap(), "a/c.html");
/// assert!(resolve("index.html", "../up.html").is_err());
/// ```
pub fn resolve(from: &str, to: &str) -> Result<String, PathError> {
    let mut segments: Vec<&str> = from.split('/').collect();
    // The last segment is the document itself.
    segments.pop();

    for segment in to.split('/') {
        match segment {
            "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(PathError::EscapesRoot {
                        from: from.to_owned(),
                        to: to.to_owned(),
                    });
                }
            }
            _ => segments.push(segment),
        }
    }

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parent() {
        assert_eq!(resolve("a/b/c.html", "../d.html").unwrap(), "a/d.html");
    }

    #[test]
    fn test_resolve_current_dir() {
        assert_eq!(resolve("a/b.html", "./c.html").unwrap(), "a/c.html");
    }

    #[test]
    fn test_resolve_sibling() {
        assert_eq!(resolve("guide/setup.html", "faq.html").unwrap(), "guide/faq.html");
    }

    #[test]
    fn test_resolve_from_root_document() {
        assert_eq!(resolve("index.html", "guide/setup.html").unwrap(), "guide/setup.html");
    }

    #[test]
    fn test_resolve_to_root() {
        assert_eq!(resolve("sub/src.html", "../t.html").unwrap(), "t.html");
    }

    #[test]
    fn test_resolve_down_then_up() {
        assert_eq!(resolve("a/x.html", "b/../../c/./d.html").unwrap(), "c/d.html");
    }

    #[test]
    fn test_resolve_keeps_empty_segments() {
        assert_eq!(resolve("a/x.html", "b//c.html").unwrap(), "a/b//c.html");
        assert_eq!(resolve("a/x.html", "docs/").unwrap(), "a/docs/");
    }

    #[test]
    fn test_resolve_escaping_root() {
        assert_eq!(
            resolve("index.html", "../x.html"),
            Err(PathError::EscapesRoot {
                from: "index.html".to_owned(),
                to: "../x.html".to_owned(),
            })
        );
        assert!(resolve("a/b.html", "../../x.html").is_err());
    }

    #[test]
    fn test_resolve_climbing_to_root_is_allowed() {
        assert_eq!(resolve("a/b/c.html", "../../x.html").unwrap(), "x.html");
    }
}
