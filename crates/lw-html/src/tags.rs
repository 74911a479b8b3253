//! Tag nesting tables used by the parser.
//!
//! These are plain data so the rules can be read and tested without running
//! the parser. All names are lowercase.

/// Elements that never have content or a closing tag.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose closing tag may be omitted when the parent closes.
pub const CLOSED_BY_PARENT: &[&str] = &[
    "p", "li", "dd", "rb", "rt", "rtc", "rp", "optgroup", "option", "tbody", "tfoot", "tr", "td",
    "th",
];

/// Open element → opening tags that implicitly close it.
pub const CLOSED_BY_SIBLINGS: &[(&str, &[&str])] = &[
    (
        "p",
        &[
            "address",
            "article",
            "aside",
            "blockquote",
            "div",
            "dl",
            "fieldset",
            "footer",
            "form",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "header",
            "hgroup",
            "hr",
            "main",
            "nav",
            "ol",
            "p",
            "pre",
            "section",
            "table",
            "ul",
        ],
    ),
    ("li", &["li"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dt", "dd"]),
    ("rb", &["rb", "rt", "rtc", "rp"]),
    ("rt", &["rb", "rt", "rtc", "rp"]),
    ("rtc", &["rb", "rtc", "rp"]),
    ("rp", &["rb", "rt", "rtc", "rp"]),
    ("optgroup", &["optgroup"]),
    ("option", &["option", "optgroup"]),
    ("thead", &["tbody", "tfoot"]),
    ("tbody", &["tbody", "tfoot"]),
    ("tfoot", &["tbody"]),
    ("tr", &["tr"]),
    ("td", &["td", "th"]),
    ("th", &["td", "th"]),
];

/// Whether `tag` is a void element.
#[must_use]
pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

/// Whether an open `tag` is implicitly closed when `next` opens after it.
#[must_use]
pub fn is_closed_by(tag: &str, next: &str) -> bool {
    CLOSED_BY_SIBLINGS
        .iter()
        .find(|(open, _)| *open == tag)
        .is_some_and(|(_, closers)| closers.contains(&next))
}

/// Whether an open `tag` is implicitly closed by its parent's closing tag.
#[must_use]
pub fn is_closed_by_parent(tag: &str) -> bool {
    CLOSED_BY_PARENT.contains(&tag)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_void_elements() {
        for tag in ["img", "br", "link", "meta", "input", "wbr"] {
            assert!(is_self_closing(tag), "{tag} should be self-closing");
        }
        for tag in ["a", "div", "p", "script"] {
            assert!(!is_self_closing(tag), "{tag} should not be self-closing");
        }
    }

    #[test]
    fn test_paragraph_closed_by_block_elements() {
        assert!(is_closed_by("p", "div"));
        assert!(is_closed_by("p", "h3"));
        assert!(is_closed_by("p", "p"));
        assert!(is_closed_by("p", "ul"));
        assert!(!is_closed_by("p", "span"));
        assert!(!is_closed_by("p", "a"));
    }

    #[test]
    fn test_list_items() {
        assert!(is_closed_by("li", "li"));
        assert!(!is_closed_by("li", "ul"));
        assert!(is_closed_by("dt", "dd"));
        assert!(is_closed_by("dd", "dt"));
    }

    #[test]
    fn test_ruby_annotations() {
        assert!(is_closed_by("rt", "rp"));
        assert!(is_closed_by("rtc", "rb"));
        assert!(!is_closed_by("rtc", "rt"));
    }

    #[test]
    fn test_table_sections() {
        assert!(is_closed_by("thead", "tbody"));
        assert!(!is_closed_by("thead", "thead"));
        assert!(is_closed_by("tfoot", "tbody"));
        assert!(!is_closed_by("tfoot", "tfoot"));
        assert!(is_closed_by("tr", "tr"));
        assert!(is_closed_by("td", "th"));
        assert!(is_closed_by("th", "td"));
        assert!(!is_closed_by("td", "tr"));
    }

    #[test]
    fn test_unlisted_elements_are_never_closed_by_siblings() {
        assert!(!is_closed_by("div", "div"));
        assert!(!is_closed_by("span", "p"));
    }

    #[test]
    fn test_closed_by_parent() {
        for tag in ["p", "li", "option", "tr", "td", "th"] {
            assert!(is_closed_by_parent(tag), "{tag}");
        }
        for tag in ["div", "ul", "dt", "thead", "table"] {
            assert!(!is_closed_by_parent(tag), "{tag}");
        }
    }

    #[test]
    fn test_sibling_table_has_unique_keys() {
        let keys: HashSet<&str> = CLOSED_BY_SIBLINGS.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(keys.len(), CLOSED_BY_SIBLINGS.len());
    }

    #[test]
    fn test_tables_are_lowercase() {
        let all = SELF_CLOSING_TAGS
            .iter()
            .chain(CLOSED_BY_PARENT)
            .chain(CLOSED_BY_SIBLINGS.iter().flat_map(|(tag, closers)| {
                std::iter::once(tag).chain(closers.iter())
            }));
        for tag in all {
            assert_eq!(*tag, tag.to_ascii_lowercase());
        }
    }
}
