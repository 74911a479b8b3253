//! HTML character reference decoding.
//!
//! Resolves named references (`&amp;`) through an [`EntityMap`] and numeric
//! references (`&#65;`, `&#x41;`) through their code point. Anything that does
//! not resolve is left in the text unchanged.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Regex pattern for matching named and numeric character references.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#?)([a-zA-Z0-9]+);").expect("invalid reference regex"));

/// Entities known without any caller configuration.
const DEFAULT_ENTITIES: &[(&str, &str)] = &[
    ("quot", "\u{0022}"),
    ("amp", "\u{0026}"),
    ("lt", "\u{003c}"),
    ("gt", "\u{003e}"),
    ("nbsp", "\u{00a0}"),
];

/// Mapping from entity name (without `&` and `;`) to its replacement text.
///
/// Starts from the built-in table (`quot`, `amp`, `lt`, `gt`, `nbsp`); callers
/// can add names or replace the built-in ones with [`EntityMap::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMap {
    entries: HashMap<String, String>,
}

impl Default for EntityMap {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityMap {
    /// Create a map holding only the built-in entities.
    #[must_use]
    pub fn new() -> Self {
        let entries = DEFAULT_ENTITIES
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        Self { entries }
    }

    /// Extend the map, replacing built-in entries with the same name.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in overrides {
            self.insert(name, value);
        }
        self
    }

    /// Add or replace a single entity, returning the previous replacement.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Look up the replacement text for an entity name.
    ///
    /// Names are case-sensitive: `amp` is known, `AMP` is not.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

/// Replace character references in `text`.
///
/// Numeric references whose code point is not a Unicode scalar value
/// (surrogates, anything above U+10FFFF, values overflowing `u32`) decode to
/// U+FFFD. Unknown names and malformed numeric digits stay verbatim.
///
/// Returns the input borrowed when nothing was replaced.
///
/// # Examples
///
/// ```
/// use lw_html::{EntityMap, decode};
///
/// assert_eq!(decode("&amp;&#65;&#x41;", &EntityMap::new()), "&AA");
/// assert_eq!(decode("&unknown;", &EntityMap::new()), "&unknown;");
/// ```
pub fn decode<'a>(text: &'a str, entities: &EntityMap) -> Cow<'a, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    REFERENCE_PATTERN.replace_all(text, |caps: &Captures| {
        let body = &caps[2];
        let resolved = if caps[1].is_empty() {
            entities.get(body).map(str::to_owned)
        } else {
            decode_numeric(body).map(String::from)
        };
        resolved.unwrap_or_else(|| caps[0].to_owned())
    })
}

/// Decode the body of a numeric reference (`65`, `x41`).
///
/// Returns `None` when the digits are not valid for their radix.
fn decode_numeric(body: &str) -> Option<char> {
    let (digits, radix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let scalar = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32);
    Some(scalar.unwrap_or(char::REPLACEMENT_CHARACTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_default(text: &str) -> String {
        decode(text, &EntityMap::new()).into_owned()
    }

    #[test]
    fn test_decode_builtin_entities() {
        assert_eq!(
            decode_default("&quot;&amp;&lt;&gt;&nbsp;"),
            "\"&<>\u{00a0}"
        );
    }

    #[test]
    fn test_decode_mixed_references() {
        assert_eq!(decode_default("&amp;&#65;&#x41;"), "&AA");
    }

    #[test]
    fn test_decode_uppercase_hex_marker() {
        assert_eq!(decode_default("&#X41;&#x6a;"), "Aj");
    }

    #[test]
    fn test_decode_borrows_without_ampersand() {
        assert!(matches!(
            decode("plain text", &EntityMap::new()),
            Cow::Borrowed("plain text")
        ));
    }

    #[test]
    fn test_preserve_unknown_entities() {
        assert_eq!(decode_default("&unknown; &copy;"), "&unknown; &copy;");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(decode_default("&AMP;"), "&AMP;");
    }

    #[test]
    fn test_preserve_reference_without_semicolon() {
        assert_eq!(decode_default("fish &amp chips"), "fish &amp chips");
    }

    #[test]
    fn test_preserve_malformed_numeric_digits() {
        assert_eq!(decode_default("&#12ab;"), "&#12ab;");
        assert_eq!(decode_default("&#xzz;"), "&#xzz;");
        assert_eq!(decode_default("&#x;"), "&#x;");
    }

    #[test]
    fn test_surrogate_code_point_is_replaced() {
        assert_eq!(decode_default("&#xD800;"), "\u{fffd}");
        assert_eq!(decode_default("&#57343;"), "\u{fffd}");
    }

    #[test]
    fn test_out_of_range_code_point_is_replaced() {
        assert_eq!(decode_default("&#x110000;"), "\u{fffd}");
        assert_eq!(decode_default("&#99999999999;"), "\u{fffd}");
    }

    #[test]
    fn test_astral_code_point() {
        assert_eq!(decode_default("&#x1F600;"), "\u{1f600}");
    }

    #[test]
    fn test_nul_code_point_decodes_as_is() {
        assert_eq!(decode_default("&#0;"), "\0");
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let map = EntityMap::new().with_overrides([("copy", "(c)"), ("amp", "and")]);
        assert_eq!(decode("&copy; &amp; &lt;", &map), "(c) and <");
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut map = EntityMap::new();
        assert_eq!(map.insert("gt", "}"), Some(">".to_owned()));
        assert_eq!(map.get("gt"), Some("}"));
        assert_eq!(map.insert("mdash", "\u{2014}"), None);
    }
}
