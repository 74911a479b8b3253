//! Tolerant streaming HTML tokenizer and structural parser.
//!
//! This crate provides:
//! - [`Tokenizer`]: a lexical state machine producing [`Token`]s
//! - [`Parser`]: a structural layer producing balanced [`ParseEvent`]s,
//!   applying HTML's implicit closing rules for void elements, list items,
//!   paragraphs and table parts
//! - [`decode`]: character reference decoding with a configurable
//!   [`EntityMap`]
//!
//! It targets generated, mostly well-formed HTML. It is not a WHATWG parser:
//! there is no tree construction, foster parenting or raw-text handling
//! beyond `<script>`.
//!
//! # Example
//!
//! ```
//! use lw_html::ParseEvent;
//!
//! let ids: Vec<String> = lw_html::parse(r#"<h1 id="intro">Hi</h1><p id="body">"#)
//!     .filter_map(|event| match event {
//!         ParseEvent::Open { attributes, .. } => attributes.get("id").map(str::to_owned),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(ids, ["intro", "body"]);
//! ```

mod entities;
mod parser;
pub mod tags;
mod token;
mod tokenizer;

use std::sync::LazyLock;

pub use entities::{EntityMap, decode};
pub use parser::{Attributes, Events, ParseEvent, Parser};
pub use token::{TagEnd, Token};
pub use tokenizer::{Tokenizer, Tokens};

/// Parser with the built-in entity table, shared by [`parse`].
static DEFAULT_PARSER: LazyLock<Parser> = LazyLock::new(Parser::new);

/// Parse `html` with the built-in entity table.
pub fn parse(html: &str) -> Events<'_> {
    DEFAULT_PARSER.parse(html)
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::Parser: Send, Sync);
    static_assertions::assert_impl_all!(super::Tokenizer: Send, Sync);

    use super::*;

    #[test]
    fn test_parse_uses_default_entities() {
        let events: Vec<ParseEvent> = parse("&lt;tag&gt; &copy;").collect();
        assert_eq!(events, vec![ParseEvent::Text("<tag> &copy;".to_owned())]);
    }
}
