//! Structural parser: balanced open/close events from tokens.
//!
//! The parser keeps a stack of open elements and applies the implicit closing
//! rules in [`crate::tags`], so omitted closing tags (`<li>`, `<p>`, table
//! cells) and void elements still produce a well-nested event stream.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::entities::EntityMap;
use crate::tags;
use crate::token::{TagEnd, Token};
use crate::tokenizer::{Tokenizer, Tokens};

/// Ordered attribute mapping of one element.
///
/// Setting a name that is already present replaces its value in place, so
/// iteration order is the order in which names first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, returning the replaced value if the name was present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Value of the attribute `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

/// A structural unit of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// An element opened.
    Open {
        /// Tag name (lowercase).
        name: String,
        /// Attributes in source order.
        attributes: Attributes,
        /// True for `/>` and void elements; the matching [`ParseEvent::Close`]
        /// follows immediately.
        self_closing: bool,
    },
    /// Decoded character data.
    Text(String),
    /// Comment body.
    Comment(String),
    /// An element closed, explicitly or implicitly.
    Close {
        /// Tag name (lowercase).
        name: String,
        /// Mirrors the flag of the matching [`ParseEvent::Open`].
        self_closing: bool,
    },
}

/// HTML parser configured with an entity table.
///
/// # Example
///
/// ```
/// use lw_html::{ParseEvent, Parser};
///
/// let parser = Parser::new();
/// let names: Vec<String> = parser
///     .parse("<ul><li>A<li>B</ul>")
///     .filter_map(|event| match event {
///         ParseEvent::Close { name, .. } => Some(name),
///         _ => None,
///     })
///     .collect();
/// assert_eq!(names, ["li", "li", "ul"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    tokenizer: Tokenizer,
}

impl Parser {
    /// Create a parser using the built-in entity table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser using a custom entity table.
    #[must_use]
    pub fn with_entities(entities: EntityMap) -> Self {
        Self {
            tokenizer: Tokenizer::with_entities(entities),
        }
    }

    /// Parse `html` lazily. Each call owns a fresh element stack.
    pub fn parse<'a>(&'a self, html: &'a str) -> Events<'a> {
        Events {
            tokens: self.tokenizer.tokenize(html),
            stack: Vec::new(),
            pending: None,
            queue: VecDeque::new(),
        }
    }
}

/// Element whose opening tag has started but not yet ended.
#[derive(Debug)]
struct PendingElement {
    name: String,
    attributes: Attributes,
}

/// Lazy event stream returned by [`Parser::parse`].
#[derive(Debug)]
pub struct Events<'a> {
    tokens: Tokens<'a>,
    /// Names of open elements, innermost last.
    stack: Vec<String>,
    pending: Option<PendingElement>,
    queue: VecDeque<ParseEvent>,
}

impl Events<'_> {
    fn handle(&mut self, token: Token) {
        match token {
            Token::OpeningTag { name } => {
                self.pending = Some(PendingElement {
                    name,
                    attributes: Attributes::new(),
                });
            }
            Token::Attribute { name, value } => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.attributes.insert(name, value);
                }
            }
            Token::OpeningTagEnd { name, end } => self.end_opening_tag(&name, end),
            Token::ClosingTag { name } => self.close_tag(&name),
            Token::Text(text) => self.queue.push_back(ParseEvent::Text(text)),
            Token::Comment(text) => self.queue.push_back(ParseEvent::Comment(text)),
            Token::Start | Token::Done => {}
        }
    }

    fn end_opening_tag(&mut self, name: &str, end: TagEnd) {
        let Some(element) = self.pending.take() else {
            self.queue
                .push_back(ParseEvent::Text(end.as_str().to_owned()));
            return;
        };

        let self_closing = end == TagEnd::SelfClosing || tags::is_self_closing(name);

        if self
            .stack
            .last()
            .is_some_and(|top| tags::is_closed_by(top, &element.name))
        {
            self.pop_and_close();
        }

        self.queue.push_back(ParseEvent::Open {
            name: element.name.clone(),
            attributes: element.attributes,
            self_closing,
        });

        if self_closing {
            self.queue.push_back(ParseEvent::Close {
                name: element.name,
                self_closing: true,
            });
        } else {
            self.stack.push(element.name);
        }
    }

    fn close_tag(&mut self, name: &str) {
        let depth = self.stack.len();
        let Some(top) = self.stack.last() else {
            return;
        };

        if top == name {
            self.pop_and_close();
        } else if depth >= 2
            && self.stack[depth - 2] == name
            && tags::is_closed_by_parent(top)
        {
            self.pop_and_close();
            self.pop_and_close();
        }
        // Otherwise the closing tag has no open element to match and is dropped.
    }

    fn pop_and_close(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.queue.push_back(ParseEvent::Close {
                name,
                self_closing: false,
            });
        }
    }
}

impl Iterator for Events<'_> {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<ParseEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }

            if let Some(token) = self.tokens.next() {
                self.handle(token);
            } else if self.stack.is_empty() {
                return None;
            } else {
                while !self.stack.is_empty() {
                    self.pop_and_close();
                }
            }
        }
    }
}

impl FusedIterator for Events<'_> {}
