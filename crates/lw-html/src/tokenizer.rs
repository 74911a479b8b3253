//! Lexical state machine for tolerant HTML scanning.
//!
//! The tokenizer never fails. Markup it does not recognize is passed through
//! as text, unterminated comments and scripts run to the end of input, and
//! every run ends with [`Token::Done`].
//!
//! # States
//!
//! - **Text**: character data, and the `<` that may start a tag or comment
//! - **Tag**: attributes of an opening tag, up to `>` or `/>`
//! - **Comment**: everything up to `-->`
//! - **Script**: everything up to `</script>`, emitted as one text token

use std::iter::FusedIterator;
use std::mem;

use crate::entities::{EntityMap, decode};
use crate::token::{TagEnd, Token};

/// Closing tag that ends script content.
const SCRIPT_END: &[u8] = b"</script>";

/// Tokenizer configured with an entity table.
///
/// Each call to [`Tokenizer::tokenize`] starts an independent traversal, so
/// one tokenizer can be shared across threads and documents.
///
/// # Example
///
/// ```
/// use lw_html::{Token, Tokenizer};
///
/// let tokenizer = Tokenizer::new();
/// let tokens: Vec<Token> = tokenizer.tokenize("<b>hi</b>").collect();
/// assert_eq!(tokens.first(), Some(&Token::Start));
/// assert_eq!(tokens.last(), Some(&Token::Done));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    entities: EntityMap,
}

impl Tokenizer {
    /// Create a tokenizer using the built-in entity table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer using a custom entity table.
    #[must_use]
    pub fn with_entities(entities: EntityMap) -> Self {
        Self { entities }
    }

    /// Tokenize `html` lazily.
    pub fn tokenize<'a>(&'a self, html: &'a str) -> Tokens<'a> {
        Tokens {
            scanner: Scanner::new(html, &self.entities),
            entities: &self.entities,
            text: String::new(),
            held: None,
        }
    }
}

/// Lazy token stream returned by [`Tokenizer::tokenize`].
///
/// Adjacent raw text pieces are joined and decoded together, so a reference
/// such as `&amp;` is never split across two text tokens.
#[derive(Debug)]
pub struct Tokens<'a> {
    scanner: Scanner<'a>,
    entities: &'a EntityMap,
    text: String,
    held: Option<Token>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.held.take() {
            return Some(token);
        }

        loop {
            match self.scanner.next_step()? {
                Step::Text(piece) => self.text.push_str(piece),
                Step::Token(token) => {
                    if self.text.is_empty() {
                        return Some(token);
                    }
                    self.held = Some(token);
                    let text = mem::take(&mut self.text);
                    return Some(Token::Text(decode(&text, self.entities).into_owned()));
                }
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InText,
    InTag,
    InComment,
    InScript,
    /// Input was consumed by an unterminated comment or script.
    Stopped,
}

/// Output of one scanner step: raw (undecoded) text or a finished token.
#[derive(Debug)]
enum Step<'a> {
    Text(&'a str),
    Token(Token),
}

/// Undecoded state machine over the input string.
///
/// All delimiters it looks for are ASCII, so every byte offset it stores is
/// on a char boundary.
#[derive(Debug)]
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    state: State,
    entities: &'a EntityMap,
    current_tag: String,
    started: bool,
    finished: bool,
    queued: Option<Token>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, entities: &'a EntityMap) -> Self {
        Self {
            input,
            pos: 0,
            state: State::InText,
            entities,
            current_tag: String::new(),
            started: false,
            finished: false,
            queued: None,
        }
    }

    fn next_step(&mut self) -> Option<Step<'a>> {
        if !self.started {
            self.started = true;
            return Some(Step::Token(Token::Start));
        }
        if let Some(token) = self.queued.take() {
            return Some(Step::Token(token));
        }

        loop {
            if self.pos >= self.input.len() || self.state == State::Stopped {
                if self.finished {
                    return None;
                }
                self.finished = true;
                return Some(Step::Token(Token::Done));
            }

            let step = match self.state {
                State::InText => self.scan_text(),
                State::InTag => self.scan_tag(),
                State::InComment => Some(self.scan_comment()),
                State::InScript => Some(self.scan_script()),
                State::Stopped => None,
            };
            if step.is_some() {
                return step;
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Scan text or the markup introduced by `<`. Returns `None` after a
    /// comment opener, which switches state without emitting anything.
    fn scan_text(&mut self) -> Option<Step<'a>> {
        let rest = self.rest();
        if !rest.starts_with('<') {
            let len = rest.find('<').unwrap_or(rest.len());
            self.pos += len;
            return Some(Step::Text(&rest[..len]));
        }

        if let Some(len) = name_len(&rest[1..], is_tag_name_byte) {
            let name = rest[1..=len].to_ascii_lowercase();
            self.pos += 1 + len;
            self.current_tag.clone_from(&name);
            self.state = State::InTag;
            return Some(Step::Token(Token::OpeningTag { name }));
        }

        if let Some(after) = rest.strip_prefix("</")
            && let Some(len) = name_len(after, is_tag_name_byte)
            && after[len..].starts_with('>')
        {
            let name = after[..len].to_ascii_lowercase();
            self.pos += 2 + len + 1;
            return Some(Step::Token(Token::ClosingTag { name }));
        }

        if rest.starts_with("<!--") {
            self.pos += 4;
            self.state = State::InComment;
            return None;
        }

        self.pos += 1;
        Some(Step::Text(&rest[..1]))
    }

    /// Scan one attribute or the tag end. Returns `None` when neither is
    /// present and the scanner falls back to text.
    fn scan_tag(&mut self) -> Option<Step<'a>> {
        let rest = self.rest();
        let ws = leading_whitespace(rest);

        if ws > 0
            && let Some(len) = name_len(&rest[ws..], is_attribute_name_byte)
        {
            let name = rest[ws..ws + len].to_ascii_lowercase();
            let mut consumed = ws + len;

            let after_name = &rest[consumed..];
            let eq_ws = leading_whitespace(after_name);
            let value = if after_name[eq_ws..].starts_with('=') {
                consumed += eq_ws + 1;
                consumed += leading_whitespace(&rest[consumed..]);
                let (raw, len) = read_value(&rest[consumed..]);
                consumed += len;
                decode(raw, self.entities).into_owned()
            } else {
                String::new()
            };

            self.pos += consumed;
            return Some(Step::Token(Token::Attribute { name, value }));
        }

        let after_ws = &rest[ws..];
        let end = if after_ws.starts_with("/>") {
            Some(TagEnd::SelfClosing)
        } else if after_ws.starts_with('>') {
            Some(TagEnd::Close)
        } else {
            None
        };

        let Some(end) = end else {
            self.state = State::InText;
            return None;
        };

        self.pos += ws + end.as_str().len();
        self.state = if self.current_tag == "script" {
            State::InScript
        } else {
            State::InText
        };
        Some(Step::Token(Token::OpeningTagEnd {
            name: self.current_tag.clone(),
            end,
        }))
    }

    fn scan_comment(&mut self) -> Step<'a> {
        let rest = self.rest();
        if let Some(end) = rest.find("-->") {
            self.pos += end + 3;
            self.state = State::InText;
            Step::Token(Token::Comment(rest[..end].to_owned()))
        } else {
            self.pos = self.input.len();
            self.state = State::Stopped;
            Step::Token(Token::Comment(rest.to_owned()))
        }
    }

    fn scan_script(&mut self) -> Step<'a> {
        let rest = self.rest();
        let end = rest
            .as_bytes()
            .windows(SCRIPT_END.len())
            .position(|window| window.eq_ignore_ascii_case(SCRIPT_END));

        if let Some(end) = end {
            self.pos += end + SCRIPT_END.len();
            self.state = State::InText;
            self.queued = Some(Token::ClosingTag {
                name: "script".to_owned(),
            });
            Step::Text(&rest[..end])
        } else {
            self.pos = self.input.len();
            self.state = State::Stopped;
            Step::Text(rest)
        }
    }
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn is_attribute_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Length of a name at the start of `s`: one run of name bytes, optionally
/// followed by `:` and a second run (`xlink:href`).
fn name_len(s: &str, is_name_byte: fn(u8) -> bool) -> Option<usize> {
    let bytes = s.as_bytes();
    let first = bytes.iter().take_while(|b| is_name_byte(**b)).count();
    if first == 0 {
        return None;
    }

    if bytes.get(first) == Some(&b':') {
        let second = bytes[first + 1..]
            .iter()
            .take_while(|b| is_name_byte(**b))
            .count();
        if second > 0 {
            return Some(first + 1 + second);
        }
    }
    Some(first)
}

/// Byte length of the whitespace prefix of `s`.
fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Read an attribute value at the start of `s`.
///
/// Returns the raw value and the number of bytes consumed. Quoted values run
/// to the matching quote (or the end of input); unquoted values stop at
/// whitespace or `>`.
fn read_value(s: &str) -> (&str, usize) {
    match s.as_bytes().first() {
        Some(&quote @ (b'"' | b'\'')) => {
            let body = &s[1..];
            match body.find(char::from(quote)) {
                Some(end) => (&body[..end], end + 2),
                None => (body, s.len()),
            }
        }
        _ => {
            let len = s
                .find(|c: char| c == '>' || c.is_whitespace())
                .unwrap_or(s.len());
            (&s[..len], len)
        }
    }
}
