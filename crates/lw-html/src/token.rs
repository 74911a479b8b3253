//! Token types produced by the tokenizer.

use std::fmt;

/// How an opening tag was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagEnd {
    /// `>`
    Close,
    /// `/>`
    SelfClosing,
}

impl TagEnd {
    /// The markup that ended the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Close => ">",
            Self::SelfClosing => "/>",
        }
    }
}

impl fmt::Display for TagEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical unit of HTML, in document order.
///
/// Every tokenizer run starts with [`Token::Start`] and ends with
/// [`Token::Done`]. Tag and attribute names are ASCII-lowercased; text and
/// attribute values are entity-decoded, comments are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Beginning of the run.
    Start,
    /// `<name` of an opening tag.
    OpeningTag {
        /// Tag name.
        name: String,
    },
    /// An attribute of the most recent opening tag. Valueless attributes
    /// carry an empty value.
    Attribute {
        /// Attribute name.
        name: String,
        /// Decoded attribute value.
        value: String,
    },
    /// `>` or `/>` closing the most recent opening tag.
    OpeningTagEnd {
        /// Name of the tag being ended.
        name: String,
        /// Terminating markup.
        end: TagEnd,
    },
    /// A maximal run of character data.
    Text(String),
    /// Comment body, without `<!--` and `-->`.
    Comment(String),
    /// `</name>`.
    ClosingTag {
        /// Tag name.
        name: String,
    },
    /// End of the run.
    Done,
}
