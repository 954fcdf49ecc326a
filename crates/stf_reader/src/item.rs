//! Items produced by the reader
//!
use derive_more::derive::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text shown for [`Item::CommentTail`]
pub const COMMENT_TAIL: &str = "#\u{b6}";

/// The smallest unit returned by a read
#[derive(Display, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Item {
    /// `(`
    #[display("(")]
    Open,
    /// `)`
    #[display(")")]
    Close,
    /// A bare word or the contents of a quoted string
    #[display("{_0}")]
    Token(String),
    /// A comment directive was the last thing before a `)`. The `)` itself
    /// is still waiting to be read.
    #[display("#\u{b6}")]
    CommentTail,
    /// End of input, returned repeatedly
    #[display("")]
    Eof,
}

impl Item {
    /// Source text of the item
    pub fn as_str(&self) -> &str {
        match self {
            Item::Open => "(",
            Item::Close => ")",
            Item::Token(text) => text,
            Item::CommentTail => COMMENT_TAIL,
            Item::Eof => "",
        }
    }

    /// Case-insensitive comparison with a token
    pub fn is(&self, token: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(token)
    }

    /// Either end of input or an empty quoted string
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Item::Open)
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Item::Close)
    }

    /// Take the text out of the item
    pub fn into_string(self) -> String {
        match self {
            Item::Token(text) => text,
            other => other.as_str().to_string(),
        }
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::Token(value.to_string())
    }
}
