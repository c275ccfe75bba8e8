//! Selector tokens.
//!
//! Unlike a full CSS tokenizer, selector tokens never lose text: every token
//! keeps its raw slice of the input, so concatenating the raw text of all
//! tokens reproduces the input exactly.

use selkit_ast::AttributeOperator;

/// The lexical class of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of whitespace.
    Space,
    /// An identifier-like run. Backslash escapes are part of the word.
    Word {
        /// The text with escapes decoded.
        value: String,
    },
    /// `.`
    Dot,
    /// `#`
    Hash,
    /// `*`
    Asterisk,
    /// `|`
    Pipe,
    /// `&`
    Ampersand,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// A run of `>`, `+`, and `~`.
    Combinator,
    /// An attribute matching operator.
    Operator(AttributeOperator),
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `/* ... */`, delimiters included.
    Comment,
    /// A quoted string, quotes included.
    String,
}

/// One token with its raw text and character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The exact input text.
    pub raw: String,
    /// Offset of the first character.
    pub start: usize,
    /// Offset one past the last character.
    pub end: usize,
}

impl Token {
    /// Is this token whitespace?
    #[must_use]
    pub const fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Space)
    }

    /// The decoded text of a word token.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word { value } => Some(value),
            _ => None,
        }
    }
}
