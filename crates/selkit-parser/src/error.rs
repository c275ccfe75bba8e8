//! Parse failures.

use selkit_ast::{NodeError, Position, TreeError};
use thiserror::Error;

use crate::parser::ParserState;

/// Why a selector could not be parsed.
///
/// Parsing stops at the first error; the tree built up to that point is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quoted string has no closing quote.
    #[error("unclosed string starting at {position}")]
    UnterminatedString {
        /// Where the string starts.
        position: Position,
    },

    /// A `/*` comment has no closing `*/`.
    #[error("unclosed comment starting at {position}")]
    UnterminatedComment {
        /// Where the comment starts.
        position: Position,
    },

    /// An attribute selector reached the end of input before `]`.
    #[error("expected `]` to close the attribute selector opened at {position}")]
    UnterminatedBracket {
        /// Position of the `[`.
        position: Position,
    },

    /// A parenthesis reached the end of input before `)`.
    #[error("expected `)` to close the parenthesis opened at {position}")]
    UnterminatedParen {
        /// Position of the `(`.
        position: Position,
    },

    /// A token that is not valid where it appears.
    #[error("unexpected {found} at {position} ({state}), expected {expected}")]
    UnexpectedToken {
        /// The offending token text, or `end of input`.
        found: String,
        /// What would have been accepted.
        expected: &'static str,
        /// Parser state when the token was seen.
        state: ParserState,
        /// Where the token starts.
        position: Position,
    },

    /// Building the tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A node could not be constructed from the parsed parts.
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl ParseError {
    /// Where in the input the error occurred, when known.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::UnterminatedString { position }
            | Self::UnterminatedComment { position }
            | Self::UnterminatedBracket { position }
            | Self::UnterminatedParen { position }
            | Self::UnexpectedToken { position, .. } => Some(*position),
            Self::Tree(_) | Self::Node(_) => None,
        }
    }
}
