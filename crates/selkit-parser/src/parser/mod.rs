//! Selector parser module for tree construction.

/// Parser implementation.
#[allow(clippy::module_inception)]
pub mod parser;

pub use parser::Parser;
use strum_macros::{Display, IntoStaticStr};

/// What the parser was doing when it met a token. Rendered in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum ParserState {
    /// Before the first node of a selector.
    #[strum(serialize = "at selector start")]
    AtSelectorStart,
    /// Between or inside compound selectors.
    #[strum(serialize = "in simple selector")]
    InSimpleSelector,
    /// Inside `[` `]`.
    #[strum(serialize = "in attribute")]
    InAttribute,
    /// Inside a pseudo's `(` `)`.
    #[strum(serialize = "in pseudo argument")]
    InPseudoArgument,
    /// Reading a comment.
    #[strum(serialize = "in comment")]
    InComment,
    /// Parsing finished.
    #[strum(serialize = "done")]
    Done,
    /// Parsing stopped on an error.
    #[strum(serialize = "error")]
    Error,
}

/// Per-call parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Keep whitespace and escapes exactly as written (default), or normalize.
    pub lossless: bool,
}

impl Options {
    /// Normalizing output: surrounding whitespace dropped, descendant
    /// combinators collapsed to one space, unneeded escapes decoded.
    #[must_use]
    pub const fn lossy() -> Self {
        Self { lossless: false }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { lossless: true }
    }
}
