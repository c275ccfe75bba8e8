//! Selector tokenizer, parser, and processing facade for selkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - lossless selector tokens with raw text and offsets
//!   - Escapes, strings, comments
//!   - Attribute operators and combinator runs
//!
//! - **Parser** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class, ID, attribute, and nesting selectors
//!   - Namespace prefixes (`ns|a`, `*|a`, `|a`)
//!   - Pseudo-classes and pseudo-elements with nested selector lists
//!   - Whitespace and comments kept for exact round-tripping
//!   - Lossy mode that normalizes whitespace and escapes
//!
//! - **Processor** - one call from text to [`SelectorTree`](selkit_ast::SelectorTree)
//!   and back, with a parser hook
//!
//! # Not Yet Implemented
//!
//! - Selector matching and specificity
//! - Validation of pseudo-class names and arguments

/// Parse error type.
pub mod error;
/// Selector parser per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod parser;
/// Parsing facade.
pub mod processor;
/// Selector tokenizer.
pub mod tokenizer;

pub use error::ParseError;
pub use parser::{Options, Parser, ParserState};
pub use processor::{ProcessResult, Processor, process};
pub use tokenizer::{SelectorTokenizer, Token, TokenKind};
