//! Selector tokenizer module.

/// Token types.
pub mod token;
/// Tokenizer implementation.
#[allow(clippy::module_inception)]
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::SelectorTokenizer;
