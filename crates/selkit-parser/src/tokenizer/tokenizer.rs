use selkit_ast::escape::{is_whitespace, unescape};
use selkit_ast::{AttributeOperator, Position};

use super::token::{Token, TokenKind};
use crate::error::ParseError;

/// Lossless selector tokenizer.
///
/// Tokens are produced lazily through [`Iterator`]; [`run`](Self::run)
/// collects them eagerly instead. The first error ends the stream.
pub struct SelectorTokenizer {
    /// The input being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Offsets at which each line starts
    line_starts: Vec<usize>,
    /// Collected tokens
    tokens: Vec<Token>,
    /// Set once an error has been returned
    failed: bool,
}

impl SelectorTokenizer {
    /// Create a new tokenizer over `input`.
    pub fn new(input: impl Into<String>) -> Self {
        let input: Vec<char> = input.into().chars().collect();
        let line_starts = core::iter::once(0)
            .chain(
                input
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            input,
            position: 0,
            line_starts,
            tokens: Vec::new(),
            failed: false,
        }
    }

    /// Rewind to the start of the input and forget collected tokens.
    pub fn reset(&mut self) {
        self.position = 0;
        self.tokens.clear();
        self.failed = false;
    }

    /// Tokenize the remaining input, collecting every token.
    ///
    /// # Errors
    ///
    /// Returns the first unterminated string or comment.
    pub fn run(&mut self) -> Result<(), ParseError> {
        loop {
            match self.consume_token() {
                Ok(Some(token)) => self.tokens.push(token),
                Ok(None) => return Ok(()),
                Err(error) => {
                    self.failed = true;
                    return Err(error);
                }
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of characters in the input.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Line and column (both 1-indexed) of a character offset.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        Position::new(line.max(1), offset - line_start + 1)
    }

    fn consume_token(&mut self) -> Result<Option<Token>, ParseError> {
        let start = self.position;
        let Some(c) = self.consume() else {
            return Ok(None);
        };

        let kind = match c {
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                TokenKind::Space
            }
            '.' => TokenKind::Dot,
            '#' => TokenKind::Hash,
            '&' => TokenKind::Ampersand,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Operator(AttributeOperator::Equals),
            '*' if self.consume_if('=') => TokenKind::Operator(AttributeOperator::SubstringMatch),
            '*' => TokenKind::Asterisk,
            '|' if self.consume_if('=') => TokenKind::Operator(AttributeOperator::DashMatch),
            '|' => TokenKind::Pipe,
            '~' if self.consume_if('=') => TokenKind::Operator(AttributeOperator::Includes),
            '^' if self.consume_if('=') => TokenKind::Operator(AttributeOperator::PrefixMatch),
            '$' if self.consume_if('=') => TokenKind::Operator(AttributeOperator::SuffixMatch),
            '>' | '+' | '~' => {
                self.consume_combinator();
                TokenKind::Combinator
            }
            ':' if self.consume_if(':') => TokenKind::DoubleColon,
            ':' => TokenKind::Colon,
            '"' | '\'' => self.consume_string(c, start)?,
            '/' if self.peek() == Some('*') => self.consume_comment(start)?,
            _ => {
                self.reconsume();
                self.consume_word()
            }
        };

        Ok(Some(Token {
            kind,
            raw: self.slice(start, self.position),
            start,
            end: self.position,
        }))
    }

    /// Continue a run of `>`, `+`, `~`, stopping before a `~=` operator.
    fn consume_combinator(&mut self) {
        while let Some(c) = self.peek() {
            let is_operator = c == '~' && self.peek_at(1) == Some('=');
            if !matches!(c, '>' | '+' | '~') || is_operator {
                break;
            }
            let _ = self.consume();
        }
    }

    fn consume_string(&mut self, quote: char, start: usize) -> Result<TokenKind, ParseError> {
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(TokenKind::String),
                Some('\\') => {
                    let _ = self.consume();
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::UnterminatedString {
                        position: self.position_at(start),
                    });
                }
            }
        }
    }

    fn consume_comment(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        // Opening `*`.
        let _ = self.consume();
        loop {
            match self.consume() {
                Some('*') if self.peek() == Some('/') => {
                    let _ = self.consume();
                    return Ok(TokenKind::Comment);
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::UnterminatedComment {
                        position: self.position_at(start),
                    });
                }
            }
        }
    }

    fn consume_word(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    let _ = self.consume();
                    self.consume_escape();
                }
                c if is_whitespace(c) => break,
                '.' | '#' | '*' | '|' | '&' | '[' | ']' | '(' | ')' | ':' | ',' | '>' | '+'
                | '~' | '=' | '\'' | '"' | ';' => break,
                '/' if self.peek_at(1) == Some('*') => break,
                '^' | '$' if self.peek_at(1) == Some('=') => break,
                _ => {
                    let _ = self.consume();
                }
            }
        }
        if self.position == start {
            // Only reachable for a character no other rule claims; keep progress.
            let _ = self.consume();
        }
        TokenKind::Word {
            value: unescape(&self.slice(start, self.position)),
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called after the backslash. Only advances; decoding happens on the
    /// finished word.
    fn consume_escape(&mut self) {
        match self.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut digits = 0;
                while digits < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    let _ = self.consume();
                    digits += 1;
                }
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
            }
            Some(_) => {
                let _ = self.consume();
            }
            None => {}
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Consume the next character if it is `expected`.
    fn consume_if(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.position += 1;
        }
        matched
    }

    /// Put back the last consumed character.
    const fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

impl Iterator for SelectorTokenizer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.consume_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}
