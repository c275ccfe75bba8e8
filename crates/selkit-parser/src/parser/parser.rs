use core::mem;
use std::collections::VecDeque;

use selkit_ast::escape::needs_escape;
use selkit_ast::{
    AttributeOptions, AttributeRaws, ContainerOptions, NamespaceOptions, Node, NodeId,
    NodeOptions, Position, Raws, SelectorTree, Source, Spaces,
};
use selkit_common::warning::warn_once;

use super::{Options, ParserState};
use crate::error::ParseError;
use crate::tokenizer::{SelectorTokenizer, Token, TokenKind};

/// What ended a selector.
#[derive(Debug, Clone, Copy)]
enum End {
    Comma,
    /// Offset one past the closing `)`.
    RightParen(usize),
    Eof,
}

/// Whitespace seen but not yet given to a node.
#[derive(Debug, Default)]
struct Pending {
    text: String,
    start: usize,
    end: usize,
}

impl Pending {
    fn push(&mut self, token: &Token) {
        if self.text.is_empty() {
            self.start = token.start;
        }
        self.text.push_str(&token.raw);
        self.end = token.end;
    }

    fn take(&mut self) -> String {
        mem::take(&mut self.text)
    }

    const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

type ErrorHandler = Box<dyn FnMut(&ParseError)>;

/// Recursive-descent selector parser.
///
/// Pulls tokens lazily from a [`SelectorTokenizer`] and builds a
/// [`SelectorTree`]. Whitespace is attached to the surrounding nodes so the
/// tree serializes back to the input byte for byte, unless
/// [`Options::lossless`] is off.
pub struct Parser {
    /// The selector text, kept for [`token_stream`](Self::token_stream)
    input: String,
    tokenizer: SelectorTokenizer,
    /// Tokens read from the tokenizer but not consumed yet
    lookahead: VecDeque<Token>,
    tree: SelectorTree,
    options: Options,
    state: ParserState,
    /// The first error, once parsing has failed
    error: Option<ParseError>,
    error_handler: ErrorHandler,
}

impl Parser {
    /// Create a parser for `input`.
    ///
    /// Errors are reported through `warn_once` until
    /// [`set_error_handler`](Self::set_error_handler) replaces the handler.
    /// `warn_once` deduplicates across the whole process, so the same error
    /// from a later parse prints nothing. The error is still returned.
    pub fn new(input: impl Into<String>, options: Options) -> Self {
        let input = input.into();
        Self {
            tokenizer: SelectorTokenizer::new(input.clone()),
            input,
            lookahead: VecDeque::new(),
            tree: SelectorTree::new(),
            options,
            state: ParserState::AtSelectorStart,
            error: None,
            error_handler: Box::new(|error: &ParseError| warn_once("Parser", &error.to_string())),
        }
    }

    /// Replace the callback that receives the parse error.
    pub fn set_error_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&ParseError) + 'static,
    {
        self.error_handler = Box::new(handler);
    }

    /// The input being parsed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The options this parser was created with.
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Current parser state.
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// A fresh tokenizer over the same input, independent of parsing.
    #[must_use]
    pub fn token_stream(&self) -> SelectorTokenizer {
        SelectorTokenizer::new(self.input.clone())
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &SelectorTree {
        &self.tree
    }

    /// Give up the parser and keep the tree.
    #[must_use]
    pub fn into_tree(self) -> SelectorTree {
        self.tree
    }

    /// Parse the whole input into the tree and return the root id.
    ///
    /// On failure the error handler is called once and the partially built
    /// tree stays available through [`tree`](Self::tree). Calling `parse`
    /// again returns the same outcome without re-parsing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] met.
    pub fn parse(&mut self) -> Result<NodeId, ParseError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if self.state == ParserState::Done {
            return Ok(self.tree.root());
        }

        match self.parse_list(NodeId::ROOT, None) {
            Ok(_) => {
                self.state = ParserState::Done;
                if let Some(root) = self.tree.get_mut(NodeId::ROOT)
                    && !self.input.is_empty()
                {
                    root.source = Some(Source {
                        start: Position::new(1, 1),
                        end: self.tokenizer.position_at(self.tokenizer.input_len() - 1),
                    });
                }
                Ok(NodeId::ROOT)
            }
            Err(error) => {
                self.state = ParserState::Error;
                (self.error_handler)(&error);
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    // ========== token access ==========

    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.lookahead.len() <= n {
            match self.tokenizer.next() {
                Some(token) => self.lookahead.push_back(token?),
                None => break,
            }
        }
        Ok(())
    }

    fn peek(&mut self, n: usize) -> Result<Option<Token>, ParseError> {
        self.fill(n)?;
        Ok(self.lookahead.get(n).cloned())
    }

    fn peek_kind(&mut self, n: usize) -> Result<Option<TokenKind>, ParseError> {
        Ok(self.peek(n)?.map(|token| token.kind))
    }

    fn bump(&mut self) -> Result<Option<Token>, ParseError> {
        self.fill(0)?;
        Ok(self.lookahead.pop_front())
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.bump().map(|_| ())
    }

    fn position(&self, offset: usize) -> Position {
        self.tokenizer.position_at(offset)
    }

    /// Source span of `start..end`, with an inclusive end.
    fn span(&self, start: usize, end: usize) -> Source {
        Source {
            start: self.position(start),
            end: self.position(end.saturating_sub(1).max(start)),
        }
    }

    fn unexpected(&self, token: Option<&Token>, expected: &'static str) -> ParseError {
        match token {
            Some(token) => ParseError::UnexpectedToken {
                found: format!("`{}`", token.raw),
                expected,
                state: self.state,
                position: self.position(token.start),
            },
            None => ParseError::UnexpectedToken {
                found: "end of input".to_owned(),
                expected,
                state: self.state,
                position: self.position(self.tokenizer.input_len()),
            },
        }
    }

    /// Inside brackets, running out of input means the `[` was never closed.
    fn bracket_error(
        &self,
        token: Option<&Token>,
        open: usize,
        expected: &'static str,
    ) -> ParseError {
        match token {
            Some(_) => self.unexpected(token, expected),
            None => ParseError::UnterminatedBracket {
                position: self.position(open),
            },
        }
    }

    // ========== node helpers ==========

    /// The escaped spelling to keep for `value`, if any.
    fn keep_raw(&self, value: &str, raw: &str) -> Option<String> {
        let keep = raw != value && (self.options.lossless || needs_escape(value));
        keep.then(|| raw.to_owned())
    }

    fn spaces(&self, before: String) -> Spaces {
        if self.options.lossless {
            Spaces::new(before, "")
        } else {
            Spaces::default()
        }
    }

    fn push(
        &mut self,
        selector: NodeId,
        mut node: Node,
        start: usize,
        end: usize,
    ) -> Result<NodeId, ParseError> {
        node.source = Some(self.span(start, end));
        let id = self.tree.alloc(node)?;
        self.tree.append(selector, id)?;
        Ok(id)
    }

    fn expect_word(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        match self.bump()? {
            Some(token) if token.word().is_some() => Ok(token),
            other => Err(self.unexpected(other.as_ref(), expected)),
        }
    }

    // ========== selector lists ==========

    /// Parse comma-separated selectors into `container`.
    ///
    /// With `open` set (the offset of a pseudo's `(`), the list ends at the
    /// matching `)` and its end offset is returned.
    fn parse_list(
        &mut self,
        container: NodeId,
        open: Option<usize>,
    ) -> Result<Option<usize>, ParseError> {
        loop {
            let selector = self
                .tree
                .alloc(Node::selector(ContainerOptions::default()))?;
            self.tree.append(container, selector)?;

            let end = self.parse_selector(selector, open.is_some())?;
            self.close_selector(selector);

            match end {
                End::Comma => {
                    if container == NodeId::ROOT && self.peek(0)?.is_none() {
                        if let Some(root) = self.tree.get_mut(NodeId::ROOT) {
                            root.set_trailing_comma(true);
                        }
                        return Ok(None);
                    }
                }
                End::RightParen(end) => return Ok(Some(end)),
                End::Eof => {
                    return match open {
                        Some(open) => Err(ParseError::UnterminatedParen {
                            position: self.position(open),
                        }),
                        None => Ok(None),
                    };
                }
            }
        }
    }

    /// Span a selector from its first child to its last.
    fn close_selector(&mut self, selector: NodeId) {
        let children = self.tree.children(selector);
        let source_of = |id: Option<&NodeId>| id.and_then(|&id| self.tree.get(id)?.source);
        let span = source_of(children.first())
            .zip(source_of(children.last()))
            .map(|(first, last)| Source {
                start: first.start,
                end: last.end,
            });
        if let Some(node) = self.tree.get_mut(selector) {
            node.source = span;
        }
    }

    fn parse_selector(&mut self, selector: NodeId, nested: bool) -> Result<End, ParseError> {
        let mut last: Option<NodeId> = None;
        let mut pending = Pending::default();

        loop {
            self.state = match (last, nested) {
                (None, _) => ParserState::AtSelectorStart,
                (Some(_), true) => ParserState::InPseudoArgument,
                (Some(_), false) => ParserState::InSimpleSelector,
            };

            let Some(token) = self.peek(0)? else {
                self.attach_trailing(selector, last, &mut pending);
                return Ok(End::Eof);
            };

            match token.kind {
                TokenKind::Space => {
                    self.advance()?;
                    pending.push(&token);
                }
                TokenKind::Comma => {
                    self.advance()?;
                    self.attach_trailing(selector, last, &mut pending);
                    return Ok(End::Comma);
                }
                TokenKind::RightParen if nested => {
                    self.advance()?;
                    self.attach_trailing(selector, last, &mut pending);
                    return Ok(End::RightParen(token.end));
                }
                TokenKind::RightParen => {
                    return Err(
                        self.unexpected(Some(&token), "a selector (`)` has no matching `(`)")
                    );
                }
                TokenKind::RightBracket => {
                    return Err(
                        self.unexpected(Some(&token), "a selector (`]` has no matching `[`)")
                    );
                }
                TokenKind::Operator(_) => {
                    return Err(self.unexpected(
                        Some(&token),
                        "a selector (operators only appear inside `[` `]`)",
                    ));
                }
                TokenKind::Semicolon => {
                    return Err(self.unexpected(
                        Some(&token),
                        "a selector (`;` ends a declaration, not a selector)",
                    ));
                }
                TokenKind::Combinator => {
                    self.advance()?;
                    last = Some(self.parse_combinator(selector, token, &mut pending)?);
                }
                _ => {
                    let before = if last.is_none() {
                        pending.take()
                    } else {
                        if !pending.is_empty() {
                            last = Some(self.push_descendant(selector, &mut pending)?);
                        }
                        String::new()
                    };
                    self.advance()?;
                    last = Some(self.parse_compound(selector, last, token, before)?);
                }
            }
        }
    }

    /// Whitespace before `,`, `)`, or the end belongs to the last node, or to
    /// the selector itself when it has none.
    fn attach_trailing(
        &mut self,
        selector: NodeId,
        last: Option<NodeId>,
        pending: &mut Pending,
    ) {
        let text = pending.take();
        if text.is_empty() || !self.options.lossless {
            return;
        }
        match last.and_then(|id| self.tree.get_mut(id)) {
            Some(node) => node.spaces.after.push_str(&text),
            None => {
                if let Some(node) = self.tree.get_mut(selector) {
                    node.spaces.before.push_str(&text);
                }
            }
        }
    }

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    fn push_descendant(
        &mut self,
        selector: NodeId,
        pending: &mut Pending,
    ) -> Result<NodeId, ParseError> {
        let (start, end) = (pending.start, pending.end);
        let text = pending.take();
        let value = if self.options.lossless {
            text
        } else {
            " ".to_owned()
        };
        self.push(selector, Node::combinator(NodeOptions::with_value(value)), start, end)
    }

    /// `>`, `+`, `~` (or a run of them). Whitespace on either side is kept on
    /// the combinator.
    fn parse_combinator(
        &mut self,
        selector: NodeId,
        token: Token,
        pending: &mut Pending,
    ) -> Result<NodeId, ParseError> {
        let before = pending.take();
        let mut after = String::new();
        while let Some(space) = self.peek(0)?.filter(Token::is_space) {
            self.advance()?;
            after.push_str(&space.raw);
        }

        let mut node = Node::combinator(NodeOptions::with_value(token.raw));
        if self.options.lossless {
            node.spaces = Spaces::new(before, after);
        }
        self.push(selector, node, token.start, token.end)
    }

    /// Dispatch on the (already consumed) first token of a simple selector.
    fn parse_compound(
        &mut self,
        selector: NodeId,
        last: Option<NodeId>,
        token: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        match token.kind {
            TokenKind::Word { .. } | TokenKind::Asterisk | TokenKind::Pipe => {
                self.parse_type(selector, token, before)
            }
            TokenKind::Dot => self.parse_class(selector, token, before),
            TokenKind::Hash => self.parse_id(selector, token, before),
            TokenKind::LeftBracket => self.parse_attribute(selector, token, before),
            TokenKind::Colon | TokenKind::DoubleColon => self.parse_pseudo(selector, token, before),
            TokenKind::LeftParen => self.parse_paren_text(selector, last, token, before),
            TokenKind::Ampersand => {
                let node = Node::nesting(NodeOptions {
                    value: token.raw,
                    spaces: self.spaces(before),
                    ..NodeOptions::default()
                });
                self.push(selector, node, token.start, token.end)
            }
            TokenKind::Comment => {
                self.state = ParserState::InComment;
                let node = Node::comment(NodeOptions {
                    value: token.raw,
                    spaces: self.spaces(before),
                    ..NodeOptions::default()
                });
                self.push(selector, node, token.start, token.end)
            }
            TokenKind::String => {
                let node = Node::string(NodeOptions {
                    value: token.raw,
                    spaces: self.spaces(before),
                    ..NodeOptions::default()
                });
                self.push(selector, node, token.start, token.end)
            }
            _ => Err(self.unexpected(Some(&token), "a selector")),
        }
    }

    // ========== simple selectors ==========

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// and [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector),
    /// with an optional `ns|` prefix.
    fn parse_type(
        &mut self,
        selector: NodeId,
        first: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        let start = first.start;
        let (namespace, name) = if first.kind == TokenKind::Pipe {
            (Some(String::new()), self.expect_type_name()?)
        } else if self.peek_kind(0)? == Some(TokenKind::Pipe)
            && self.peek(1)?.as_ref().is_some_and(is_type_name)
        {
            self.advance()?;
            (Some(first.raw), self.expect_type_name()?)
        } else {
            (None, first)
        };

        let node = match name.word() {
            Some(value) => Node::tag(NamespaceOptions {
                value: value.to_owned(),
                namespace,
                spaces: self.spaces(before),
                source: None,
                raws: Raws {
                    value: self.keep_raw(value, &name.raw),
                },
            }),
            None => Node::universal(NamespaceOptions {
                value: name.raw.clone(),
                namespace,
                spaces: self.spaces(before),
                ..NamespaceOptions::default()
            }),
        };
        self.push(selector, node, start, name.end)
    }

    fn expect_type_name(&mut self) -> Result<Token, ParseError> {
        match self.bump()? {
            Some(token) if is_type_name(&token) => Ok(token),
            other => Err(self.unexpected(other.as_ref(), "an element name or `*` after `|`")),
        }
    }

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    fn parse_class(
        &mut self,
        selector: NodeId,
        dot: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        let name = self.expect_word("a class name after `.`")?;
        let value = name.word().unwrap_or_default().to_owned();
        let raw = self.keep_raw(&value, &name.raw);
        let node = Node::class_name(NamespaceOptions {
            value,
            spaces: self.spaces(before),
            raws: Raws { value: raw },
            ..NamespaceOptions::default()
        });
        self.push(selector, node, dot.start, name.end)
    }

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    fn parse_id(
        &mut self,
        selector: NodeId,
        hash: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        let name = self.expect_word("an id after `#`")?;
        let value = name.word().unwrap_or_default().to_owned();
        let raw = self.keep_raw(&value, &name.raw);
        let node = Node::id(NodeOptions {
            value,
            spaces: self.spaces(before),
            source: None,
            raws: Raws { value: raw },
        });
        self.push(selector, node, hash.start, name.end)
    }

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// A `(` directly after the name opens a nested selector list that becomes
    /// the pseudo's children.
    fn parse_pseudo(
        &mut self,
        selector: NodeId,
        colon: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        let name = self.expect_word("a pseudo-class or pseudo-element name")?;
        let decoded = name.word().unwrap_or_default();
        let value = format!("{}{decoded}", colon.raw);
        let raw = self
            .keep_raw(decoded, &name.raw)
            .map(|raw| format!("{}{raw}", colon.raw));

        let mut node = Node::pseudo(ContainerOptions {
            value: Some(value),
            spaces: self.spaces(before),
            ..ContainerOptions::default()
        });
        node.raws.value = raw;
        let pseudo = self.push(selector, node, colon.start, name.end)?;

        if let Some(open) = self.peek(0)?.filter(|t| t.kind == TokenKind::LeftParen) {
            self.advance()?;
            self.state = ParserState::InPseudoArgument;
            if let Some(close) = self.parse_list(pseudo, Some(open.start))? {
                let end = self.position(close - 1);
                if let Some(source) = self.tree.get_mut(pseudo).and_then(|n| n.source.as_mut()) {
                    source.end = end;
                }
            }
        }
        Ok(pseudo)
    }

    /// Balanced text in parentheses that does not belong to a pseudo.
    ///
    /// Appended to the previous simple selector when there is one, otherwise
    /// kept as a `string` node.
    fn parse_paren_text(
        &mut self,
        selector: NodeId,
        last: Option<NodeId>,
        open: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        let mut text = open.raw;
        let mut depth = 1_usize;
        let end = loop {
            let Some(token) = self.bump()? else {
                return Err(ParseError::UnterminatedParen {
                    position: self.position(open.start),
                });
            };
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            if token.is_space() && !self.options.lossless {
                text.push(' ');
            } else {
                text.push_str(&token.raw);
            }
            if depth == 0 {
                break token.end;
            }
        };

        let absorb = last.filter(|&id| {
            self.tree
                .get(id)
                .is_some_and(|n| !(n.is_combinator() || n.is_attribute() || n.is_pseudo()))
        });
        if let Some(id) = absorb {
            let end = self.position(end - 1);
            if let Some(node) = self.tree.get_mut(id) {
                node.append_to_value(&text);
                if let Some(source) = node.source.as_mut() {
                    source.end = end;
                }
            }
            return Ok(id);
        }

        let node = Node::string(NodeOptions {
            value: text,
            spaces: self.spaces(before),
            ..NodeOptions::default()
        });
        self.push(selector, node, open.start, end)
    }

    // ========== attribute selectors ==========

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// `[` ws? (ns? `|`)? name ws? (operator ws? value ws? (`i` ws?)?)? `]`
    fn parse_attribute(
        &mut self,
        selector: NodeId,
        open: Token,
        before: String,
    ) -> Result<NodeId, ParseError> {
        self.state = ParserState::InAttribute;
        let mut raws = AttributeRaws {
            before_attribute: self.attribute_space()?,
            ..AttributeRaws::default()
        };

        let first = self.bump()?;
        let pipe_follows = self.peek_kind(0)? == Some(TokenKind::Pipe);
        let (namespace, name) = match first {
            Some(token) if token.kind == TokenKind::Pipe => {
                (Some(String::new()), self.expect_attribute_name(open.start)?)
            }
            Some(token)
                if pipe_follows
                    && (token.word().is_some() || token.kind == TokenKind::Asterisk) =>
            {
                self.advance()?;
                (Some(token.raw), self.expect_attribute_name(open.start)?)
            }
            Some(token) if token.word().is_some() => (None, token),
            other => {
                return Err(self.bracket_error(other.as_ref(), open.start, "an attribute name"));
            }
        };

        let attribute = name.word().unwrap_or_default().to_owned();
        raws.attribute = self.keep_raw(&attribute, &name.raw);
        raws.after_attribute = self.attribute_space()?;

        let mut operator = None;
        let mut value = None;
        let mut insensitive = false;
        let end = match self.bump()? {
            Some(token) if token.kind == TokenKind::RightBracket => token.end,
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) => {
                operator = Some(op);
                raws.after_operator = self.attribute_space()?;
                value = Some(self.attribute_value(open.start)?);

                let space = self.attribute_space()?;
                let flag = self
                    .peek(0)?
                    .filter(|t| t.word().is_some_and(|w| w.eq_ignore_ascii_case("i")));
                if let Some(flag) = flag {
                    self.advance()?;
                    insensitive = true;
                    raws.insensitive = Some(format!("{space}{}", flag.raw));
                    raws.after_value = self.attribute_space()?;
                } else {
                    raws.after_value = space;
                }

                match self.bump()? {
                    Some(token) if token.kind == TokenKind::RightBracket => token.end,
                    other => return Err(self.bracket_error(other.as_ref(), open.start, "`]`")),
                }
            }
            other => {
                return Err(self.bracket_error(other.as_ref(), open.start, "an operator or `]`"));
            }
        };

        if !self.options.lossless {
            raws = AttributeRaws {
                attribute: raws.attribute,
                ..AttributeRaws::default()
            };
        }

        let node = Node::attribute(AttributeOptions {
            attribute,
            operator,
            value,
            insensitive,
            namespace,
            spaces: self.spaces(before),
            source: None,
            raws,
        })?;
        self.push(selector, node, open.start, end)
    }

    fn expect_attribute_name(&mut self, open: usize) -> Result<Token, ParseError> {
        match self.bump()? {
            Some(token) if token.word().is_some() => Ok(token),
            other => Err(self.bracket_error(other.as_ref(), open, "an attribute name")),
        }
    }

    /// Whitespace and comments inside brackets, kept verbatim.
    fn attribute_space(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        while let Some(token) = self
            .peek(0)?
            .filter(|t| matches!(t.kind, TokenKind::Space | TokenKind::Comment))
        {
            self.advance()?;
            text.push_str(&token.raw);
        }
        Ok(text)
    }

    /// A quoted string, or a run of tokens up to whitespace or `]`.
    fn attribute_value(&mut self, open: usize) -> Result<String, ParseError> {
        if let Some(string) = self.peek(0)?.filter(|t| t.kind == TokenKind::String) {
            self.advance()?;
            return Ok(string.raw);
        }

        let mut value = String::new();
        while let Some(token) = self.peek(0)?.filter(|t| {
            !matches!(
                t.kind,
                TokenKind::Space | TokenKind::Comment | TokenKind::RightBracket | TokenKind::String
            )
        }) {
            self.advance()?;
            value.push_str(&token.raw);
        }

        if value.is_empty() {
            let next = self.peek(0)?;
            return Err(self.bracket_error(next.as_ref(), open, "an attribute value"));
        }
        Ok(value)
    }
}

fn is_type_name(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Word { .. } | TokenKind::Asterisk)
}
