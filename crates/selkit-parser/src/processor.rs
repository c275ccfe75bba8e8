//! One-call parsing facade.

use std::cell::OnceCell;

use selkit_ast::SelectorTree;

use crate::error::ParseError;
use crate::parser::{Options, Parser};

type Hook = Box<dyn FnMut(&mut Parser)>;

/// Parses selector text, optionally running a hook on each parser first.
///
/// ```ignore
/// let mut processor = Processor::with_hook(|parser| {
///     parser.set_error_handler(|error| eprintln!("{error}"));
/// });
/// let result = processor.process("a > .b", Options::default());
/// assert_eq!(result.result(), "a > .b");
/// ```
pub struct Processor {
    hook: Option<Hook>,
}

impl Processor {
    /// A processor without a hook.
    #[must_use]
    pub fn new() -> Self {
        Self { hook: None }
    }

    /// A processor whose hook receives every [`Parser`] before it parses.
    ///
    /// The hook may read [`Parser::token_stream`] or install an error handler.
    #[must_use]
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: FnMut(&mut Parser) + 'static,
    {
        Self {
            hook: Some(Box::new(hook)),
        }
    }

    /// Parse `text` into a fresh tree.
    ///
    /// Without a hook that installs an error handler, a failure is printed
    /// once per process; repeating the same bad input only returns the error.
    pub fn process(&mut self, text: &str, options: Options) -> ProcessResult {
        let mut parser = Parser::new(text, options);
        if let Some(hook) = self.hook.as_mut() {
            hook(&mut parser);
        }
        let error = parser.parse().err();
        ProcessResult {
            res: parser.into_tree(),
            error,
            result: OnceCell::new(),
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `text` with a default [`Processor`].
///
/// Errors are printed once per process, as with [`Processor::process`].
#[must_use]
pub fn process(text: &str, options: Options) -> ProcessResult {
    Processor::new().process(text, options)
}

/// The outcome of [`Processor::process`]: the tree, any error, and the
/// serialized text (computed on first request).
#[derive(Debug)]
pub struct ProcessResult {
    res: SelectorTree,
    error: Option<ParseError>,
    result: OnceCell<String>,
}

impl ProcessResult {
    /// The parsed tree. After an error this is the partial tree.
    #[must_use]
    pub const fn res(&self) -> &SelectorTree {
        &self.res
    }

    /// Mutable access to the tree. Drops the cached serialization.
    pub fn res_mut(&mut self) -> &mut SelectorTree {
        let _ = self.result.take();
        &mut self.res
    }

    /// The tree serialized back to selector text.
    #[must_use]
    pub fn result(&self) -> &str {
        self.result.get_or_init(|| self.res.to_string())
    }

    /// The parse error, if parsing failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Whether parsing succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The tree, or the parse error.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] when parsing failed.
    pub fn into_result(self) -> Result<SelectorTree, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.res),
        }
    }
}
