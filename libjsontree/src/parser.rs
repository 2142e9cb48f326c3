//! Recursive-descent grammar and the parse session that drives it.
//!
//! The grammar reads straight off a [`Cursor`]; there is no token stream.
//! Each construct returns `Some(value)` when it produced something worth
//! keeping and `None` when its subtree was discarded.
//!
//! Errors go into a single slot and the first one recorded wins. Two
//! policies apply:
//! - Literal spelling errors (numbers, `true`/`false`/`null`) are *flagged*:
//!   the error is recorded, a default value stands in, and parsing goes on.
//!   A second error of any kind halts.
//! - Everything else *halts*: the error is recorded and every enclosing
//!   object or array stops consuming input. Objects hand back what they
//!   collected so far; arrays discard theirs.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{ErrorCode, ErrorKind, ParseError, Result};
use crate::lexer::{self, unexpected};
use crate::limits::Limits;
use crate::value::Value;

/// State for one descent over one buffer.
struct Descent<'a> {
    cursor: Cursor<'a>,
    limits: Limits,
    depth: usize,
    error: Option<ParseError>,
    halted: bool,
}

impl<'a> Descent<'a> {
    fn new(data: &'a [u8], limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(data),
            limits,
            depth: 0,
            error: None,
            halted: false,
        }
    }

    /// Record `kind` at the current line unless an error is already set.
    fn record(&mut self, kind: ErrorKind) {
        self.record_at(kind, self.cursor.line());
    }

    fn record_at(&mut self, kind: ErrorKind, line: usize) {
        if self.error.is_none() {
            let err = ParseError::new(kind, line + 1);
            trace!("{} (offset {})", err, self.cursor.position());
            self.error = Some(err);
        }
    }

    /// Record a halting error. Always returns `None` so callers can
    /// `return self.fail(..)`.
    fn fail<T>(&mut self, kind: ErrorKind) -> Option<T> {
        self.record(kind);
        self.halted = true;
        None
    }

    /// Record a recoverable error against the line a token started on and
    /// carry on with `fallback`.
    ///
    /// A flagged error after one is already recorded halts instead, so the
    /// remaining siblings are not parsed.
    fn flag<T>(&mut self, kind: ErrorKind, line: usize, fallback: T) -> T {
        debug_assert!(kind.is_recoverable());
        if self.error.is_some() {
            trace!("{:?} after earlier error, halting", kind);
            self.halted = true;
        }
        self.record_at(kind, line);
        fallback
    }

    // ========================================================================
    // Root
    // ========================================================================

    fn parse_root(&mut self) -> Option<Value> {
        self.cursor.eat_space();
        let root = match self.cursor.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(_) => return self.fail(ErrorKind::ExpectedRoot),
            None => return self.fail(ErrorKind::PrematureEnd),
        };

        if !self.halted {
            self.cursor.eat_space();
            if self.cursor.peek().is_some() {
                self.record(ErrorKind::TrailingContent);
            }
        }
        root
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn parse_value(&mut self) -> Option<Value> {
        self.cursor.eat_space();
        match self.cursor.peek() {
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'-' | b'0'..=b'9') => self.parse_number().map(Value::Number),
            Some(b't' | b'f') => self.parse_boolean().map(Value::Boolean),
            Some(b'n') => self.parse_null(),
            Some(b) => self.fail(unexpected(b)),
            None => self.fail(ErrorKind::PrematureEnd),
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        match lexer::read_string(&mut self.cursor) {
            Ok(s) => Some(s),
            Err(kind) => self.fail(kind),
        }
    }

    /// Bare token for a number or literal, with the line it starts on.
    ///
    /// End of input before a delimiter halts, since the enclosing structure
    /// can never be closed.
    fn value_token(&mut self) -> Option<(&'a [u8], usize)> {
        let line = self.cursor.line();
        match self.cursor.read_value_token() {
            Some(token) => Some((token, line)),
            None => self.fail(ErrorKind::PrematureEnd),
        }
    }

    fn parse_number(&mut self) -> Option<f64> {
        let (token, line) = self.value_token()?;
        Some(match lexer::parse_number(token) {
            Ok(n) => n,
            Err(kind) => self.flag(kind, line, 0.0),
        })
    }

    fn parse_boolean(&mut self) -> Option<bool> {
        let (token, line) = self.value_token()?;
        Some(match lexer::parse_boolean(token) {
            Ok(b) => b,
            Err(kind) => self.flag(kind, line, false),
        })
    }

    fn parse_null(&mut self) -> Option<Value> {
        let (token, line) = self.value_token()?;
        if let Err(kind) = lexer::parse_null(token) {
            self.flag(kind, line, ());
        }
        Some(Value::Null)
    }

    // ========================================================================
    // Containers
    // ========================================================================

    fn enter(&mut self) -> bool {
        if self.depth >= self.limits.max_nesting_depth {
            self.fail::<()>(ErrorKind::TooDeep);
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_object(&mut self) -> Option<Value> {
        match self.cursor.pop() {
            Some(b'{') => {}
            Some(b) => return self.fail(unexpected(b)),
            None => return self.fail(ErrorKind::PrematureEnd),
        }
        if !self.enter() {
            return None;
        }

        let mut members = BTreeMap::new();
        let mut name: Option<String> = None;
        loop {
            self.cursor.eat_space();
            let byte = self.cursor.pop();
            if name.is_some() && matches!(byte, Some(b'}' | b'"' | b',')) {
                self.fail::<()>(ErrorKind::ExpectedColon);
                break;
            }
            match byte {
                Some(b'}') => break,
                Some(b'"') => {
                    self.cursor.putback();
                    match self.parse_string() {
                        Some(s) => name = Some(s),
                        None => break,
                    }
                }
                Some(b':') => {
                    let Some(key) = name.take() else {
                        self.fail::<()>(ErrorKind::MissingMemberName);
                        break;
                    };
                    if let Some(value) = self.parse_value() {
                        members.insert(key, value);
                    }
                    if self.halted {
                        break;
                    }
                }
                Some(b',') => {}
                Some(b) => {
                    self.fail::<()>(unexpected(b));
                    break;
                }
                None => {
                    self.fail::<()>(ErrorKind::PrematureEnd);
                    break;
                }
            }
        }

        self.leave();
        Some(Value::Object(members))
    }

    fn parse_array(&mut self) -> Option<Value> {
        match self.cursor.pop() {
            Some(b'[') => {}
            Some(b) => return self.fail(unexpected(b)),
            None => return self.fail(ErrorKind::PrematureEnd),
        }
        if !self.enter() {
            return None;
        }
        let items = self.parse_elements();
        self.leave();
        items.map(Value::Array)
    }

    fn parse_elements(&mut self) -> Option<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.cursor.eat_space();
            match self.cursor.pop() {
                Some(b']') => return Some(items),
                Some(_) => self.cursor.putback(),
                None => return self.fail(ErrorKind::PrematureEnd),
            }

            if let Some(value) = self.parse_value() {
                items.push(value);
            }
            if self.halted {
                return None;
            }

            self.cursor.eat_space();
            match self.cursor.pop() {
                Some(b',') => {}
                Some(b']') => self.cursor.putback(),
                Some(_) => return self.fail(ErrorKind::ExpectedSeparator),
                None => return self.fail(ErrorKind::PrematureEnd),
            }
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// A parse session.
///
/// Holds the tree from the most recent [`parse`](Self::parse) together with
/// the error it recorded, if any. Each call to `parse` drops the previous
/// tree first.
///
/// # Example
///
/// ```
/// use libjsontree::{ErrorCode, Parser};
///
/// let mut parser = Parser::new();
/// let root = parser.parse(r#"{"num": 11.23}"#).unwrap();
/// assert_eq!(root.get_number("num"), 11.23);
/// assert_eq!(parser.error_code(), ErrorCode::None);
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    limits: Limits,
    root: Option<Value>,
    error: Option<ParseError>,
    position: usize,
    line: usize,
}

impl Parser {
    /// Create an empty session with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Parse a text buffer. See [`parse_bytes`](Self::parse_bytes).
    pub fn parse(&mut self, input: &str) -> Result<&Value> {
        self.parse_bytes(input.as_bytes())
    }

    /// Parse a raw buffer whose top level must be an object or an array.
    ///
    /// On error the returned `Err` carries the first error recorded. A
    /// partially built object root may still be readable through
    /// [`root`](Self::root); it must be treated as incomplete.
    pub fn parse_bytes(&mut self, input: &[u8]) -> Result<&Value> {
        self.clear();
        debug!("parsing {} bytes", input.len());

        if input.len() > self.limits.max_input_size {
            let err = ParseError::new(ErrorKind::InputTooLarge, 1);
            debug!("parse failed: {}", err);
            self.error = Some(err);
            return Err(err);
        }

        let mut descent = Descent::new(input, self.limits);
        self.root = descent.parse_root();
        self.error = descent.error;
        self.position = descent.cursor.position();
        self.line = descent.cursor.line();

        match (self.error, self.root.as_ref()) {
            (None, Some(root)) => {
                debug!("parsed {} root", root.kind());
                Ok(root)
            }
            (Some(err), _) => {
                debug!("parse failed: {}", err);
                Err(err)
            }
            (None, None) => unreachable!("descent produced neither a root nor an error"),
        }
    }

    /// Drop the current tree and forget the last error.
    pub fn clear(&mut self) {
        self.root = None;
        self.error = None;
        self.position = 0;
        self.line = 0;
    }

    /// The tree from the last parse, if one was produced.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Take ownership of the tree from the last parse.
    pub fn take_root(&mut self) -> Option<Value> {
        self.root.take()
    }

    /// The error recorded by the last parse.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Code of the last error, or [`ErrorCode::None`].
    pub fn error_code(&self) -> ErrorCode {
        self.error.map_or(ErrorCode::None, |e| e.code())
    }

    /// Message of the last error.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }

    /// One-based line of the last error.
    pub fn error_line(&self) -> Option<usize> {
        self.error.map(|e| e.line)
    }

    /// Byte offset where the last parse stopped.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Newlines consumed by the last parse.
    pub fn line(&self) -> usize {
        self.line
    }
}
