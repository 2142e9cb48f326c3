//! Error types for JSON parsing.

use thiserror::Error;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Coarse error classification reported by a parse session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCode {
    /// No error recorded.
    #[default]
    None,
    /// A value had a different kind than the caller asked for.
    InvalidType,
    /// Malformed input.
    Syntax,
}

/// The specific diagnostic behind a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended inside a construct.
    PrematureEnd,
    /// A character that cannot start or continue the current construct.
    UnexpectedChar(char),
    /// A non-ASCII byte where a structural character was expected.
    UnexpectedByte(u8),
    /// The document does not start with `{` or `[`.
    ExpectedRoot,
    /// An array element was not followed by `,` or `]`.
    ExpectedSeparator,
    /// A `:` appeared with no member name before it.
    MissingMemberName,
    /// A member name was not followed by `:`.
    ExpectedColon,
    /// Unknown character after a backslash.
    BadEscape,
    /// `\u` not followed by four hex digits.
    BadUnicodeEscape,
    /// String literal bytes are not valid UTF-8.
    InvalidUtf8,
    /// Number token does not follow the JSON number grammar.
    InvalidNumber,
    /// Misspelled `true`, `false` or `null`.
    InvalidLiteral,
    /// Non-whitespace after the root value.
    TrailingContent,
    /// Nesting exceeds the configured depth.
    TooDeep,
    /// Input exceeds the configured size.
    InputTooLarge,
    /// Reserved for typed lookups that report instead of asserting.
    InvalidType,
}

impl ErrorKind {
    /// Static diagnostic text for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::PrematureEnd => "Premature end of JSON data",
            ErrorKind::UnexpectedChar(_) | ErrorKind::UnexpectedByte(_) => "Unexpected character",
            ErrorKind::ExpectedRoot => "Expected an object or array at top level",
            ErrorKind::ExpectedSeparator => "Expected ',' or ']' after array element",
            ErrorKind::MissingMemberName => "Expected member name before ':'",
            ErrorKind::ExpectedColon => "Expected ':' after member name",
            ErrorKind::BadEscape => "Bad escaped character",
            ErrorKind::BadUnicodeEscape => "Bad Unicode escape",
            ErrorKind::InvalidUtf8 => "Invalid UTF-8 in string",
            ErrorKind::InvalidNumber => "Invalid number",
            ErrorKind::InvalidLiteral => "Invalid literal",
            ErrorKind::TrailingContent => "Unexpected content after root value",
            ErrorKind::TooDeep => "Nesting too deep",
            ErrorKind::InputTooLarge => "Input too large",
            ErrorKind::InvalidType => "Invalid type",
        }
    }

    /// The error code this kind reports under.
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::InvalidType => ErrorCode::InvalidType,
            _ => ErrorCode::Syntax,
        }
    }

    /// Literal spelling errors yield a default value and let parsing go on.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::InvalidNumber | ErrorKind::InvalidLiteral)
    }
}

/// Error recorded by a parse session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{} at line {}", ErrorKind::message(.kind), .line)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// One-based line of the failure point.
    pub line: usize,
}

impl ParseError {
    /// Create an error at a one-based line.
    pub fn new(kind: ErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Coarse classification of this error.
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Static diagnostic text.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = ParseError::new(ErrorKind::PrematureEnd, 3);
        assert_eq!(err.to_string(), "Premature end of JSON data at line 3");
    }

    #[test]
    fn test_codes() {
        assert_eq!(ErrorKind::BadEscape.code(), ErrorCode::Syntax);
        assert_eq!(ErrorKind::UnexpectedChar('x').code(), ErrorCode::Syntax);
        assert_eq!(ErrorKind::InvalidType.code(), ErrorCode::InvalidType);
        assert_eq!(ErrorCode::default(), ErrorCode::None);
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(ErrorKind::InvalidNumber.is_recoverable());
        assert!(ErrorKind::InvalidLiteral.is_recoverable());
        assert!(!ErrorKind::PrematureEnd.is_recoverable());
        assert!(!ErrorKind::ExpectedSeparator.is_recoverable());
        assert!(!ErrorKind::ExpectedColon.is_recoverable());
    }
}
