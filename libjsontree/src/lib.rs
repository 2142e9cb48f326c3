//! Hand-written JSON parser producing an owned value tree.
//!
//! The crate targets consumers that read structured configuration or data
//! without a schema and without pulling in a full serialization framework.
//!
//! # Parsing Pipeline
//!
//! 1. **Cursor**: Hands out the input one byte at a time with one step of
//!    pushback, counting newlines for error reports.
//!
//! 2. **Lexical helpers**: Decode string literals (escapes, `\u` code units,
//!    surrogate pairs) and interpret bare number/boolean/null tokens.
//!
//! 3. **Grammar**: Recursive descent over the cursor builds the [`Value`]
//!    tree. The top level must be an object or an array.
//!
//! The [`Parser`] session owns the resulting tree and the first error the
//! parse recorded. Typed accessors on [`Value`] read the tree back by member
//! name, array index, or `/`-separated path.

mod access;
mod cursor;
mod error;
mod lexer;
mod limits;
mod parser;
mod value;

pub use error::{ErrorCode, ErrorKind, ParseError, Result};
pub use limits::Limits;
pub use parser::Parser;
pub use value::{Kind, Value};

/// Parse a JSON document whose top level is an object or an array.
///
/// # Example
///
/// ```
/// use libjsontree::parse;
///
/// let value = parse(r#"{"a": {"b": [true]}}"#).unwrap();
/// let b = value.get_array_by_path("a/b").unwrap();
/// assert!(b.get_boolean_at(0));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = Parser::new();
    parser.parse(input)?;
    Ok(parser.take_root().unwrap_or_default())
}
