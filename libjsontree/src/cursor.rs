//! Read cursor over the input buffer.
//!
//! The cursor hands out one byte at a time and can un-read exactly the last
//! byte it handed out. It keeps a running count of consumed newlines so that
//! error reports stay accurate across a pushback.

/// Byte cursor with one-step pushback and line tracking.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
    line: usize,
    /// The byte most recently popped, while it may still be put back.
    last: Option<u8>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            line: 0,
            last: None,
        }
    }

    /// Byte offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of newlines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the next byte without consuming it, or `None` at end of input.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    /// Consumes and returns the next byte, or `None` at end of input.
    pub fn pop(&mut self) -> Option<u8> {
        let byte = self.peek();
        if let Some(b) = byte {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
            }
        }
        self.last = byte;
        byte
    }

    /// Un-consumes the byte returned by the previous [`pop`](Self::pop).
    ///
    /// Calling this twice in a row, before any pop, or after a pop that hit
    /// end of input is a logic error.
    pub fn putback(&mut self) {
        debug_assert!(self.last.is_some(), "putback without a byte to return");
        if let Some(b) = self.last.take() {
            self.position -= 1;
            if b == b'\n' {
                self.line -= 1;
            }
        }
    }

    /// Skips ASCII whitespace, stopping at the first other byte or at end.
    pub fn eat_space(&mut self) {
        while let Some(b) = self.pop() {
            if !b.is_ascii_whitespace() {
                self.putback();
                return;
            }
        }
    }

    /// Consumes bytes up to the next `}`, `]` or `,` and returns them with
    /// surrounding whitespace trimmed.
    ///
    /// Returns `None` if input ends before a delimiter is seen; everything up
    /// to the end has been consumed in that case.
    pub fn read_value_token(&mut self) -> Option<&'a [u8]> {
        let data = self.data;
        let start = self.position;
        loop {
            match self.pop() {
                None => return None,
                Some(b'}' | b']' | b',') => {
                    self.putback();
                    return Some(data[start..self.position].trim_ascii());
                }
                Some(_) => {}
            }
        }
    }
}
