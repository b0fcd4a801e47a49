//! Source locations for human-readable diagnostics.

use std::fmt;

/// A single location in the source file.
///
/// `offset` is the raw byte index, `line` and `column` are 1-based and only exist
/// to make error messages readable.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The inclusive range covered by a loop, from its `[` to its `]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Number of bytes strictly between the two ends.
    pub fn inner_len(&self) -> usize {
        self.end.offset - self.start.offset - 1
    }
}
