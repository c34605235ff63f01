//! Span - offset and length into the working buffer
//!
//! Zero-copy reference to a portion of the buffer currently being parsed,
//! tagged with the line and column where it starts. Spans are only valid
//! for the duration of the handler call that receives them: in pull mode
//! the buffer is compacted and refilled between passes.

/// A (line, column) location in the document. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A span referencing a portion of the working buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset into the buffer passed alongside the span
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
    /// Line where the span starts
    pub line: u32,
    /// Column where the span starts
    pub col: u32,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(offset: usize, len: usize, at: Position) -> Self {
        Self {
            offset,
            len,
            line: at.line,
            col: at.col,
        }
    }

    /// Create an empty span anchored at `offset`
    #[inline]
    pub const fn empty_at(offset: usize, at: Position) -> Self {
        Self::new(offset, 0, at)
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Where the span starts
    #[inline]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Extract the byte slice from the buffer
    #[inline]
    pub fn slice<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        buffer.get(self.offset..self.end()).unwrap_or(&[])
    }

    /// Extract as UTF-8 string from the buffer
    #[inline]
    pub fn as_str<'a>(&self, buffer: &'a [u8]) -> Option<&'a str> {
        std::str::from_utf8(self.slice(buffer)).ok()
    }
}
