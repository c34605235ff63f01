//! Attribute Sequence Splitting
//!
//! Splits the region of a tag between the element name and the closing
//! `>` / `/>` into attributes and the whitespace runs between them.
//! Whitespace is reported as its own piece so downstream consumers can
//! rebuild the tag exactly.

use super::locator::Locator;
use super::parts::Attribute;
use super::scanner::is_whitespace;
use super::span::{Position, Span};
use memchr::memchr;

/// One piece of an attribute sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePiece {
    /// A run of whitespace between attributes
    Whitespace(Span),
    Attribute(Attribute),
}

/// Iterator over the pieces of `input[start..end]`
pub struct AttributeSequence<'a> {
    input: &'a [u8],
    pos: usize,
    end: usize,
    locator: Locator,
}

impl<'a> AttributeSequence<'a> {
    /// `at` is the position of `input[start]`
    pub fn new(input: &'a [u8], start: usize, end: usize, at: Position) -> Self {
        AttributeSequence {
            input,
            pos: start,
            end,
            locator: Locator::at(at),
        }
    }

    /// Span for `input[self.pos..to]`, advancing past it
    fn take(&mut self, to: usize) -> Span {
        let span = Span::new(self.pos, to - self.pos, self.locator.position());
        self.locator.advance_over(&self.input[self.pos..to]);
        self.pos = to;
        span
    }

    fn skip_whitespace_from(&self, mut pos: usize) -> usize {
        while pos < self.end && is_whitespace(self.input[pos]) {
            pos += 1;
        }
        pos
    }

    fn scan_attribute(&mut self) -> Attribute {
        // Name: at least one byte, then up to whitespace or '='
        let mut name_end = self.pos + 1;
        while name_end < self.end && !is_whitespace(self.input[name_end]) && self.input[name_end] != b'=' {
            name_end += 1;
        }
        let name = self.take(name_end);

        // Operator: optional whitespace, '=', optional whitespace. Without
        // an '=' the whitespace belongs to the next piece.
        let after_ws = self.skip_whitespace_from(self.pos);
        if after_ws >= self.end || self.input[after_ws] != b'=' {
            let empty = Span::empty_at(self.pos, self.locator.position());
            return Attribute {
                name,
                operator: empty,
                value_content: empty,
                value_outer: empty,
            };
        }
        let operator_end = self.skip_whitespace_from(after_ws + 1);
        let operator = self.take(operator_end);

        // Value
        let value_start = self.pos;
        match self.input.get(value_start).copied() {
            Some(quote @ (b'"' | b'\'')) if value_start < self.end => {
                let content_start = value_start + 1;
                let closing = memchr(quote, &self.input[content_start..self.end]).map(|i| content_start + i);
                match closing {
                    Some(close) => {
                        let outer_at = self.locator.position();
                        self.take(content_start);
                        let value_content = self.take(close);
                        self.take(close + 1);
                        Attribute {
                            name,
                            operator,
                            value_content,
                            value_outer: Span::new(value_start, close + 1 - value_start, outer_at),
                        }
                    }
                    None => {
                        // Unterminated quote: the rest of the region is the value
                        let value = self.take(self.end);
                        Attribute {
                            name,
                            operator,
                            value_content: value,
                            value_outer: value,
                        }
                    }
                }
            }
            _ => {
                let mut value_end = value_start;
                while value_end < self.end && !is_whitespace(self.input[value_end]) {
                    value_end += 1;
                }
                let value = self.take(value_end);
                Attribute {
                    name,
                    operator,
                    value_content: value,
                    value_outer: value,
                }
            }
        }
    }
}

impl Iterator for AttributeSequence<'_> {
    type Item = AttributePiece;

    fn next(&mut self) -> Option<AttributePiece> {
        if self.pos >= self.end {
            return None;
        }
        if is_whitespace(self.input[self.pos]) {
            let ws_end = self.skip_whitespace_from(self.pos);
            return Some(AttributePiece::Whitespace(self.take(ws_end)));
        }
        Some(AttributePiece::Attribute(self.scan_attribute()))
    }
}
