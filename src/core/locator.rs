//! Line/column bookkeeping
//!
//! Columns count characters, not bytes: UTF-8 continuation bytes do not
//! advance the column.

use super::span::Position;
use memchr::memrchr;

/// Tracks the (line, column) of the next byte to be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locator {
    position: Position,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Position) -> Self {
        Self { position }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Advance by one byte
    #[inline]
    pub fn advance(&mut self, b: u8) {
        if b == b'\n' {
            self.position.line += 1;
            self.position.col = 1;
        } else if !is_continuation_byte(b) {
            self.position.col += 1;
        }
    }

    /// Advance over a run of bytes
    pub fn advance_over(&mut self, bytes: &[u8]) {
        match memrchr(b'\n', bytes) {
            Some(last_newline) => {
                let newlines = memchr::memchr_iter(b'\n', bytes).count();
                self.position.line += newlines as u32;
                self.position.col = 1 + count_chars(&bytes[last_newline + 1..]);
            }
            None => self.position.col += count_chars(bytes),
        }
    }
}

#[inline]
fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

fn count_chars(bytes: &[u8]) -> u32 {
    bytes.iter().filter(|&&b| !is_continuation_byte(b)).count() as u32
}
