//! Streaming Buffer Manager
//!
//! Feeds a bounded working buffer from any `Read` source. After each parse
//! pass the caller reports how much was consumed; the unconsumed tail
//! (text not yet followed by a structure, or an incomplete structure) is
//! shifted to the front and new input is appended after it. A pass that
//! consumes nothing from a full buffer doubles the buffer instead.

use super::pool::{self, BufferPool, PooledBuffer};
use log::{debug, trace};
use std::io::{self, Read};

pub struct BufferManager<'p, R: Read> {
    reader: R,
    buffer: PooledBuffer<'p>,
    /// Bytes of `buffer` holding input
    filled: usize,
    eof: bool,
}

impl<R: Read> BufferManager<'static, R> {
    /// Manager drawing its first buffer from the process-wide pool
    pub fn new(reader: R, size: usize) -> Self {
        Self::with_pool(reader, size, pool::global())
    }
}

impl<'p, R: Read> BufferManager<'p, R> {
    pub fn with_pool(reader: R, size: usize, pool: &'p BufferPool) -> Self {
        BufferManager {
            reader,
            buffer: pool.acquire(size),
            filled: 0,
            eof: false,
        }
    }

    /// Read until the buffer is full or the input ends. Returns whether the
    /// input has ended.
    pub fn fill(&mut self) -> io::Result<bool> {
        while !self.eof && self.filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[self.filled..]) {
                Ok(0) => self.eof = true,
                Ok(read) => self.filled += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        trace!("buffer holds {} of {} bytes, eof: {}", self.filled, self.buffer.len(), self.eof);
        Ok(self.eof)
    }

    /// The part of the buffer holding input
    pub fn filled(&self) -> &[u8] {
        &self.buffer[..self.filled]
    }

    /// Drop the first `consumed` bytes, keeping the rest for the next pass
    pub fn consume(&mut self, consumed: usize) {
        let consumed = consumed.min(self.filled);
        if consumed == 0 {
            if self.filled == self.buffer.len() {
                let size = self.buffer.len() * 2;
                debug!("structure does not fit, growing buffer to {} bytes", size);
                self.buffer.grow(size, self.filled);
            }
            return;
        }
        self.buffer.copy_within(consumed..self.filled, 0);
        self.filled -= consumed;
    }
}
