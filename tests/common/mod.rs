#![allow(dead_code)]

use rustymarkup::{EventCollector, MarkupEvent, MarkupParser, ParseConfig, ParseError};
use std::io::{self, Read};

/// Hands out the input at most `chunk` bytes per read
pub struct Chunked<'a> {
    data: &'a [u8],
    pos: usize,
    chunk: usize,
}

impl<'a> Chunked<'a> {
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Chunked {
            data,
            pos: 0,
            chunk: chunk.max(1),
        }
    }
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

pub fn parse(config: &ParseConfig, input: &[u8]) -> Result<Vec<MarkupEvent>, ParseError> {
    let mut collector = EventCollector::new();
    MarkupParser::new(config.clone()).parse(input, &mut collector)?;
    Ok(collector.into_events())
}

pub fn parse_chunked(
    config: &ParseConfig,
    input: &[u8],
    buffer_size: usize,
    chunk: usize,
) -> Result<Vec<MarkupEvent>, ParseError> {
    let mut collector = EventCollector::new();
    MarkupParser::new(config.clone())
        .with_buffer_size(buffer_size)
        .parse_reader(Chunked::new(input, chunk), &mut collector)?;
    Ok(collector.into_events())
}

/// Concatenation of every event's source bytes
pub fn rebuild(events: &[MarkupEvent]) -> Vec<u8> {
    events.iter().filter_map(MarkupEvent::source).flatten().copied().collect()
}

pub fn summary(events: &[MarkupEvent]) -> Vec<String> {
    events.iter().filter_map(MarkupEvent::summary).collect()
}
