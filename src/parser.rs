//! Markup Parser
//!
//! Entry points plus the pass that walks one buffer window: find the next
//! '<', classify it, locate the structure's end, split it and hand it to the
//! event processor.
//!
//! Text is only reported once the structure that ends it is confirmed, and
//! a structure whose terminator is not in the window is left unconsumed.
//! With a final window (`at_eof`) undecidable '<'s are text and a missing
//! terminator is an error. This makes the event sequence independent of
//! how the input was split into windows.

use crate::config::ParseConfig;
use crate::core::classifier::{classify, find_structure_end, Classification, StructureKind};
use crate::core::locator::Locator;
use crate::core::scanner::Scanner;
use crate::core::span::{Position, Span};
use crate::core::splitter;
use crate::error::{ErrorKind, ParseError, Result};
use crate::handler::MarkupHandler;
use crate::processor::EventProcessor;
use crate::reader::{BufferManager, DEFAULT_BUFFER_SIZE};
use log::trace;
use std::io::Read;

/// Smallest accepted pull-mode buffer
const MIN_BUFFER_SIZE: usize = 16;

/// Reusable, thread-safe markup parser
#[derive(Debug, Clone)]
pub struct MarkupParser {
    config: ParseConfig,
    buffer_size: usize,
}

impl MarkupParser {
    pub fn new(config: ParseConfig) -> Self {
        MarkupParser {
            config,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Initial working buffer size for `parse_reader`
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(MIN_BUFFER_SIZE);
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Parse a complete in-memory document
    pub fn parse<H: MarkupHandler + ?Sized>(&self, buffer: &[u8], handler: &mut H) -> Result<()> {
        self.parse_slice(buffer, 0, buffer.len(), handler)
    }

    pub fn parse_str<H: MarkupHandler + ?Sized>(&self, text: &str, handler: &mut H) -> Result<()> {
        self.parse(text.as_bytes(), handler)
    }

    /// Parse `buffer[offset..offset + len]`. Reported spans are relative to
    /// the whole `buffer`. A window outside `buffer` fails with
    /// `WindowOutOfBounds` before any event is reported.
    pub fn parse_slice<H: MarkupHandler + ?Sized>(
        &self,
        buffer: &[u8],
        offset: usize,
        len: usize,
        handler: &mut H,
    ) -> Result<()> {
        let end = match offset.checked_add(len) {
            Some(end) if end <= buffer.len() => end,
            _ => {
                let size = buffer.len();
                return Err(ParseError::at(
                    ErrorKind::WindowOutOfBounds { offset, len, size },
                    Position::default(),
                ));
            }
        };

        let mut session = Session::new(&self.config, handler);
        session.processor.document_start()?;
        session.parse_window(buffer, offset, end, true)?;
        session.finish()
    }

    /// Parse from a pull source through a growable working buffer
    pub fn parse_reader<R: Read, H: MarkupHandler + ?Sized>(&self, reader: R, handler: &mut H) -> Result<()> {
        let mut buffers = BufferManager::new(reader, self.buffer_size);
        let mut session = Session::new(&self.config, handler);
        session.processor.document_start()?;

        loop {
            let at_eof = buffers.fill()?;
            let window = buffers.filled();
            let consumed = session.parse_window(window, 0, window.len(), at_eof)?;
            if at_eof {
                break;
            }
            buffers.consume(consumed);
        }
        session.finish()
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new(ParseConfig::default())
    }
}

/// State of one parse call
struct Session<'a, H: MarkupHandler + ?Sized> {
    config: &'a ParseConfig,
    processor: EventProcessor<'a, H>,
    /// Position of the first unconsumed byte
    locator: Locator,
}

impl<'a, H: MarkupHandler + ?Sized> Session<'a, H> {
    fn new(config: &'a ParseConfig, handler: &'a mut H) -> Self {
        Session {
            config,
            processor: EventProcessor::new(config, handler),
            locator: Locator::new(),
        }
    }

    fn finish(mut self) -> Result<()> {
        let at = self.locator.position();
        self.processor.document_end(at)
    }

    /// Report `buffer[from..to]` as text (if non-empty) and move past it
    fn text(&mut self, buffer: &[u8], from: usize, to: usize) -> Result<()> {
        if to > from {
            let span = Span::new(from, to - from, self.locator.position());
            self.processor.text(buffer, span)?;
            self.locator.advance_over(&buffer[from..to]);
        }
        Ok(())
    }

    /// Parse `buffer[start..end]`, returning how far input was consumed.
    /// With `at_eof` everything is consumed or an error is returned.
    fn parse_window(&mut self, buffer: &[u8], start: usize, end: usize, at_eof: bool) -> Result<usize> {
        trace!("parsing window of {} bytes (eof: {}, depth: {})", end - start, at_eof, self.processor.depth());
        let mut pos = start;

        'structures: loop {
            if let Some(limit) = self.processor.parsing_disabled_until() {
                let case_insensitive = self.config.is_html();
                match Scanner::new(buffer, pos, end).find_sequence(limit, case_insensitive) {
                    Some(close) => {
                        self.text(buffer, pos, close)?;
                        pos = close;
                        self.processor.enable_parsing();
                    }
                    None if at_eof => {
                        self.text(buffer, pos, end)?;
                        return Ok(end);
                    }
                    None => return Ok(pos),
                }
            }

            let mut search = pos;
            loop {
                let Some(lt) = Scanner::new(buffer, search, end).find_tag_start() else {
                    if at_eof {
                        self.text(buffer, pos, end)?;
                        return Ok(end);
                    }
                    return Ok(pos);
                };

                let kind = match classify(buffer, lt, end, at_eof) {
                    Classification::Structure(kind) => kind,
                    Classification::Literal => {
                        search = lt + 1;
                        continue;
                    }
                    Classification::NeedMoreInput => return Ok(pos),
                };

                let Some(gt) = find_structure_end(buffer, lt, end, kind) else {
                    if !at_eof {
                        return Ok(pos);
                    }
                    if self.config.lenient_unfinished_tags && kind.is_tag() {
                        search = lt + 1;
                        continue;
                    }
                    self.text(buffer, pos, lt)?;
                    return Err(ParseError::at(
                        ErrorKind::UnfinishedStructure(kind.describe()),
                        self.locator.position(),
                    ));
                };

                self.text(buffer, pos, lt)?;
                let outer = Span::new(lt, gt + 1 - lt, self.locator.position());
                self.structure(buffer, kind, outer)?;
                self.locator.advance_over(&buffer[lt..=gt]);
                pos = gt + 1;
                continue 'structures;
            }
        }
    }

    fn structure(&mut self, buffer: &[u8], kind: StructureKind, outer: Span) -> Result<()> {
        match kind {
            StructureKind::OpenElement => {
                let tag = splitter::split_open_element(buffer, outer);
                self.processor.element(buffer, &tag)
            }
            StructureKind::CloseElement => {
                let tag = splitter::split_close_element(buffer, outer);
                self.processor.close_element(buffer, &tag)
            }
            StructureKind::Comment => {
                self.processor
                    .comment(buffer, splitter::split_comment(outer), outer)
            }
            StructureKind::Cdata => {
                self.processor
                    .cdata_section(buffer, splitter::split_cdata(outer), outer)
            }
            StructureKind::DocType => {
                let doctype = splitter::split_doctype(buffer, outer)?;
                self.processor.doctype(buffer, &doctype)
            }
            StructureKind::XmlDeclaration => {
                let declaration = splitter::split_xml_declaration(buffer, outer)?;
                self.processor.xml_declaration(buffer, &declaration)
            }
            StructureKind::ProcessingInstruction => {
                let pi = splitter::split_processing_instruction(buffer, outer);
                self.processor.processing_instruction(buffer, &pi)
            }
        }
    }
}
