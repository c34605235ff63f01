//! Event Collector
//!
//! A `MarkupHandler` that copies every event out of the working buffer into
//! a list of owned `MarkupEvent`s.

use super::events::MarkupEvent;
use crate::core::parts::{Attribute, DocType, XmlDeclaration};
use crate::core::span::{Position, Span};
use crate::error::Result;
use crate::handler::MarkupHandler;

fn copy(buffer: &[u8], span: Span) -> Vec<u8> {
    span.slice(buffer).to_vec()
}

/// Collects owned events in document order
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<MarkupEvent>,
    /// Index of the element whose `*_end` event will supply its raw bytes
    pending: Option<usize>,
}

impl EventCollector {
    pub fn new() -> Self {
        EventCollector {
            events: Vec::with_capacity(256),
            pending: None,
        }
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[MarkupEvent] {
        &self.events
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<MarkupEvent> {
        self.pending = None;
        std::mem::take(&mut self.events)
    }

    pub fn into_events(self) -> Vec<MarkupEvent> {
        self.events
    }

    /// Get number of collected events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn start(&mut self, event: MarkupEvent) {
        self.pending = Some(self.events.len());
        self.events.push(event);
    }

    /// Fill in the raw bytes and start of the element started last
    fn finish(&mut self, buffer: &[u8], outer: Span) {
        let Some(index) = self.pending.take() else {
            return;
        };
        if let Some(
            MarkupEvent::StandaloneElement { raw, at, .. }
            | MarkupEvent::OpenElement { raw, at, .. }
            | MarkupEvent::CloseElement { raw, at, .. }
            | MarkupEvent::UnmatchedCloseElement { raw, at, .. },
        ) = self.events.get_mut(index)
        {
            *raw = copy(buffer, outer);
            *at = outer.position();
        }
    }
}

impl MarkupHandler for EventCollector {
    fn document_start(&mut self) -> Result<()> {
        self.events.push(MarkupEvent::DocumentStart);
        Ok(())
    }

    fn document_end(&mut self, at: Position) -> Result<()> {
        self.events.push(MarkupEvent::DocumentEnd { at });
        Ok(())
    }

    fn xml_declaration(&mut self, buffer: &[u8], declaration: &XmlDeclaration) -> Result<()> {
        self.events.push(MarkupEvent::XmlDeclaration {
            version: copy(buffer, declaration.version),
            encoding: declaration.encoding.map(|s| copy(buffer, s)),
            standalone: declaration.standalone.map(|s| copy(buffer, s)),
            raw: copy(buffer, declaration.outer),
            at: declaration.outer.position(),
        });
        Ok(())
    }

    fn doctype(&mut self, buffer: &[u8], doctype: &DocType) -> Result<()> {
        self.events.push(MarkupEvent::DocType {
            element_name: copy(buffer, doctype.element_name),
            public_id: doctype.public_id.map(|s| copy(buffer, s)),
            system_id: doctype.system_id.map(|s| copy(buffer, s)),
            internal_subset: doctype.internal_subset.map(|s| copy(buffer, s)),
            raw: copy(buffer, doctype.outer),
            at: doctype.outer.position(),
        });
        Ok(())
    }

    fn cdata_section(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        self.events.push(MarkupEvent::CdataSection {
            content: copy(buffer, content),
            raw: copy(buffer, outer),
            at: outer.position(),
        });
        Ok(())
    }

    fn comment(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        self.events.push(MarkupEvent::Comment {
            content: copy(buffer, content),
            raw: copy(buffer, outer),
            at: outer.position(),
        });
        Ok(())
    }

    fn text(&mut self, buffer: &[u8], text: Span) -> Result<()> {
        self.events.push(MarkupEvent::Text {
            content: copy(buffer, text),
            at: text.position(),
        });
        Ok(())
    }

    fn standalone_element_start(&mut self, buffer: &[u8], name: Span, minimized: bool) -> Result<()> {
        self.start(MarkupEvent::StandaloneElement {
            name: copy(buffer, name),
            minimized,
            raw: Vec::new(),
            at: name.position(),
        });
        Ok(())
    }

    fn standalone_element_end(
        &mut self,
        buffer: &[u8],
        _name: Span,
        _minimized: bool,
        outer: Span,
    ) -> Result<()> {
        self.finish(buffer, outer);
        Ok(())
    }

    fn open_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        self.start(MarkupEvent::OpenElement {
            name: copy(buffer, name),
            raw: Vec::new(),
            at: name.position(),
        });
        Ok(())
    }

    fn open_element_end(&mut self, buffer: &[u8], _name: Span, outer: Span) -> Result<()> {
        self.finish(buffer, outer);
        Ok(())
    }

    fn auto_open_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        self.events.push(MarkupEvent::AutoOpenElement {
            name: name.to_vec(),
            at,
        });
        Ok(())
    }

    fn close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        self.start(MarkupEvent::CloseElement {
            name: copy(buffer, name),
            raw: Vec::new(),
            at: name.position(),
        });
        Ok(())
    }

    fn close_element_end(&mut self, buffer: &[u8], _name: Span, outer: Span) -> Result<()> {
        self.finish(buffer, outer);
        Ok(())
    }

    fn auto_close_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        self.events.push(MarkupEvent::AutoCloseElement {
            name: name.to_vec(),
            at,
        });
        Ok(())
    }

    fn unmatched_close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        self.start(MarkupEvent::UnmatchedCloseElement {
            name: copy(buffer, name),
            raw: Vec::new(),
            at: name.position(),
        });
        Ok(())
    }

    fn unmatched_close_element_end(&mut self, buffer: &[u8], _name: Span, outer: Span) -> Result<()> {
        self.finish(buffer, outer);
        Ok(())
    }

    fn attribute(&mut self, buffer: &[u8], attribute: &Attribute) -> Result<()> {
        self.events.push(MarkupEvent::Attribute {
            name: copy(buffer, attribute.name),
            value: copy(buffer, attribute.value_content),
            quoted: attribute.is_quoted(),
            at: attribute.name.position(),
        });
        Ok(())
    }

    fn inner_whitespace(&mut self, buffer: &[u8], whitespace: Span) -> Result<()> {
        self.events.push(MarkupEvent::InnerWhitespace {
            content: copy(buffer, whitespace),
            at: whitespace.position(),
        });
        Ok(())
    }

    fn processing_instruction(
        &mut self,
        buffer: &[u8],
        target: Span,
        content: Option<Span>,
        outer: Span,
    ) -> Result<()> {
        self.events.push(MarkupEvent::ProcessingInstruction {
            target: copy(buffer, target),
            content: content.map(|s| copy(buffer, s)),
            raw: copy(buffer, outer),
            at: outer.position(),
        });
        Ok(())
    }
}
