//! Markup Handler
//!
//! Callback interface receiving the final event sequence, in document
//! order. Every method has a no-op default, so implementors only override
//! the events they care about.
//!
//! Spans point into the `buffer` passed with the same call and are only
//! valid during that call. Auto-open and auto-close events describe
//! elements that were never written: they carry the canonical name and the
//! position of the construct that caused them instead of spans.
//!
//! Returning an error aborts the parse; the error is returned unchanged
//! from the parser entry point.

use crate::core::parts::{Attribute, DocType, XmlDeclaration};
use crate::core::span::{Position, Span};
use crate::error::Result;

/// Receives parse events
#[allow(unused_variables)]
pub trait MarkupHandler {
    /// First event of every parse
    fn document_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Last event of every successful parse
    fn document_end(&mut self, at: Position) -> Result<()> {
        Ok(())
    }

    fn xml_declaration(&mut self, buffer: &[u8], declaration: &XmlDeclaration) -> Result<()> {
        Ok(())
    }

    fn doctype(&mut self, buffer: &[u8], doctype: &DocType) -> Result<()> {
        Ok(())
    }

    /// `content` excludes `<![CDATA[` and `]]>`
    fn cdata_section(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        Ok(())
    }

    /// `content` excludes `<!--` and `-->`
    fn comment(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        Ok(())
    }

    /// Character data, including the body of CDATA-bodied elements
    fn text(&mut self, buffer: &[u8], text: Span) -> Result<()> {
        Ok(())
    }

    /// `minimized` is true for `<name/>`, false for a void element written
    /// as an open tag
    fn standalone_element_start(&mut self, buffer: &[u8], name: Span, minimized: bool) -> Result<()> {
        Ok(())
    }

    fn standalone_element_end(
        &mut self,
        buffer: &[u8],
        name: Span,
        minimized: bool,
        outer: Span,
    ) -> Result<()> {
        Ok(())
    }

    fn open_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        Ok(())
    }

    fn open_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        Ok(())
    }

    fn auto_open_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        Ok(())
    }

    fn auto_open_element_end(&mut self, name: &[u8], at: Position) -> Result<()> {
        Ok(())
    }

    fn close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        Ok(())
    }

    fn close_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        Ok(())
    }

    fn auto_close_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        Ok(())
    }

    fn auto_close_element_end(&mut self, name: &[u8], at: Position) -> Result<()> {
        Ok(())
    }

    /// A close tag with no open element of that name on the stack
    fn unmatched_close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        Ok(())
    }

    fn unmatched_close_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        Ok(())
    }

    fn attribute(&mut self, buffer: &[u8], attribute: &Attribute) -> Result<()> {
        Ok(())
    }

    /// Whitespace between attributes (or after a close tag's name)
    fn inner_whitespace(&mut self, buffer: &[u8], whitespace: Span) -> Result<()> {
        Ok(())
    }

    /// `content` is `None` when nothing but whitespace follows the target
    fn processing_instruction(
        &mut self,
        buffer: &[u8],
        target: Span,
        content: Option<Span>,
        outer: Span,
    ) -> Result<()> {
        Ok(())
    }
}

impl<H: MarkupHandler + ?Sized> MarkupHandler for &mut H {
    fn document_start(&mut self) -> Result<()> {
        (**self).document_start()
    }
    fn document_end(&mut self, at: Position) -> Result<()> {
        (**self).document_end(at)
    }
    fn xml_declaration(&mut self, buffer: &[u8], declaration: &XmlDeclaration) -> Result<()> {
        (**self).xml_declaration(buffer, declaration)
    }
    fn doctype(&mut self, buffer: &[u8], doctype: &DocType) -> Result<()> {
        (**self).doctype(buffer, doctype)
    }
    fn cdata_section(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        (**self).cdata_section(buffer, content, outer)
    }
    fn comment(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        (**self).comment(buffer, content, outer)
    }
    fn text(&mut self, buffer: &[u8], text: Span) -> Result<()> {
        (**self).text(buffer, text)
    }
    fn standalone_element_start(&mut self, buffer: &[u8], name: Span, minimized: bool) -> Result<()> {
        (**self).standalone_element_start(buffer, name, minimized)
    }
    fn standalone_element_end(&mut self, buffer: &[u8], name: Span, minimized: bool, outer: Span) -> Result<()> {
        (**self).standalone_element_end(buffer, name, minimized, outer)
    }
    fn open_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        (**self).open_element_start(buffer, name)
    }
    fn open_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        (**self).open_element_end(buffer, name, outer)
    }
    fn auto_open_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        (**self).auto_open_element_start(name, at)
    }
    fn auto_open_element_end(&mut self, name: &[u8], at: Position) -> Result<()> {
        (**self).auto_open_element_end(name, at)
    }
    fn close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        (**self).close_element_start(buffer, name)
    }
    fn close_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        (**self).close_element_end(buffer, name, outer)
    }
    fn auto_close_element_start(&mut self, name: &[u8], at: Position) -> Result<()> {
        (**self).auto_close_element_start(name, at)
    }
    fn auto_close_element_end(&mut self, name: &[u8], at: Position) -> Result<()> {
        (**self).auto_close_element_end(name, at)
    }
    fn unmatched_close_element_start(&mut self, buffer: &[u8], name: Span) -> Result<()> {
        (**self).unmatched_close_element_start(buffer, name)
    }
    fn unmatched_close_element_end(&mut self, buffer: &[u8], name: Span, outer: Span) -> Result<()> {
        (**self).unmatched_close_element_end(buffer, name, outer)
    }
    fn attribute(&mut self, buffer: &[u8], attribute: &Attribute) -> Result<()> {
        (**self).attribute(buffer, attribute)
    }
    fn inner_whitespace(&mut self, buffer: &[u8], whitespace: Span) -> Result<()> {
        (**self).inner_whitespace(buffer, whitespace)
    }
    fn processing_instruction(
        &mut self,
        buffer: &[u8],
        target: Span,
        content: Option<Span>,
        outer: Span,
    ) -> Result<()> {
        (**self).processing_instruction(buffer, target, content, outer)
    }
}
