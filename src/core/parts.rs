//! Named sub-spans of split structures
//!
//! Produced by the splitters and handed to the handler by reference. Like
//! every span, they point into the buffer passed with the event.

use super::attributes::AttributeSequence;
use super::span::{Position, Span};

/// One attribute inside an element tag.
///
/// A bare name has a zero-length operator and value anchored right after
/// the name. For a quoted value `value_content` excludes the quotes and
/// `value_outer` includes them; for an unquoted one they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: Span,
    /// `=` plus any surrounding whitespace
    pub operator: Span,
    pub value_content: Span,
    pub value_outer: Span,
}

impl Attribute {
    /// Whether an `=` operator was written
    #[inline]
    pub fn has_operator(&self) -> bool {
        !self.operator.is_empty()
    }

    /// Whether the value was written between quotes
    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.value_outer.len >= 2 && self.value_outer.len == self.value_content.len + 2
    }

    /// Span covering the whole attribute, name through value
    pub fn outer(&self) -> Span {
        let end = self.value_outer.end().max(self.operator.end()).max(self.name.end());
        Span {
            len: end - self.name.offset,
            ..self.name
        }
    }
}

/// An open, standalone or close element tag.
///
/// The attribute region runs from right after the name up to the closing
/// `>` (or `/>` for a minimized tag) and is split lazily with
/// [`ElementTag::pieces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTag {
    pub name: Span,
    pub attributes_start: usize,
    pub attributes_end: usize,
    pub attributes_at: Position,
    /// Written as `<name/>`
    pub minimized: bool,
    pub outer: Span,
}

impl ElementTag {
    /// Attributes and whitespace runs following the name
    pub fn pieces<'a>(&self, buffer: &'a [u8]) -> AttributeSequence<'a> {
        AttributeSequence::new(buffer, self.attributes_start, self.attributes_end, self.attributes_at)
    }
}

/// `<?target content?>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingInstruction {
    pub target: Span,
    /// Everything between the whitespace after the target and `?>`
    pub content: Option<Span>,
    pub outer: Span,
}

/// `<?xml version="..." encoding="..." standalone="..."?>`
///
/// Value spans exclude the quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlDeclaration {
    /// The `xml` keyword
    pub keyword: Span,
    pub version: Span,
    pub encoding: Option<Span>,
    pub standalone: Option<Span>,
    pub outer: Span,
}

/// `<!DOCTYPE name PUBLIC "public" "system" [subset]>`
///
/// Quoted identifiers exclude the quotes; the internal subset excludes the
/// brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocType {
    /// The `DOCTYPE` keyword as written
    pub keyword: Span,
    pub element_name: Span,
    /// `PUBLIC` or `SYSTEM` as written
    pub kind: Option<Span>,
    pub public_id: Option<Span>,
    pub system_id: Option<Span>,
    pub internal_subset: Option<Span>,
    pub outer: Span,
}
