//! Owned Markup Events
//!
//! Handler events hold spans into a buffer that is reused between passes.
//! `MarkupEvent` is the copied-out form: every name and text is owned, and
//! each event keeps the position where it starts.

use crate::core::span::Position;

/// A parse event with its bytes copied out of the working buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    DocumentStart,
    DocumentEnd {
        at: Position,
    },

    XmlDeclaration {
        version: Vec<u8>,
        encoding: Option<Vec<u8>>,
        standalone: Option<Vec<u8>>,
        /// The whole `<?xml ...?>` as written
        raw: Vec<u8>,
        at: Position,
    },

    DocType {
        element_name: Vec<u8>,
        public_id: Option<Vec<u8>>,
        system_id: Option<Vec<u8>>,
        internal_subset: Option<Vec<u8>>,
        raw: Vec<u8>,
        at: Position,
    },

    CdataSection {
        content: Vec<u8>,
        raw: Vec<u8>,
        at: Position,
    },

    Comment {
        content: Vec<u8>,
        raw: Vec<u8>,
        at: Position,
    },

    Text {
        content: Vec<u8>,
        at: Position,
    },

    /// `<name/>`, or a void HTML element written as an open tag
    StandaloneElement {
        name: Vec<u8>,
        minimized: bool,
        raw: Vec<u8>,
        at: Position,
    },

    OpenElement {
        name: Vec<u8>,
        raw: Vec<u8>,
        at: Position,
    },

    CloseElement {
        name: Vec<u8>,
        raw: Vec<u8>,
        at: Position,
    },

    UnmatchedCloseElement {
        name: Vec<u8>,
        raw: Vec<u8>,
        at: Position,
    },

    /// Synthetic: the element was implied, not written
    AutoOpenElement {
        name: Vec<u8>,
        at: Position,
    },

    /// Synthetic: the element's close was implied, not written
    AutoCloseElement {
        name: Vec<u8>,
        at: Position,
    },

    Attribute {
        name: Vec<u8>,
        value: Vec<u8>,
        quoted: bool,
        at: Position,
    },

    InnerWhitespace {
        content: Vec<u8>,
        at: Position,
    },

    ProcessingInstruction {
        target: Vec<u8>,
        content: Option<Vec<u8>>,
        raw: Vec<u8>,
        at: Position,
    },
}

impl MarkupEvent {
    /// Where the event starts in the document
    pub fn position(&self) -> Option<Position> {
        match self {
            MarkupEvent::DocumentStart => None,
            MarkupEvent::DocumentEnd { at }
            | MarkupEvent::XmlDeclaration { at, .. }
            | MarkupEvent::DocType { at, .. }
            | MarkupEvent::CdataSection { at, .. }
            | MarkupEvent::Comment { at, .. }
            | MarkupEvent::Text { at, .. }
            | MarkupEvent::StandaloneElement { at, .. }
            | MarkupEvent::OpenElement { at, .. }
            | MarkupEvent::CloseElement { at, .. }
            | MarkupEvent::UnmatchedCloseElement { at, .. }
            | MarkupEvent::AutoOpenElement { at, .. }
            | MarkupEvent::AutoCloseElement { at, .. }
            | MarkupEvent::Attribute { at, .. }
            | MarkupEvent::InnerWhitespace { at, .. }
            | MarkupEvent::ProcessingInstruction { at, .. } => Some(*at),
        }
    }

    /// Element name, for element events
    pub fn element_name(&self) -> Option<&[u8]> {
        match self {
            MarkupEvent::StandaloneElement { name, .. }
            | MarkupEvent::OpenElement { name, .. }
            | MarkupEvent::CloseElement { name, .. }
            | MarkupEvent::UnmatchedCloseElement { name, .. }
            | MarkupEvent::AutoOpenElement { name, .. }
            | MarkupEvent::AutoCloseElement { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The input bytes this event accounts for.
    ///
    /// Text and user-written structures return what was written; synthetic
    /// events, and the attributes and whitespace already covered by their
    /// element's `raw`, return `None`. Concatenating every `Some` in order
    /// rebuilds the document.
    pub fn source(&self) -> Option<&[u8]> {
        match self {
            MarkupEvent::Text { content, .. } => Some(content),
            MarkupEvent::XmlDeclaration { raw, .. }
            | MarkupEvent::DocType { raw, .. }
            | MarkupEvent::CdataSection { raw, .. }
            | MarkupEvent::Comment { raw, .. }
            | MarkupEvent::StandaloneElement { raw, .. }
            | MarkupEvent::OpenElement { raw, .. }
            | MarkupEvent::CloseElement { raw, .. }
            | MarkupEvent::UnmatchedCloseElement { raw, .. }
            | MarkupEvent::ProcessingInstruction { raw, .. } => Some(raw),
            _ => None,
        }
    }

    #[inline]
    pub fn is_synthetic(&self) -> bool {
        matches!(
            self,
            MarkupEvent::AutoOpenElement { .. } | MarkupEvent::AutoCloseElement { .. }
        )
    }

    /// Short `"kind name"` form of element and text events, e.g.
    /// `"auto-close li"` or `"text x"`
    pub fn summary(&self) -> Option<String> {
        let (kind, name) = match self {
            MarkupEvent::StandaloneElement { name, .. } => ("standalone", name),
            MarkupEvent::OpenElement { name, .. } => ("open", name),
            MarkupEvent::CloseElement { name, .. } => ("close", name),
            MarkupEvent::UnmatchedCloseElement { name, .. } => ("unmatched-close", name),
            MarkupEvent::AutoOpenElement { name, .. } => ("auto-open", name),
            MarkupEvent::AutoCloseElement { name, .. } => ("auto-close", name),
            MarkupEvent::Text { content, .. } => ("text", content),
            _ => return None,
        };
        Some(format!("{} {}", kind, String::from_utf8_lossy(name)))
    }
}
