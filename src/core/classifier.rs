//! Structure Classifier
//!
//! Decides what kind of markup structure begins at a '<' and where it ends.
//!
//! Disambiguation order matters: comments and CDATA sections are checked
//! before the generic `<!` DOCTYPE, and `<?xml` followed by whitespace (or an
//! immediate `?>`) is an XML Declaration rather than a processing
//! instruction.

use super::scanner::{is_name_start_byte, is_whitespace, match_keyword, Scanner};

/// Kind of markup structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// `<name ...>` or `<name .../>`
    OpenElement,
    /// `</name>`
    CloseElement,
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    Cdata,
    /// `<!DOCTYPE ...>`
    DocType,
    /// `<?xml ...?>`
    XmlDeclaration,
    /// `<?target ...?>`
    ProcessingInstruction,
}

impl StructureKind {
    /// Human-readable name used in error messages
    pub fn describe(self) -> &'static str {
        match self {
            StructureKind::OpenElement => "element tag",
            StructureKind::CloseElement => "close element tag",
            StructureKind::Comment => "comment",
            StructureKind::Cdata => "CDATA section",
            StructureKind::DocType => "DOCTYPE clause",
            StructureKind::XmlDeclaration => "XML Declaration",
            StructureKind::ProcessingInstruction => "processing instruction",
        }
    }

    /// Whether this is an element tag (the only kind the legacy lenient
    /// mode turns into text when unterminated)
    pub fn is_tag(self) -> bool {
        matches!(self, StructureKind::OpenElement | StructureKind::CloseElement)
    }
}

/// Result of classifying the bytes at a '<'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Structure(StructureKind),
    /// The '<' is plain text
    Literal,
    /// The window ends before the kind can be decided
    NeedMoreInput,
}

/// Classify the structure starting at `input[pos]`, which must be '<'.
///
/// With `at_eof` the window is final, so anything undecidable is literal text.
pub fn classify(input: &[u8], pos: usize, end: usize, at_eof: bool) -> Classification {
    debug_assert_eq!(input.get(pos), Some(&b'<'));
    let classification = classify_window(input, pos, end);
    if at_eof && classification == Classification::NeedMoreInput {
        Classification::Literal
    } else {
        classification
    }
}

fn classify_window(input: &[u8], pos: usize, end: usize) -> Classification {
    use Classification::{Literal, NeedMoreInput, Structure};

    let Some(&next) = input[..end].get(pos + 1) else {
        return NeedMoreInput;
    };

    match next {
        b'/' => match input[..end].get(pos + 2) {
            None => NeedMoreInput,
            Some(&b) if is_name_start_byte(b) => Structure(StructureKind::CloseElement),
            Some(_) => Literal,
        },
        b'!' => classify_bang(input, pos, end),
        b'?' => classify_question(input, pos, end),
        b if is_name_start_byte(b) => Structure(StructureKind::OpenElement),
        _ => Literal,
    }
}

/// `<!--`, `<![CDATA[` or `<!DOCTYPE`
fn classify_bang(input: &[u8], pos: usize, end: usize) -> Classification {
    use Classification::{Literal, NeedMoreInput, Structure};

    match match_keyword(input, pos + 2, end, b"--", false) {
        Some(true) => return Structure(StructureKind::Comment),
        None => return NeedMoreInput,
        Some(false) => {}
    }
    match match_keyword(input, pos + 2, end, b"[CDATA[", false) {
        Some(true) => return Structure(StructureKind::Cdata),
        None => return NeedMoreInput,
        Some(false) => {}
    }
    match match_keyword(input, pos + 2, end, b"DOCTYPE", true) {
        Some(true) => match input[..end].get(pos + 9) {
            None => NeedMoreInput,
            Some(&b) if is_whitespace(b) || b == b'>' => Structure(StructureKind::DocType),
            Some(_) => Literal,
        },
        None => NeedMoreInput,
        Some(false) => Literal,
    }
}

/// `<?xml` declaration or `<?target` processing instruction
fn classify_question(input: &[u8], pos: usize, end: usize) -> Classification {
    use Classification::{Literal, NeedMoreInput, Structure};

    let window = &input[..end];
    match match_keyword(input, pos + 2, end, b"xml", false) {
        Some(true) => match window.get(pos + 5) {
            None => NeedMoreInput,
            Some(&b) if is_whitespace(b) => Structure(StructureKind::XmlDeclaration),
            Some(b'?') => match window.get(pos + 6) {
                None => NeedMoreInput,
                Some(b'>') => Structure(StructureKind::XmlDeclaration),
                Some(_) => Structure(StructureKind::ProcessingInstruction),
            },
            Some(_) => Structure(StructureKind::ProcessingInstruction),
        },
        None => NeedMoreInput,
        Some(false) => match window.get(pos + 2) {
            Some(&b) if is_name_start_byte(b) => Structure(StructureKind::ProcessingInstruction),
            _ => Literal,
        },
    }
}

/// Find the final '>' of a structure of the given kind starting at `pos`.
///
/// `None` means the terminator is not inside the window.
pub fn find_structure_end(input: &[u8], pos: usize, end: usize, kind: StructureKind) -> Option<usize> {
    match kind {
        StructureKind::OpenElement | StructureKind::CloseElement | StructureKind::XmlDeclaration => {
            Scanner::new(input, pos + 1, end).find_tag_end_quoted()
        }
        StructureKind::DocType => Scanner::new(input, pos + 2, end).find_doctype_end(),
        StructureKind::Comment => Scanner::new(input, pos, end).find_terminator(b"-->", pos + 4),
        StructureKind::Cdata => Scanner::new(input, pos, end).find_terminator(b"]]>", pos + 9),
        StructureKind::ProcessingInstruction => {
            Scanner::new(input, pos, end).find_terminator(b"?>", pos + 2)
        }
    }
}
