//! Structure Splitters
//!
//! Given the exact outer span of a complete structure, decompose it into
//! located sub-spans. Nothing is copied: every part is an offset and
//! length into the same buffer, with the line and column where it starts.
//!
//! Element tags never fail to split (anything after the name is an
//! attribute sequence). DOCTYPE clauses and XML Declarations have a fixed
//! grammar and report a malformed structure otherwise.

use super::attributes::AttributePiece;
use super::locator::Locator;
use super::parts::{DocType, ElementTag, ProcessingInstruction, XmlDeclaration};
use super::scanner::is_whitespace;
use super::span::{Position, Span};
use crate::error::{ErrorKind, ParseError, Result};
use memchr::{memchr, memrchr};

const DOCTYPE: &str = "DOCTYPE clause";

/// Walks a structure left to right, keeping the locator in step
struct Walker<'a> {
    input: &'a [u8],
    pos: usize,
    end: usize,
    locator: Locator,
}

impl<'a> Walker<'a> {
    /// Walk `input[outer.offset..end]`
    fn new(input: &'a [u8], outer: Span, end: usize) -> Self {
        Walker {
            input,
            pos: outer.offset,
            end,
            locator: Locator::at(outer.position()),
        }
    }

    fn position(&self) -> Position {
        self.locator.position()
    }

    fn peek(&self) -> Option<u8> {
        if self.pos < self.end {
            Some(self.input[self.pos])
        } else {
            None
        }
    }

    fn take_to(&mut self, to: usize) -> Span {
        let span = Span::new(self.pos, to - self.pos, self.locator.position());
        self.locator.advance_over(&self.input[self.pos..to]);
        self.pos = to;
        span
    }

    fn skip(&mut self, n: usize) {
        let to = (self.pos + n).min(self.end);
        self.take_to(to);
    }

    fn skip_whitespace(&mut self) {
        let mut to = self.pos;
        while to < self.end && is_whitespace(self.input[to]) {
            to += 1;
        }
        self.take_to(to);
    }

    /// Advance over bytes for which `stop` is false
    fn take_while_not(&mut self, stop: impl Fn(u8) -> bool) -> Span {
        let mut to = self.pos;
        while to < self.end && !stop(self.input[to]) {
            to += 1;
        }
        self.take_to(to)
    }

    /// A `"`- or `'`-quoted literal; the returned span excludes the quotes
    fn quoted(&mut self, structure: &'static str) -> Result<Span> {
        let at = self.position();
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(malformed(structure, "expected a quoted literal", at)),
        };
        let content_start = self.pos + 1;
        let close = memchr(quote, &self.input[content_start..self.end])
            .map(|i| content_start + i)
            .ok_or_else(|| malformed(structure, "unterminated quoted literal", at))?;
        self.skip(1);
        let content = self.take_to(close);
        self.skip(1);
        Ok(content)
    }
}

fn malformed(structure: &'static str, reason: &'static str, at: Position) -> ParseError {
    ParseError::at(ErrorKind::MalformedStructure { structure, reason }, at)
}

/// Split `<name attributes>` or `<name attributes/>`
pub fn split_open_element(input: &[u8], outer: Span) -> ElementTag {
    split_element(input, outer, 1)
}

/// Split `</name ...>`
pub fn split_close_element(input: &[u8], outer: Span) -> ElementTag {
    split_element(input, outer, 2)
}

fn split_element(input: &[u8], outer: Span, prefix_len: usize) -> ElementTag {
    let gt = outer.end() - 1;
    let name_start = outer.offset + prefix_len;
    let minimized = prefix_len == 1 && gt > name_start && input[gt - 1] == b'/';
    let attributes_end = if minimized { gt - 1 } else { gt };

    let mut walker = Walker::new(input, outer, attributes_end);
    walker.skip(prefix_len);
    let name = walker.take_while_not(is_whitespace);

    ElementTag {
        name,
        attributes_start: walker.pos,
        attributes_end,
        attributes_at: walker.position(),
        minimized,
        outer,
    }
}

/// Content of `<!--content-->`
pub fn split_comment(outer: Span) -> Span {
    inner_span(outer, 4, 3)
}

/// Content of `<![CDATA[content]]>`
pub fn split_cdata(outer: Span) -> Span {
    inner_span(outer, 9, 3)
}

fn inner_span(outer: Span, prefix: usize, suffix: usize) -> Span {
    // Openers are ASCII on one line
    Span::new(
        outer.offset + prefix,
        outer.len - prefix - suffix,
        Position::new(outer.line, outer.col + prefix as u32),
    )
}

/// Split `<?target content?>`
pub fn split_processing_instruction(input: &[u8], outer: Span) -> ProcessingInstruction {
    let content_end = outer.end() - 2;
    let mut walker = Walker::new(input, outer, content_end);
    walker.skip(2);
    let target = walker.take_while_not(is_whitespace);
    walker.skip_whitespace();
    let content = if walker.pos < content_end {
        Some(walker.take_to(content_end))
    } else {
        None
    };
    ProcessingInstruction {
        target,
        content,
        outer,
    }
}

/// Split and validate `<?xml version="..." encoding="..." standalone="..."?>`.
///
/// `version` is mandatory and comes first, `encoding` precedes
/// `standalone`, values are quoted and no other pseudo-attribute is allowed.
pub fn split_xml_declaration(input: &[u8], outer: Span) -> Result<XmlDeclaration> {
    let gt = outer.end() - 1;
    let keyword_end = outer.offset + 5;
    if gt < keyword_end + 1 || input[gt - 1] != b'?' {
        return Err(malformed(
            "XML Declaration",
            "must end with \"?>\"",
            outer.position(),
        ));
    }

    let mut walker = Walker::new(input, outer, keyword_end);
    walker.skip(2);
    let keyword = walker.take_to(keyword_end);

    let tag = ElementTag {
        name: keyword,
        attributes_start: keyword_end,
        attributes_end: gt - 1,
        attributes_at: walker.position(),
        minimized: false,
        outer,
    };

    let mut version = None;
    let mut encoding = None;
    let mut standalone = None;
    let invalid = |reason, at| Err(ParseError::at(ErrorKind::InvalidXmlDeclaration(reason), at));

    for piece in tag.pieces(input) {
        let AttributePiece::Attribute(attribute) = piece else {
            continue;
        };
        let at = attribute.name.position();
        if !attribute.has_operator() || !attribute.is_quoted() {
            return invalid("pseudo-attribute values must be quoted", at);
        }
        let value = Some(attribute.value_content);
        match attribute.name.slice(input) {
            b"version" => {
                if version.is_some() {
                    return invalid("duplicate version", at);
                }
                if encoding.is_some() || standalone.is_some() {
                    return invalid("version must be the first pseudo-attribute", at);
                }
                version = value;
            }
            b"encoding" => {
                if version.is_none() {
                    return invalid("version must be the first pseudo-attribute", at);
                }
                if encoding.is_some() {
                    return invalid("duplicate encoding", at);
                }
                if standalone.is_some() {
                    return invalid("encoding must come before standalone", at);
                }
                encoding = value;
            }
            b"standalone" => {
                if version.is_none() {
                    return invalid("version must be the first pseudo-attribute", at);
                }
                if standalone.is_some() {
                    return invalid("duplicate standalone", at);
                }
                standalone = value;
            }
            _ => return invalid("only version, encoding and standalone are allowed", at),
        }
    }

    let Some(version) = version else {
        return invalid("version is required", outer.position());
    };

    Ok(XmlDeclaration {
        keyword,
        version,
        encoding,
        standalone,
        outer,
    })
}

/// Split `<!DOCTYPE name [PUBLIC "pub" ["sys"] | SYSTEM "sys"] [[subset]]>`
pub fn split_doctype(input: &[u8], outer: Span) -> Result<DocType> {
    let gt = outer.end() - 1;
    let mut walker = Walker::new(input, outer, gt);
    walker.skip(2);
    let keyword = walker.take_to(outer.offset + 9);
    walker.skip_whitespace();

    let element_name = walker.take_while_not(|b| is_whitespace(b) || b == b'[');
    if element_name.is_empty() {
        return Err(malformed(DOCTYPE, "missing root element name", walker.position()));
    }
    walker.skip_whitespace();

    let mut kind = None;
    let mut public_id = None;
    let mut system_id = None;
    if walker.peek().is_some_and(|b| b != b'[') {
        let at = walker.position();
        let word = walker.take_while_not(|b| is_whitespace(b) || b == b'[' || b == b'"' || b == b'\'');
        let text = word.slice(input);
        if text.eq_ignore_ascii_case(b"PUBLIC") {
            walker.skip_whitespace();
            public_id = Some(walker.quoted(DOCTYPE)?);
            walker.skip_whitespace();
            if matches!(walker.peek(), Some(b'"' | b'\'')) {
                system_id = Some(walker.quoted(DOCTYPE)?);
            }
        } else if text.eq_ignore_ascii_case(b"SYSTEM") {
            walker.skip_whitespace();
            system_id = Some(walker.quoted(DOCTYPE)?);
        } else {
            return Err(malformed(DOCTYPE, "expected PUBLIC, SYSTEM or an internal subset", at));
        }
        kind = Some(word);
        walker.skip_whitespace();
    }

    let mut internal_subset = None;
    if walker.peek() == Some(b'[') {
        let at = walker.position();
        let close = memrchr(b']', &input[walker.pos..gt])
            .map(|i| walker.pos + i)
            .ok_or_else(|| malformed(DOCTYPE, "unterminated internal subset", at))?;
        walker.skip(1);
        internal_subset = Some(walker.take_to(close));
        walker.skip(1);
        walker.skip_whitespace();
    }

    if walker.pos < gt {
        return Err(malformed(
            DOCTYPE,
            "unexpected content after the DOCTYPE declaration",
            walker.position(),
        ));
    }

    Ok(DocType {
        keyword,
        element_name,
        kind,
        public_id,
        system_id,
        internal_subset,
        outer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outer(input: &[u8]) -> Span {
        Span::new(0, input.len(), Position::default())
    }

    fn text(input: &[u8], span: Span) -> &str {
        span.as_str(input).unwrap()
    }

    fn reason(err: ParseError) -> Option<&'static str> {
        match err.kind()? {
            ErrorKind::InvalidXmlDeclaration(reason) => Some(reason),
            ErrorKind::MalformedStructure { reason, .. } => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_open_element() {
        let input = b"<div class=\"a\" id=b>";
        let tag = split_open_element(input, outer(input));
        assert_eq!(text(input, tag.name), "div");
        assert_eq!(tag.name.position(), Position::new(1, 2));
        assert!(!tag.minimized);
        let pieces: Vec<_> = tag.pieces(input).collect();
        assert_eq!(pieces.len(), 4);
    }

    #[test]
    fn test_minimized_element() {
        let input = b"<br/>";
        let tag = split_open_element(input, outer(input));
        assert_eq!(text(input, tag.name), "br");
        assert!(tag.minimized);
        assert_eq!(tag.pieces(input).count(), 0);

        let input = b"<img src=x />";
        let tag = split_open_element(input, outer(input));
        assert!(tag.minimized);
        assert_eq!(tag.attributes_end, input.len() - 2);
    }

    #[test]
    fn test_close_element_with_whitespace() {
        let input = b"</p  >";
        let tag = split_close_element(input, outer(input));
        assert_eq!(text(input, tag.name), "p");
        assert_eq!(tag.name.position(), Position::new(1, 3));
        match tag.pieces(input).next() {
            Some(AttributePiece::Whitespace(ws)) => assert_eq!(ws.len, 2),
            other => panic!("expected whitespace, got {:?}", other),
        }
    }

    #[test]
    fn test_comment_and_cdata() {
        let input = b"<!-- hi -->";
        assert_eq!(text(input, split_comment(outer(input))), " hi ");
        let input = b"<![CDATA[x<y]]>";
        let content = split_cdata(outer(input));
        assert_eq!(text(input, content), "x<y");
        assert_eq!(content.position(), Position::new(1, 10));
        let input = b"<!---->";
        assert!(split_comment(outer(input)).is_empty());
    }

    #[test]
    fn test_processing_instruction() {
        let input = b"<?php echo 1; ?>";
        let pi = split_processing_instruction(input, outer(input));
        assert_eq!(text(input, pi.target), "php");
        assert_eq!(text(input, pi.content.unwrap()), "echo 1; ");

        let input = b"<?target   ?>";
        let pi = split_processing_instruction(input, outer(input));
        assert_eq!(text(input, pi.target), "target");
        assert!(pi.content.is_none());
    }

    #[test]
    fn test_xml_declaration() {
        let input = b"<?xml version=\"1.0\" encoding='UTF-8' standalone=\"yes\"?>";
        let decl = split_xml_declaration(input, outer(input)).unwrap();
        assert_eq!(text(input, decl.keyword), "xml");
        assert_eq!(text(input, decl.version), "1.0");
        assert_eq!(text(input, decl.encoding.unwrap()), "UTF-8");
        assert_eq!(text(input, decl.standalone.unwrap()), "yes");
    }

    #[test]
    fn test_xml_declaration_order() {
        let cases: [(&[u8], &str); 6] = [
            (b"<?xml encoding=\"UTF-8\" version=\"1.0\"?>", "version must be the first pseudo-attribute"),
            (b"<?xml version=\"1.0\" standalone=\"no\" encoding=\"UTF-8\"?>", "encoding must come before standalone"),
            (b"<?xml version=\"1.0\" version=\"1.1\"?>", "duplicate version"),
            (b"<?xml version=\"1.0\" foo=\"bar\"?>", "only version, encoding and standalone are allowed"),
            (b"<?xml version=1.0?>", "pseudo-attribute values must be quoted"),
            (b"<?xml ?>", "version is required"),
        ];
        for (input, expected) in cases {
            let err = split_xml_declaration(input, outer(input)).unwrap_err();
            assert_eq!(reason(err), Some(expected), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_xml_declaration_needs_question_mark() {
        let input = b"<?xml version=\"1.0\">";
        let err = split_xml_declaration(input, outer(input)).unwrap_err();
        assert_eq!(reason(err), Some("must end with \"?>\""));
    }

    #[test]
    fn test_html5_doctype() {
        let input = b"<!DOCTYPE html>";
        let doctype = split_doctype(input, outer(input)).unwrap();
        assert_eq!(text(input, doctype.keyword), "DOCTYPE");
        assert_eq!(text(input, doctype.element_name), "html");
        assert!(doctype.kind.is_none());
        assert!(doctype.public_id.is_none());
    }

    #[test]
    fn test_public_doctype() {
        let input = b"<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\"\n  'http://www.w3.org/TR/html4/strict.dtd'>";
        let doctype = split_doctype(input, outer(input)).unwrap();
        assert_eq!(text(input, doctype.kind.unwrap()), "PUBLIC");
        assert_eq!(text(input, doctype.public_id.unwrap()), "-//W3C//DTD HTML 4.01//EN");
        let system = doctype.system_id.unwrap();
        assert_eq!(text(input, system), "http://www.w3.org/TR/html4/strict.dtd");
        assert_eq!(system.position(), Position::new(2, 4));
    }

    #[test]
    fn test_doctype_internal_subset() {
        let input = b"<!DOCTYPE note SYSTEM \"note.dtd\" [<!ELEMENT note (#PCDATA)>]>";
        let doctype = split_doctype(input, outer(input)).unwrap();
        assert_eq!(text(input, doctype.system_id.unwrap()), "note.dtd");
        assert_eq!(text(input, doctype.internal_subset.unwrap()), "<!ELEMENT note (#PCDATA)>");

        let input = b"<!DOCTYPE note[<!ENTITY a \"b\">]>";
        let doctype = split_doctype(input, outer(input)).unwrap();
        assert_eq!(text(input, doctype.element_name), "note");
        assert!(doctype.internal_subset.is_some());
    }

    #[test]
    fn test_malformed_doctype() {
        for input in [
            &b"<!DOCTYPE>"[..],
            b"<!DOCTYPE html BOGUS>",
            b"<!DOCTYPE html SYSTEM>",
            b"<!DOCTYPE html PUBLIC \"a\" \"b\" extra>",
        ] {
            let err = split_doctype(input, outer(input)).unwrap_err();
            assert!(
                matches!(err.kind(), Some(ErrorKind::MalformedStructure { .. })),
                "{:?}",
                String::from_utf8_lossy(input)
            );
        }
    }
}
