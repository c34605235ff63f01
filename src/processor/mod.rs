//! Markup Event Processor
//!
//! The balancing state machine between the splitters and the handler. Its
//! state is the open element stack plus a few flags; every structure the
//! splitters produce goes through here and comes out as the final, possibly
//! expanded, event sequence.
//!
//! Element starts follow a two-phase protocol:
//! 1. plan: inspect the element's descriptor and record the auto-close and
//!    auto-open adjustments it needs, without emitting anything
//! 2. apply: perform the adjustments (each reported as auto-* events), then
//!    report the element itself exactly once
//!
//! All violations are fatal and located at the construct that caused them.

pub mod prolog;
pub mod stack;
pub mod status;

use crate::config::{ElementBalancing, ParseConfig};
use crate::core::attributes::AttributePiece;
use crate::core::names::NameRepository;
use crate::core::parts::{DocType, ElementTag, ProcessingInstruction, XmlDeclaration};
use crate::core::span::{Position, Span};
use crate::error::{ErrorKind, ParseError, Result};
use crate::handler::MarkupHandler;
use crate::html::descriptor::{contains, is_executable_script_type, ContentModel, ElementDescriptor};
use crate::html::registry::{self, ElementRegistry};
use log::debug;
use prolog::PrologState;
use stack::ElementStack;
use status::{Adjustment, ParseStatus};
use std::rc::Rc;

/// Per-parse event processor feeding one handler
pub struct EventProcessor<'a, H: MarkupHandler + ?Sized> {
    config: &'a ParseConfig,
    handler: &'a mut H,
    registry: &'static ElementRegistry,
    names: NameRepository,
    stack: ElementStack,
    status: ParseStatus,
    prolog: PrologState,
    /// Attribute names of the element being reported
    seen_attributes: Vec<Rc<[u8]>>,
}

impl<'a, H: MarkupHandler + ?Sized> EventProcessor<'a, H> {
    pub fn new(config: &'a ParseConfig, handler: &'a mut H) -> Self {
        EventProcessor {
            config,
            handler,
            registry: registry::global(),
            names: NameRepository::new(),
            stack: ElementStack::new(),
            status: ParseStatus::new(),
            prolog: PrologState::new(),
            seen_attributes: Vec::with_capacity(8),
        }
    }

    /// The `</name` sequence that ends the current CDATA-bodied element
    #[inline]
    pub fn parsing_disabled_until(&self) -> Option<&[u8]> {
        self.status.parsing_disabled_until()
    }

    #[inline]
    pub fn enable_parsing(&mut self) {
        self.status.enable_parsing();
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn document_start(&mut self) -> Result<()> {
        self.handler.document_start()
    }

    /// Close whatever is still open, then report the end of the document
    pub fn document_end(&mut self, at: Position) -> Result<()> {
        self.prolog.document_end(self.config, at)?;

        let balancing = self.config.element_balancing;
        if balancing.tracks_balance() && !self.stack.is_empty() {
            if !balancing.allows_auto_close() {
                return Err(ParseError::at(
                    ErrorKind::OpenElementsAtEnd(self.stack.describe()),
                    at,
                ));
            }
            debug!("auto-closing {} open element(s) at document end", self.stack.len());
            self.auto_close_to(0, at)?;
        }
        self.handler.document_end(at)
    }

    pub fn text(&mut self, buffer: &[u8], text: Span) -> Result<()> {
        self.handler.text(buffer, text)
    }

    pub fn comment(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        self.handler.comment(buffer, content, outer)
    }

    pub fn cdata_section(&mut self, buffer: &[u8], content: Span, outer: Span) -> Result<()> {
        self.handler.cdata_section(buffer, content, outer)
    }

    pub fn processing_instruction(&mut self, buffer: &[u8], pi: &ProcessingInstruction) -> Result<()> {
        self.handler
            .processing_instruction(buffer, pi.target, pi.content, pi.outer)
    }

    pub fn xml_declaration(&mut self, buffer: &[u8], declaration: &XmlDeclaration) -> Result<()> {
        self.prolog
            .xml_declaration(self.config, declaration.outer.position())?;
        self.handler.xml_declaration(buffer, declaration)
    }

    pub fn doctype(&mut self, buffer: &[u8], doctype: &DocType) -> Result<()> {
        self.prolog
            .doctype(self.config, buffer, doctype, &mut self.names)?;
        self.handler.doctype(buffer, doctype)
    }

    /// An open tag, a minimized `<name/>` tag, or a void HTML element
    pub fn element(&mut self, buffer: &[u8], tag: &ElementTag) -> Result<()> {
        let at = tag.outer.position();
        let name = self.names.intern(tag.name.slice(buffer), self.config.folds_case());
        let descriptor = if self.config.is_html() {
            Some(self.registry.lookup(&name))
        } else {
            None
        };

        if let Some(descriptor) = &descriptor {
            self.plan_adjustments(descriptor);
            self.apply_adjustments(&name, at)?;
        }
        self.prolog
            .element_start(self.config, &name, self.stack.is_empty(), at)?;

        let void = descriptor.as_ref().is_some_and(|d| d.is_void());
        if tag.minimized || void {
            self.handler
                .standalone_element_start(buffer, tag.name, tag.minimized)?;
            self.attributes(buffer, tag)?;
            return self
                .handler
                .standalone_element_end(buffer, tag.name, tag.minimized, tag.outer);
        }

        self.handler.open_element_start(buffer, tag.name)?;
        let inert_script = self.attributes(buffer, tag)?;
        self.handler.open_element_end(buffer, tag.name, tag.outer)?;
        self.stack.push(Rc::clone(&name));

        let raw_text = match descriptor.as_ref().map(|d| d.content) {
            Some(ContentModel::Cdata) => true,
            Some(ContentModel::Script) => !inert_script,
            _ => false,
        };
        if raw_text {
            self.status.disable_parsing_until(&name);
        }
        Ok(())
    }

    /// A `</name>` tag
    pub fn close_element(&mut self, buffer: &[u8], tag: &ElementTag) -> Result<()> {
        let at = tag.outer.position();
        let name = self.names.intern(tag.name.slice(buffer), self.config.folds_case());
        let balancing = self.config.element_balancing;
        let matched = self.stack.position_of(&name);

        if !balancing.tracks_balance() {
            if let Some(depth) = matched {
                self.stack.truncate(depth);
            }
            return self.report_close(buffer, tag, false);
        }

        let Some(depth) = matched else {
            if self.config.no_unmatched_close_elements || balancing == ElementBalancing::RequireBalanced {
                return Err(ParseError::at(
                    ErrorKind::UnmatchedCloseElement(String::from_utf8_lossy(&name).into_owned()),
                    at,
                ));
            }
            return self.report_close(buffer, tag, true);
        };

        if depth + 1 < self.stack.len() {
            if !balancing.allows_auto_close() {
                let innermost = self
                    .stack
                    .top()
                    .map(|open| String::from_utf8_lossy(open).into_owned())
                    .unwrap_or_default();
                return Err(ParseError::at(ErrorKind::UnclosedElement(innermost), at));
            }
            self.auto_close_to(depth + 1, at)?;
        }
        self.stack.pop();
        self.report_close(buffer, tag, false)
    }

    fn report_close(&mut self, buffer: &[u8], tag: &ElementTag, unmatched: bool) -> Result<()> {
        if unmatched {
            self.handler.unmatched_close_element_start(buffer, tag.name)?;
        } else {
            self.handler.close_element_start(buffer, tag.name)?;
        }
        for piece in tag.pieces(buffer) {
            match piece {
                AttributePiece::Whitespace(span) => self.handler.inner_whitespace(buffer, span)?,
                AttributePiece::Attribute(attribute) => self.handler.attribute(buffer, &attribute)?,
            }
        }
        if unmatched {
            self.handler
                .unmatched_close_element_end(buffer, tag.name, tag.outer)
        } else {
            self.handler.close_element_end(buffer, tag.name, tag.outer)
        }
    }

    /// Report the attribute sequence of an element start, enforcing the
    /// configured attribute rules. Returns whether a `type` attribute names
    /// a non-executable script type.
    fn attributes(&mut self, buffer: &[u8], tag: &ElementTag) -> Result<bool> {
        let mut inert_script = false;
        self.seen_attributes.clear();

        for piece in tag.pieces(buffer) {
            let attribute = match piece {
                AttributePiece::Whitespace(span) => {
                    self.handler.inner_whitespace(buffer, span)?;
                    continue;
                }
                AttributePiece::Attribute(attribute) => attribute,
            };
            let name = attribute.name.slice(buffer);

            if self.config.xml_well_formed_attribute_values
                && !(attribute.has_operator() && attribute.is_quoted())
            {
                return Err(ParseError::at(
                    ErrorKind::UnquotedAttributeValue(String::from_utf8_lossy(name).into_owned()),
                    attribute.name.position(),
                ));
            }
            if self.config.unique_attributes {
                let interned = self.names.intern(name, self.config.folds_case());
                if self.seen_attributes.iter().any(|seen| Rc::ptr_eq(seen, &interned)) {
                    return Err(ParseError::at(
                        ErrorKind::DuplicateAttribute(String::from_utf8_lossy(name).into_owned()),
                        attribute.name.position(),
                    ));
                }
                self.seen_attributes.push(interned);
            }
            if name.eq_ignore_ascii_case(b"type")
                && !is_executable_script_type(attribute.value_content.slice(buffer))
            {
                inert_script = true;
            }

            self.handler.attribute(buffer, &attribute)?;
        }
        Ok(inert_script)
    }

    /// Phase one: record the stack changes `descriptor` requires, simulating
    /// them on a copy of the stack so later steps see earlier ones
    fn plan_adjustments(&mut self, descriptor: &ElementDescriptor) {
        let balancing = self.config.element_balancing;
        if !balancing.tracks_balance() {
            return;
        }
        let mut open: Vec<&[u8]> = self.stack.names().collect();

        if balancing.allows_auto_open()
            && descriptor.requests_auto_open()
            && !open.iter().any(|name| contains(descriptor.auto_open_limits, name))
        {
            for &parent in descriptor.auto_open_parents {
                if open.iter().any(|name| name.eq_ignore_ascii_case(parent.as_bytes())) {
                    continue;
                }
                let parent_descriptor = self.registry.lookup(parent.as_bytes());
                if let Some(depth) = sibling_depth(&open, &parent_descriptor) {
                    self.status.plan(Adjustment::CloseTo(depth));
                    open.truncate(depth);
                }
                self.status.plan(Adjustment::Open(parent));
                open.push(parent.as_bytes());
            }
        }

        if let Some(depth) = sibling_depth(&open, descriptor) {
            self.status.plan(Adjustment::CloseTo(depth));
        }
    }

    /// Phase two: perform the planned adjustments, reporting each one
    fn apply_adjustments(&mut self, name: &[u8], at: Position) -> Result<()> {
        let plan = self.status.take_plan();
        let mut outcome = Ok(());
        for &adjustment in &plan {
            outcome = match adjustment {
                Adjustment::CloseTo(depth) if self.config.element_balancing.allows_auto_close() => {
                    self.auto_close_to(depth, at)
                }
                Adjustment::CloseTo(depth) => {
                    let closes = self
                        .stack
                        .names()
                        .nth(depth)
                        .map(|open| String::from_utf8_lossy(open).into_owned())
                        .unwrap_or_default();
                    Err(ParseError::at(
                        ErrorKind::AutoCloseNotAllowed {
                            name: String::from_utf8_lossy(name).into_owned(),
                            closes,
                        },
                        at,
                    ))
                }
                Adjustment::Open(parent) => self.auto_open(parent, at),
            };
            if outcome.is_err() {
                break;
            }
        }
        self.status.recycle_plan(plan);
        outcome
    }

    fn auto_open(&mut self, parent: &'static str, at: Position) -> Result<()> {
        let name = self.names.intern(parent.as_bytes(), false);
        self.prolog
            .element_start(self.config, &name, self.stack.is_empty(), at)?;
        self.handler.auto_open_element_start(&name, at)?;
        self.handler.auto_open_element_end(&name, at)?;
        self.stack.push(name);
        Ok(())
    }

    /// Pop and report every element at `depth` and above, innermost first
    fn auto_close_to(&mut self, depth: usize, at: Position) -> Result<()> {
        while self.stack.len() > depth {
            let Some(name) = self.stack.pop() else {
                break;
            };
            self.handler.auto_close_element_start(&name, at)?;
            self.handler.auto_close_element_end(&name, at)?;
        }
        Ok(())
    }
}

/// Depth of the element a new `descriptor` element implicitly closes.
///
/// Walks from the innermost open element outwards: the first sibling found
/// is closed along with everything above it, a limit element stops the walk.
fn sibling_depth(open: &[&[u8]], descriptor: &ElementDescriptor) -> Option<usize> {
    if !descriptor.requests_auto_close() {
        return None;
    }
    for (depth, name) in open.iter().enumerate().rev() {
        if contains(descriptor.auto_close_siblings, name) {
            return Some(depth);
        }
        if contains(descriptor.auto_close_limits, name) {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::splitter::{split_close_element, split_open_element};
    use crate::sax::{EventCollector, MarkupEvent};

    fn outer(input: &[u8]) -> Span {
        Span::new(0, input.len(), Position::default())
    }

    /// Feed whole tags one by one and collect the resulting events
    fn run(config: &ParseConfig, tags: &[&str]) -> Result<Vec<MarkupEvent>> {
        let mut collector = EventCollector::new();
        {
            let mut processor = EventProcessor::new(config, &mut collector);
            for tag in tags {
                let input = tag.as_bytes();
                if input.starts_with(b"</") {
                    processor.close_element(input, &split_close_element(input, outer(input)))?;
                } else {
                    processor.element(input, &split_open_element(input, outer(input)))?;
                    if processor.parsing_disabled_until().is_some() {
                        processor.enable_parsing();
                    }
                }
            }
            processor.document_end(Position::default())?;
        }
        Ok(collector.into_events())
    }

    fn summary(events: &[MarkupEvent]) -> Vec<String> {
        events.iter().filter_map(MarkupEvent::summary).collect()
    }

    #[test]
    fn test_sibling_depth() {
        let li = ElementDescriptor::standard("li").auto_close(&["li"], &["ul", "ol"]);
        assert_eq!(sibling_depth(&[&b"ul"[..], b"li"], &li), Some(1));
        assert_eq!(sibling_depth(&[&b"ul"[..], b"li", b"b"], &li), Some(1));
        assert_eq!(sibling_depth(&[&b"li"[..], b"ul"], &li), None);
        assert_eq!(sibling_depth(&[], &li), None);
    }

    #[test]
    fn test_auto_open_html_body() {
        let events = run(&ParseConfig::html(), &["<p>"]).unwrap();
        assert_eq!(
            summary(&events),
            vec![
                "auto-open html",
                "auto-open body",
                "open p",
                "auto-close p",
                "auto-close body",
                "auto-close html"
            ]
        );
    }

    #[test]
    fn test_body_closes_auto_opened_head() {
        let events = run(&ParseConfig::html(), &["<title>", "</title>", "<div>"]).unwrap();
        assert_eq!(
            summary(&events)[..7],
            [
                "auto-open html",
                "auto-open head",
                "open title",
                "close title",
                "auto-close head",
                "auto-open body",
                "open div"
            ]
        );
    }

    #[test]
    fn test_body_content_stays_inside_template() {
        for (wrapper, child) in [("template", "div"), ("noscript", "p")] {
            let tags = [
                format!("<{}>", wrapper),
                format!("<{}>", child),
                format!("</{}>", child),
                format!("</{}>", wrapper),
            ];
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            let events = run(&ParseConfig::html(), &tags).unwrap();
            assert_eq!(
                summary(&events),
                [
                    "auto-open html".to_string(),
                    "auto-open head".to_string(),
                    format!("open {}", wrapper),
                    format!("open {}", child),
                    format!("close {}", child),
                    format!("close {}", wrapper),
                    "auto-close head".to_string(),
                    "auto-close html".to_string(),
                ]
            );
        }
    }

    #[test]
    fn test_metadata_after_body_stays_put() {
        let config = ParseConfig::html();
        let events = run(&config, &["<body>", "<meta>"]).unwrap();
        assert_eq!(summary(&events)[..3], ["auto-open html", "open body", "standalone meta"]);
    }

    #[test]
    fn test_limit_stops_auto_close() {
        let config = ParseConfig::html().with_element_balancing(ElementBalancing::AutoClose);
        let events = run(&config, &["<li>", "<ul>", "<li>"]).unwrap();
        assert_eq!(summary(&events)[..3], ["open li", "open ul", "open li"]);
    }

    #[test]
    fn test_require_balanced_rejects_sibling_close() {
        let config = ParseConfig::html().with_element_balancing(ElementBalancing::RequireBalanced);
        let err = run(&config, &["<li>", "<li>"]).unwrap_err();
        assert_eq!(
            err.kind(),
            Some(&ErrorKind::AutoCloseNotAllowed {
                name: "li".to_string(),
                closes: "li".to_string()
            })
        );
    }

    #[test]
    fn test_unclosed_intervening_element() {
        let err = run(&ParseConfig::xml(), &["<a>", "<b>", "</a>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::UnclosedElement("b".to_string())));
    }

    #[test]
    fn test_unmatched_close() {
        let config = ParseConfig::html().with_element_balancing(ElementBalancing::AutoClose);
        let events = run(&config, &["</x>"]).unwrap();
        assert_eq!(summary(&events), vec!["unmatched-close x"]);

        let err = run(&ParseConfig::xml(), &["</x>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::UnmatchedCloseElement("x".to_string())));
    }

    #[test]
    fn test_void_close_is_unmatched() {
        let config = ParseConfig::html().with_element_balancing(ElementBalancing::AutoClose);
        let events = run(&config, &["<br>", "</br>"]).unwrap();
        assert_eq!(summary(&events), vec!["standalone br", "unmatched-close br"]);
    }

    #[test]
    fn test_no_balancing_reports_plain_closes() {
        let config = ParseConfig::html().with_element_balancing(ElementBalancing::NoBalancing);
        let events = run(&config, &["<a>", "<b>", "</a>", "</zzz>"]).unwrap();
        assert_eq!(summary(&events), vec!["open a", "open b", "close a", "close zzz"]);
    }

    #[test]
    fn test_open_elements_at_end() {
        let err = run(&ParseConfig::xml(), &["<a>", "<b>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::OpenElementsAtEnd("b, a".to_string())));
    }

    #[test]
    fn test_duplicate_attribute_case_insensitive_in_html() {
        let config = ParseConfig::html().with_unique_attributes(true);
        let err = run(&config, &["<div id=a ID=b>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::DuplicateAttribute("ID".to_string())));
        assert_eq!(err.position(), Some(Position::new(1, 11)));
    }

    #[test]
    fn test_unquoted_attribute_in_xml() {
        let err = run(&ParseConfig::xml(), &["<a b=c>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::UnquotedAttributeValue("b".to_string())));
        let err = run(&ParseConfig::xml(), &["<a checked>"]).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::UnquotedAttributeValue("checked".to_string())));
    }

    #[test]
    fn test_script_type_decides_raw_text() {
        let mut collector = EventCollector::new();
        let config = ParseConfig::html();
        let mut processor = EventProcessor::new(&config, &mut collector);
        let input = b"<script>";
        processor.element(input, &split_open_element(input, outer(input))).unwrap();
        assert_eq!(processor.parsing_disabled_until(), Some(&b"</script"[..]));
        processor.enable_parsing();

        let input = b"<script type=\"text/template\">";
        processor.element(input, &split_open_element(input, outer(input))).unwrap();
        assert!(processor.parsing_disabled_until().is_none());
    }
}
