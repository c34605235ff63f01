//! Prolog and root element validation
//!
//! Tracks what has been seen so far (XML Declaration, DOCTYPE, elements)
//! and rejects prolog parts that are repeated, misplaced or not allowed,
//! plus root elements that break the configured uniqueness policy.

use crate::config::{ParseConfig, PrologPresence, UniqueRootElement};
use crate::core::names::NameRepository;
use crate::core::parts::DocType;
use crate::core::span::Position;
use crate::error::{ErrorKind, ParseError, Result};
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct PrologState {
    xml_declaration_seen: bool,
    doctype_seen: bool,
    /// Root element name declared by the DOCTYPE
    doctype_root: Option<Rc<[u8]>>,
    element_seen: bool,
    root_seen: bool,
}

impl PrologState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xml_declaration(&mut self, config: &ParseConfig, at: Position) -> Result<()> {
        let prolog = &config.prolog;
        if prolog.validate {
            if self.xml_declaration_seen {
                return Err(ParseError::at(ErrorKind::DuplicateXmlDeclaration, at));
            }
            if self.doctype_seen || self.element_seen {
                return Err(ParseError::at(ErrorKind::MisplacedXmlDeclaration, at));
            }
            if prolog.xml_declaration == PrologPresence::Forbidden {
                return Err(ParseError::at(ErrorKind::ForbiddenXmlDeclaration, at));
            }
        }
        self.xml_declaration_seen = true;
        Ok(())
    }

    pub fn doctype(
        &mut self,
        config: &ParseConfig,
        buffer: &[u8],
        doctype: &DocType,
        names: &mut NameRepository,
    ) -> Result<()> {
        let prolog = &config.prolog;
        let at = doctype.outer.position();
        if prolog.validate {
            if self.doctype_seen {
                return Err(ParseError::at(ErrorKind::DuplicateDocType, at));
            }
            if self.element_seen {
                return Err(ParseError::at(ErrorKind::MisplacedDocType, at));
            }
            if prolog.doctype == PrologPresence::Forbidden {
                return Err(ParseError::at(ErrorKind::ForbiddenDocType, at));
            }
        }
        if prolog.uppercase_doctype_keywords {
            for keyword in std::iter::once(doctype.keyword).chain(doctype.kind) {
                let written = keyword.slice(buffer);
                if written.iter().any(u8::is_ascii_lowercase) {
                    return Err(ParseError::at(
                        ErrorKind::DocTypeKeywordCase(String::from_utf8_lossy(written).into_owned()),
                        keyword.position(),
                    ));
                }
            }
        }
        self.doctype_seen = true;
        self.doctype_root = Some(names.intern(doctype.element_name.slice(buffer), config.folds_case()));
        Ok(())
    }

    /// Called for every element start, user-written or auto-opened.
    /// `at_root_level` is true when no element is open.
    pub fn element_start(
        &mut self,
        config: &ParseConfig,
        name: &Rc<[u8]>,
        at_root_level: bool,
        at: Position,
    ) -> Result<()> {
        if !self.element_seen {
            self.element_seen = true;
            self.check_required(config, at)?;
        }
        if !at_root_level {
            return Ok(());
        }

        let display = || String::from_utf8_lossy(name).into_owned();
        match config.unique_root_element {
            UniqueRootElement::NotValidated => {}
            UniqueRootElement::RequiredAlways => {
                if self.root_seen {
                    return Err(ParseError::at(ErrorKind::MultipleRootElements(display()), at));
                }
            }
            UniqueRootElement::DependsOnPrologDoctype => {
                if let Some(expected) = &self.doctype_root {
                    if self.root_seen {
                        return Err(ParseError::at(ErrorKind::MultipleRootElements(display()), at));
                    }
                    if !Rc::ptr_eq(expected, name) {
                        return Err(ParseError::at(
                            ErrorKind::RootElementMismatch {
                                expected: String::from_utf8_lossy(expected).into_owned(),
                                found: display(),
                            },
                            at,
                        ));
                    }
                }
            }
        }
        self.root_seen = true;
        Ok(())
    }

    pub fn document_end(&mut self, config: &ParseConfig, at: Position) -> Result<()> {
        if self.element_seen {
            return Ok(());
        }
        self.check_required(config, at)
    }

    /// Required prolog parts must precede the first element
    fn check_required(&self, config: &ParseConfig, at: Position) -> Result<()> {
        let prolog = &config.prolog;
        if !prolog.validate {
            return Ok(());
        }
        if prolog.xml_declaration == PrologPresence::Required && !self.xml_declaration_seen {
            return Err(ParseError::at(ErrorKind::MissingXmlDeclaration, at));
        }
        if prolog.doctype == PrologPresence::Required && !self.doctype_seen {
            return Err(ParseError::at(ErrorKind::MissingDocType, at));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrologConfig;
    use crate::core::span::Span;

    fn doctype_of(input: &[u8]) -> DocType {
        let outer = Span::new(0, input.len(), Position::default());
        crate::core::splitter::split_doctype(input, outer).unwrap()
    }

    fn kind(result: Result<()>) -> ErrorKind {
        result.unwrap_err().kind().cloned().unwrap()
    }

    #[test]
    fn test_duplicate_xml_declaration() {
        let config = ParseConfig::xml();
        let mut prolog = PrologState::new();
        prolog.xml_declaration(&config, Position::new(1, 1)).unwrap();
        let err = prolog.xml_declaration(&config, Position::new(1, 40)).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::DuplicateXmlDeclaration));
        assert_eq!(err.position(), Some(Position::new(1, 40)));
    }

    #[test]
    fn test_unvalidated_prolog_accepts_anything() {
        let config = ParseConfig::html();
        let mut prolog = PrologState::new();
        prolog.xml_declaration(&config, Position::default()).unwrap();
        prolog.xml_declaration(&config, Position::default()).unwrap();
    }

    #[test]
    fn test_misplaced_doctype() {
        let config = ParseConfig::xml();
        let mut names = NameRepository::new();
        let mut prolog = PrologState::new();
        let root = names.intern(b"note", false);
        prolog.element_start(&config, &root, true, Position::default()).unwrap();
        let input = b"<!DOCTYPE note>";
        let result = prolog.doctype(&config, input, &doctype_of(input), &mut names);
        assert_eq!(kind(result), ErrorKind::MisplacedDocType);
    }

    #[test]
    fn test_lowercase_doctype_keyword() {
        let config = ParseConfig::xml();
        let mut names = NameRepository::new();
        let input = b"<!doctype note>";
        let result = PrologState::new().doctype(&config, input, &doctype_of(input), &mut names);
        assert_eq!(kind(result), ErrorKind::DocTypeKeywordCase("doctype".to_string()));

        let input = b"<!DOCTYPE note system \"n.dtd\">";
        let result = PrologState::new().doctype(&config, input, &doctype_of(input), &mut names);
        assert_eq!(kind(result), ErrorKind::DocTypeKeywordCase("system".to_string()));
    }

    #[test]
    fn test_root_must_match_doctype() {
        let config = ParseConfig::xml();
        let mut names = NameRepository::new();
        let mut prolog = PrologState::new();
        let input = b"<!DOCTYPE note>";
        prolog.doctype(&config, input, &doctype_of(input), &mut names).unwrap();
        let other = names.intern(b"memo", false);
        let result = prolog.element_start(&config, &other, true, Position::default());
        assert_eq!(
            kind(result),
            ErrorKind::RootElementMismatch {
                expected: "note".to_string(),
                found: "memo".to_string()
            }
        );
    }

    #[test]
    fn test_second_root() {
        let config = ParseConfig::xml().with_unique_root_element(UniqueRootElement::RequiredAlways);
        let mut names = NameRepository::new();
        let mut prolog = PrologState::new();
        let a = names.intern(b"a", false);
        prolog.element_start(&config, &a, true, Position::default()).unwrap();
        prolog.element_start(&config, &a, false, Position::default()).unwrap();
        let result = prolog.element_start(&config, &a, true, Position::default());
        assert_eq!(kind(result), ErrorKind::MultipleRootElements("a".to_string()));
    }

    #[test]
    fn test_required_parts() {
        let config = ParseConfig::xml().with_prolog(PrologConfig {
            xml_declaration: PrologPresence::Required,
            ..PrologConfig::validated()
        });
        let mut names = NameRepository::new();
        let root = names.intern(b"a", false);
        let result = PrologState::new().element_start(&config, &root, true, Position::default());
        assert_eq!(kind(result), ErrorKind::MissingXmlDeclaration);
        let result = PrologState::new().document_end(&config, Position::default());
        assert_eq!(kind(result), ErrorKind::MissingXmlDeclaration);
    }

    #[test]
    fn test_forbidden_doctype() {
        let config = ParseConfig::xml().with_prolog(PrologConfig {
            doctype: PrologPresence::Forbidden,
            ..PrologConfig::validated()
        });
        let mut names = NameRepository::new();
        let input = b"<!DOCTYPE a>";
        let result = PrologState::new().doctype(&config, input, &doctype_of(input), &mut names);
        assert_eq!(kind(result), ErrorKind::ForbiddenDocType);
    }
}
