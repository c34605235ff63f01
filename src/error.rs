//! Parse errors
//!
//! Every markup violation is fatal and carries the line and column of the
//! offending construct. Input source failures are reported separately.

use crate::core::span::Position;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ParseError>;

/// A parse failure
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The markup violates a structural, balancing or well-formedness rule
    #[error("{kind} (line {line}, col {col})")]
    Markup { kind: ErrorKind, line: u32, col: u32 },

    /// The input source failed
    #[error("failed to read markup input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Build a markup error located at `at`
    pub fn at(kind: ErrorKind, at: Position) -> Self {
        ParseError::Markup {
            kind,
            line: at.line,
            col: at.col,
        }
    }

    /// Error raised from inside a handler callback
    pub fn handler(message: impl Into<String>, at: Position) -> Self {
        Self::at(ErrorKind::Handler(message.into()), at)
    }

    /// The violation, if this is a markup error
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            ParseError::Markup { kind, .. } => Some(kind),
            ParseError::Io(_) => None,
        }
    }

    /// Where the violation was detected, if this is a markup error
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Markup { line, col, .. } => Some(Position::new(*line, *col)),
            ParseError::Io(_) => None,
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    // Structural
    #[error("window of {len} bytes at offset {offset} lies outside a {size} byte buffer")]
    WindowOutOfBounds { offset: usize, len: usize, size: usize },
    #[error("unfinished {0} at end of input")]
    UnfinishedStructure(&'static str),
    #[error("malformed {structure}: {reason}")]
    MalformedStructure {
        structure: &'static str,
        reason: &'static str,
    },

    // Balancing
    #[error("element \"{0}\" is never closed")]
    UnclosedElement(String),
    #[error("close element \"{0}\" does not match any open element")]
    UnmatchedCloseElement(String),
    #[error("element \"{name}\" would need to auto-close \"{closes}\", but balanced markup is required")]
    AutoCloseNotAllowed { name: String, closes: String },
    #[error("document ends with open elements: {0}")]
    OpenElementsAtEnd(String),

    // Well-formedness
    #[error("attribute \"{0}\" must have a quoted value")]
    UnquotedAttributeValue(String),
    #[error("attribute \"{0}\" appears more than once in the same element")]
    DuplicateAttribute(String),
    #[error("only one XML Declaration is allowed per document")]
    DuplicateXmlDeclaration,
    #[error("the XML Declaration must come before the DOCTYPE and any element")]
    MisplacedXmlDeclaration,
    #[error("invalid XML Declaration: {0}")]
    InvalidXmlDeclaration(&'static str),
    #[error("only one DOCTYPE clause is allowed per document")]
    DuplicateDocType,
    #[error("the DOCTYPE clause must come before the root element")]
    MisplacedDocType,
    #[error("DOCTYPE keyword \"{0}\" must be written in upper case")]
    DocTypeKeywordCase(String),
    #[error("root element \"{found}\" does not match DOCTYPE root \"{expected}\"")]
    RootElementMismatch { expected: String, found: String },
    #[error("only one root element is allowed, found a second one: \"{0}\"")]
    MultipleRootElements(String),
    #[error("an XML Declaration is required but none was found")]
    MissingXmlDeclaration,
    #[error("an XML Declaration is not allowed in this document")]
    ForbiddenXmlDeclaration,
    #[error("a DOCTYPE clause is required but none was found")]
    MissingDocType,
    #[error("a DOCTYPE clause is not allowed in this document")]
    ForbiddenDocType,

    // Raised by a handler callback
    #[error("{0}")]
    Handler(String),
}
